//! Application layer for Stageroom
//!
//! Pure state machines and a generic runtime that keep the presentation in
//! sync with the session store and gate every locally-initiated control
//! action, so the same code runs in the terminal client and in simulation.
//!
//! # Components
//!
//! - [`App`]: UI state machine (views, roster, buttons, permission checks)
//! - [`PermissionGate`]: Dispatch table validating control actions
//! - [`Bridge`]: Executes store-bound [`AppAction`]s against a
//!   [`stageroom_core::SessionStore`]
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod bridge;
mod config;
mod driver;
mod event;
mod gate;
mod roster;
mod runtime;
mod state;
mod token;
mod view;

pub use action::AppAction;
pub use app::App;
pub use bridge::{Bridge, JoinError};
pub use config::ClientConfig;
pub use driver::Driver;
pub use event::AppEvent;
pub use gate::{ActionKind, ControlTarget, Denial, PermissionGate};
pub use roster::{ActionMenu, AvatarService, RosterEntry};
pub use runtime::Runtime;
pub use state::{AudioButton, ButtonColor, JoinButton, ViewMode, ViewState};
pub use token::{RoomCodes, TokenError, acquire_token};
