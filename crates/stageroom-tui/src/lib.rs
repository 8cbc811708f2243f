//! Terminal UI for Stageroom
//!
//! A thin shell over [`stageroom_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic
//! [`stageroom_app::Runtime`]; permission checks and view state live in
//! [`stageroom_app::App`].
//!
//! This crate only handles terminal input, rendering, and wiring the client
//! to an in-process [`stageroom_store::LocalStore`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cli;
pub mod demo;
pub mod input;
pub mod logging;
pub mod terminal;
pub mod ui;

pub use input::{Focus, InputState, KeyInput, ROLES};
pub use stageroom_app::{App, AppEvent, Driver, Runtime};
pub use terminal::{TerminalDriver, TerminalError};
