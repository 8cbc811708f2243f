//! Deterministic simulation harness for Stageroom.
//!
//! Runs the real [`stageroom_app`] state machines against any session store
//! (usually the in-process `LocalStore`) with scripted input, so view-sync and
//! permission behavior can be checked without a terminal.
//!
//! # Components
//!
//! - [`SimDriver`]: [`stageroom_app::Driver`] that replays scripted events and
//!   records renders and alerts, for end-to-end [`stageroom_app::Runtime`]
//!   tests
//! - [`SimClient`]: steps App and Bridge by hand and drains store
//!   notifications between steps
//! - [`RecordingStore`]: wraps any store and logs every action call
//!
//! # Invariant Testing
//!
//! The `invariants` module checks what must hold whenever the client is
//! quiescent (no undelivered store notifications). Use
//! [`InvariantRegistry::standard()`] for the common checks.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod recording;
pub mod sim_client;
pub mod sim_driver;

pub use invariants::{
    AudioLabelsMatchStore, ClientSnapshot, Invariant, InvariantRegistry, InvariantResult,
    ListenerMuteHidden, LocalMenuHiddenForListener, RosterMatchesStore, StoreSnapshot,
    ViewMatchesConnection, Violation,
};
pub use recording::{CallLog, RecordingStore, StoreCall};
pub use sim_client::SimClient;
pub use sim_driver::{Frame, SimDriver, SimDriverError};
