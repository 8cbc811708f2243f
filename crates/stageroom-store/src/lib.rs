//! In-process session store for Stageroom
//!
//! [`LocalStore`] implements the [`stageroom_core::SessionStore`] boundary
//! without a media server. It keeps an authoritative [`RoomState`], enforces
//! the room's capability table, and publishes its selectors through watch
//! channels after every mutation.
//!
//! [`RoomHandle`] plays the rest of the room: it adds and removes remote
//! participants, changes roles as another moderator would, and drops the
//! connection.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod local;
mod room;

pub use config::LocalStoreConfig;
pub use local::{LocalStore, RoomHandle};
pub use room::{RoleChangeRequest, RoomState};
