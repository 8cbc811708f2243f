//! Core model for Stageroom
//!
//! Peer and role types shared by every layer, and the boundary to the reactive
//! session store that owns connection, media and peer state.
//!
//! # Components
//!
//! - [`Peer`]: Read-only snapshot of a room participant
//! - [`Role`]: Named permission bundle resolved for the local peer
//! - [`RoleCapabilityTable`]: Default permissions per role name
//! - [`SessionStore`]: Subscribable selectors plus the store's action API
//!
//! The client never mutates peer or role data. It reads snapshots through
//! [`StoreReader`] and issues intents through [`SessionStore`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod peer;
mod role;
mod store;

pub use error::StoreError;
pub use peer::{Peer, PeerId};
pub use role::{Permissions, Role, RoleCapabilityTable, RoleName};
pub use store::{
    AuthToken, JoinConfig, JoinSettings, SessionStore, StoreReader, StoreSubscriptions,
};
