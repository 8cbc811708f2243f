//! Peer snapshots.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::RoleName;

/// Opaque peer identifier assigned by the session store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PeerId(String);

impl PeerId {
    /// Wrap a store-assigned identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PeerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A participant in the room, as last reported by the store.
///
/// Snapshots are owned by the store. Consumers treat each peer list they
/// receive as the complete current set and keep no copy between updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peer {
    /// Store-assigned identifier.
    pub id: PeerId,
    /// Display name chosen at join time.
    pub name: String,
    /// Whether this peer is the local participant.
    pub is_local: bool,
    /// Name of the peer's current role.
    pub role_name: RoleName,
}

impl Peer {
    /// Snapshot of a remote participant.
    pub fn remote(id: impl Into<PeerId>, name: impl Into<String>, role_name: RoleName) -> Self {
        Self { id: id.into(), name: name.into(), is_local: false, role_name }
    }

    /// Snapshot of the local participant.
    pub fn local(id: impl Into<PeerId>, name: impl Into<String>, role_name: RoleName) -> Self {
        Self { id: id.into(), name: name.into(), is_local: true, role_name }
    }
}

impl From<String> for PeerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
