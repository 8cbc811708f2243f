//! Local store configuration.

use std::{collections::BTreeMap, time::Duration};

use stageroom_core::{RoleCapabilityTable, RoleName};

/// Configuration for [`crate::LocalStore`].
#[derive(Debug, Clone)]
pub struct LocalStoreConfig {
    /// Room code → role the code grants.
    pub room_codes: BTreeMap<String, RoleName>,
    /// Capability table used by the room.
    pub roles: RoleCapabilityTable,
    /// Delay applied to the token exchange and join, simulating a remote
    /// service. Zero disables it.
    pub latency: Duration,
}

impl Default for LocalStoreConfig {
    fn default() -> Self {
        Self {
            room_codes: BTreeMap::new(),
            roles: RoleCapabilityTable::standard(),
            latency: Duration::ZERO,
        }
    }
}

impl LocalStoreConfig {
    /// Map a room code to the role it grants. Empty codes are ignored.
    #[must_use]
    pub fn with_room_code(mut self, code: impl Into<String>, role: RoleName) -> Self {
        let code = code.into();
        if !code.is_empty() {
            self.room_codes.insert(code, role);
        }
        self
    }

    /// Set the simulated latency.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}
