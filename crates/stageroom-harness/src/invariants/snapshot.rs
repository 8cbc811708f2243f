//! Observable state snapshots for invariant checking.
//!
//! Invariants operate on snapshots rather than live state, so each check
//! sees the App and the store at the same instant.

use stageroom_app::{App, RosterEntry, ViewState};
use stageroom_core::{Peer, Role, RoleName, StoreReader};

/// Store selectors at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreSnapshot {
    /// Connected-to-room flag.
    pub connected: bool,
    /// Peer list in store order.
    pub peers: Vec<Peer>,
    /// Local audio enabled flag.
    pub audio_enabled: bool,
    /// Local peer's role. `None` when not in a room.
    pub local_role: Option<Role>,
}

impl StoreSnapshot {
    /// Read every selector from a store.
    pub fn read(store: &dyn StoreReader) -> Self {
        Self {
            connected: store.is_connected(),
            peers: store.peers(),
            audio_enabled: store.is_local_audio_enabled(),
            local_role: store.local_role(),
        }
    }
}

/// Snapshot of one client's observable state.
#[derive(Debug, Clone, Default)]
pub struct ClientSnapshot {
    /// View mode and buttons.
    pub view: ViewState,
    /// Rendered roster.
    pub roster: Vec<RosterEntry>,
    /// Store state at the same instant.
    pub store: StoreSnapshot,
    /// Local role when the current session's connection was applied.
    /// `None` if not tracked or not connected.
    pub role_at_connect: Option<RoleName>,
}

impl ClientSnapshot {
    /// Capture App and store state.
    pub fn capture(app: &App, store: &dyn StoreReader) -> Self {
        Self {
            view: *app.view(),
            roster: app.roster().to_vec(),
            store: StoreSnapshot::read(store),
            role_at_connect: None,
        }
    }

    /// Record the role the App saw when it entered the room.
    #[must_use]
    pub fn with_role_at_connect(mut self, role: Option<RoleName>) -> Self {
        self.role_at_connect = role;
        self
    }
}
