//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

use stageroom_core::{PeerId, RoleName};

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Show a blocking alert to the user.
    Alert {
        /// Alert text.
        message: String,
    },

    /// Acquire a token for the role and join the room.
    Join {
        /// Display name entered in the join form.
        user_name: String,
        /// Role chosen in the join form, as entered.
        role: String,
    },

    /// Leave the room.
    Leave,

    /// Enable or disable the local audio track.
    SetLocalAudioEnabled {
        /// New audio state.
        enabled: bool,
    },

    /// Change a peer's role.
    ChangeRoleOfPeer {
        /// Target peer.
        peer_id: PeerId,
        /// Requested role.
        role: RoleName,
        /// Apply without asking the target.
        force: bool,
    },
}

impl AppAction {
    /// Whether the action must be forwarded to the session store.
    pub fn is_store_bound(&self) -> bool {
        matches!(
            self,
            Self::Join { .. }
                | Self::Leave
                | Self::SetLocalAudioEnabled { .. }
                | Self::ChangeRoleOfPeer { .. }
        )
    }
}
