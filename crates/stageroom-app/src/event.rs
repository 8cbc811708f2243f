//! Application input events.
//!
//! This module defines [`AppEvent`], the set of inputs that drive the
//! [`crate::App`] state machine.
//!
//! Events originate from two distinct sources:
//! - User interactions (form submit, buttons, roster menu, quit).
//! - Store notifications delivered through the subscriptions, plus results
//!   of forwarded actions reported by the [`crate::Bridge`].

use stageroom_core::{Peer, PeerId};

use crate::ActionKind;

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Join form submitted.
    SubmitJoin {
        /// Entered username.
        user_name: String,
        /// Selected role, as entered.
        role: String,
    },

    /// Token acquisition or join failed.
    JoinFailed {
        /// Error description.
        reason: String,
    },

    /// Connection state changed.
    ConnectionChanged {
        /// Whether the local peer is in a room.
        connected: bool,
    },

    /// Peer list changed. `None` requests a refresh from the store.
    PeersChanged {
        /// Complete current peer list.
        peers: Option<Vec<Peer>>,
    },

    /// Local audio state changed.
    LocalAudioChanged {
        /// Whether local audio is enabled.
        enabled: bool,
    },

    /// Self-mute button clicked.
    AudioButtonClicked,

    /// Action picked from a roster row's menu.
    RosterAction {
        /// Peer the row belongs to.
        peer_id: PeerId,
        /// Picked action.
        kind: ActionKind,
    },

    /// Leave button clicked.
    LeaveClicked,

    /// Client is shutting down.
    Unload,

    /// Store refused a forwarded action.
    StoreRejected {
        /// Error description.
        reason: String,
    },

    /// Presentation surface resized; everything is redrawn.
    Resize,
}
