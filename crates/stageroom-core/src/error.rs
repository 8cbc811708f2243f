//! Session store errors.

use thiserror::Error;

use crate::{PeerId, RoleName};

/// Errors reported by a [`crate::SessionStore`].
///
/// The client never retries. Every variant is surfaced to the action that
/// triggered it and nowhere else.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Room code has no role attached
    #[error("unknown room code")]
    UnknownRoomCode,

    /// Auth token was not issued by this store
    #[error("invalid auth token")]
    InvalidToken,

    /// Join attempted while already in a room
    #[error("already joined")]
    AlreadyJoined,

    /// Action requires a room connection
    #[error("not connected to a room")]
    NotConnected,

    /// Target peer is not in the room
    #[error("peer not found: {0}")]
    PeerNotFound(PeerId),

    /// Requested role does not exist in the room
    #[error("unknown role: {0}")]
    UnknownRole(RoleName),

    /// Room policy refused the action
    #[error("rejected by room policy: {reason}")]
    Rejected {
        /// Why the policy refused it
        reason: String,
    },
}
