//! Session store boundary.
//!
//! The session store owns connection establishment, media and peer-state
//! derivation. The client talks to it through two traits:
//!
//! - [`StoreReader`]: synchronous selectors, read at decision time
//! - [`SessionStore`]: subscriptions and the action API
//!
//! Subscriptions are [`tokio::sync::watch`] receivers. A watch channel keeps
//! only the latest value, so a slow consumer skips intermediate snapshots but
//! never observes one older than the most recent notification.

use std::{fmt, future::Future};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::{Peer, PeerId, Role, RoleName, StoreError};

/// Session credential returned by the room-code exchange.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap a raw token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(..)")
    }
}

/// Settings applied when joining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinSettings {
    /// Join with the microphone muted.
    pub is_audio_muted: bool,
}

/// Parameters for [`SessionStore::join`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinConfig {
    /// Display name for the local peer.
    pub user_name: String,
    /// Credential obtained from the room-code exchange.
    pub auth_token: AuthToken,
    /// Initial media settings.
    pub settings: JoinSettings,
}

/// Receivers for the store's subscribable selectors.
#[derive(Debug, Clone)]
pub struct StoreSubscriptions {
    /// Connected-to-room flag.
    pub connection: watch::Receiver<bool>,
    /// Ordered peer list.
    pub peers: watch::Receiver<Vec<Peer>>,
    /// Local audio enabled flag.
    pub local_audio: watch::Receiver<bool>,
}

/// Synchronous selectors over the store's current state.
///
/// Every read reflects the store at call time. Callers must not cache the
/// results across decisions.
pub trait StoreReader {
    /// Whether the local peer is connected to a room.
    fn is_connected(&self) -> bool;

    /// Current peer list, in store order.
    fn peers(&self) -> Vec<Peer>;

    /// Whether the local audio track is enabled.
    fn is_local_audio_enabled(&self) -> bool;

    /// Role of the local peer. `None` when not in a room.
    fn local_role(&self) -> Option<Role>;
}

/// Reactive session store: selectors, subscriptions and actions.
///
/// Action methods that the client does not await (`leave`, audio and role
/// changes) are synchronous and report only whether the store accepted the
/// request. The store remains the authority and may reject a request the
/// client allowed.
pub trait SessionStore: StoreReader + Send {
    /// Subscribe to connection, peer-list and local-audio changes.
    fn subscribe(&self) -> StoreSubscriptions;

    /// Exchange a pre-provisioned room code for a session credential.
    fn get_auth_token_by_room_code(
        &mut self,
        room_code: &str,
    ) -> impl Future<Output = Result<AuthToken, StoreError>> + Send;

    /// Join the room.
    fn join(&mut self, config: JoinConfig) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Leave the room. Best effort, never awaited.
    fn leave(&mut self);

    /// Enable or disable the local audio track.
    fn set_local_audio_enabled(&mut self, enabled: bool) -> Result<(), StoreError>;

    /// Request a role change for a peer. `force` applies it without asking
    /// the target.
    fn change_role_of_peer(
        &mut self,
        peer_id: &PeerId,
        role: &RoleName,
        force: bool,
    ) -> Result<(), StoreError>;
}
