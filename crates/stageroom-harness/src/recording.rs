//! Store call recording.
//!
//! [`RecordingStore`] wraps any [`SessionStore`] and appends every action
//! call to a shared [`CallLog`] before delegating. Tests keep a clone of the
//! log and assert on exact call counts and arguments after the store has
//! been moved into a bridge or runtime.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use stageroom_core::{
    AuthToken, JoinConfig, Peer, PeerId, Role, RoleName, SessionStore, StoreError, StoreReader,
    StoreSubscriptions,
};

/// One action call made against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    /// `get_auth_token_by_room_code`
    GetAuthToken {
        /// Room code exchanged.
        room_code: String,
    },
    /// `join`
    Join {
        /// Display name sent.
        user_name: String,
        /// Whether audio was requested muted.
        is_audio_muted: bool,
    },
    /// `leave`
    Leave,
    /// `set_local_audio_enabled`
    SetLocalAudioEnabled {
        /// Requested flag.
        enabled: bool,
    },
    /// `change_role_of_peer`
    ChangeRoleOfPeer {
        /// Target peer.
        peer_id: PeerId,
        /// Requested role.
        role: RoleName,
        /// Whether the change skips the target's consent.
        force: bool,
    },
}

/// Shared, append-only log of store calls.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<StoreCall>>>,
}

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<StoreCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, call: StoreCall) {
        self.lock().push(call);
    }

    /// Every call so far, in order.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().clone()
    }

    /// Number of calls matching a predicate.
    pub fn count(&self, predicate: impl Fn(&StoreCall) -> bool) -> usize {
        self.lock().iter().filter(|c| predicate(c)).count()
    }

    /// Number of `join` calls.
    pub fn joins(&self) -> usize {
        self.count(|c| matches!(c, StoreCall::Join { .. }))
    }

    /// Number of token exchanges.
    pub fn token_requests(&self) -> usize {
        self.count(|c| matches!(c, StoreCall::GetAuthToken { .. }))
    }

    /// Number of `leave` calls.
    pub fn leaves(&self) -> usize {
        self.count(|c| matches!(c, StoreCall::Leave))
    }

    /// Number of `set_local_audio_enabled` calls.
    pub fn audio_calls(&self) -> usize {
        self.count(|c| matches!(c, StoreCall::SetLocalAudioEnabled { .. }))
    }

    /// Number of `change_role_of_peer` calls.
    pub fn role_calls(&self) -> usize {
        self.count(|c| matches!(c, StoreCall::ChangeRoleOfPeer { .. }))
    }

    /// Forget every recorded call.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

/// Store wrapper that records every action call.
#[derive(Debug)]
pub struct RecordingStore<S> {
    inner: S,
    log: CallLog,
}

impl<S: SessionStore> RecordingStore<S> {
    /// Wrap a store with a fresh log.
    pub fn new(inner: S) -> Self {
        Self { inner, log: CallLog::new() }
    }

    /// Shared handle to the call log.
    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    /// The wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: SessionStore> StoreReader for RecordingStore<S> {
    fn is_connected(&self) -> bool {
        self.inner.is_connected()
    }

    fn peers(&self) -> Vec<Peer> {
        self.inner.peers()
    }

    fn is_local_audio_enabled(&self) -> bool {
        self.inner.is_local_audio_enabled()
    }

    fn local_role(&self) -> Option<Role> {
        self.inner.local_role()
    }
}

impl<S: SessionStore> SessionStore for RecordingStore<S> {
    fn subscribe(&self) -> StoreSubscriptions {
        self.inner.subscribe()
    }

    async fn get_auth_token_by_room_code(
        &mut self,
        room_code: &str,
    ) -> Result<AuthToken, StoreError> {
        self.log.push(StoreCall::GetAuthToken { room_code: room_code.to_string() });
        self.inner.get_auth_token_by_room_code(room_code).await
    }

    async fn join(&mut self, config: JoinConfig) -> Result<(), StoreError> {
        self.log.push(StoreCall::Join {
            user_name: config.user_name.clone(),
            is_audio_muted: config.settings.is_audio_muted,
        });
        self.inner.join(config).await
    }

    fn leave(&mut self) {
        self.log.push(StoreCall::Leave);
        self.inner.leave();
    }

    fn set_local_audio_enabled(&mut self, enabled: bool) -> Result<(), StoreError> {
        self.log.push(StoreCall::SetLocalAudioEnabled { enabled });
        self.inner.set_local_audio_enabled(enabled)
    }

    fn change_role_of_peer(
        &mut self,
        peer_id: &PeerId,
        role: &RoleName,
        force: bool,
    ) -> Result<(), StoreError> {
        self.log.push(StoreCall::ChangeRoleOfPeer {
            peer_id: peer_id.clone(),
            role: role.clone(),
            force,
        });
        self.inner.change_role_of_peer(peer_id, role, force)
    }
}
