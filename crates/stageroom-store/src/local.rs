//! Reactive wrapper around [`RoomState`].

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use stageroom_core::{
    AuthToken, JoinConfig, Peer, PeerId, Role, RoleName, SessionStore, StoreError, StoreReader,
    StoreSubscriptions,
};
use tokio::sync::watch;

use crate::{LocalStoreConfig, RoleChangeRequest, RoomState};

/// State shared between the store and its room handles.
#[derive(Debug)]
struct Shared {
    state: Mutex<RoomState>,
    connection: watch::Sender<bool>,
    peers: watch::Sender<Vec<Peer>>,
    local_audio: watch::Sender<bool>,
    latency: Duration,
}

impl Shared {
    fn state(&self) -> MutexGuard<'_, RoomState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run a mutation and publish whichever selectors changed.
    fn mutate<T>(&self, f: impl FnOnce(&mut RoomState) -> T) -> T {
        let mut state = self.state();
        let result = f(&mut state);
        self.publish(&state);
        result
    }

    fn publish(&self, state: &RoomState) {
        replace_if_changed(&self.connection, state.is_connected());
        replace_if_changed(&self.peers, state.visible_peers());
        replace_if_changed(&self.local_audio, state.local_audio_enabled());
    }
}

/// Notify receivers only when the value actually changes.
fn replace_if_changed<T: PartialEq>(sender: &watch::Sender<T>, value: T) {
    sender.send_if_modified(|current| {
        if *current == value {
            false
        } else {
            *current = value;
            true
        }
    });
}

/// In-process session store.
///
/// Cloning is not supported; use [`LocalStore::handle`] to act on the room
/// from elsewhere.
#[derive(Debug)]
pub struct LocalStore {
    shared: Arc<Shared>,
}

impl LocalStore {
    /// Create a store over an empty room.
    pub fn new(config: LocalStoreConfig) -> Self {
        let state = RoomState::new(config.roles, config.room_codes);
        let (connection, _) = watch::channel(state.is_connected());
        let (peers, _) = watch::channel(state.visible_peers());
        let (local_audio, _) = watch::channel(state.local_audio_enabled());

        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                connection,
                peers,
                local_audio,
                latency: config.latency,
            }),
        }
    }

    /// Handle for driving the rest of the room.
    pub fn handle(&self) -> RoomHandle {
        RoomHandle { shared: Arc::clone(&self.shared) }
    }

    async fn simulate_latency(&self) {
        if !self.shared.latency.is_zero() {
            tokio::time::sleep(self.shared.latency).await;
        }
    }
}

impl StoreReader for LocalStore {
    fn is_connected(&self) -> bool {
        self.shared.state().is_connected()
    }

    fn peers(&self) -> Vec<Peer> {
        self.shared.state().visible_peers()
    }

    fn is_local_audio_enabled(&self) -> bool {
        self.shared.state().local_audio_enabled()
    }

    fn local_role(&self) -> Option<Role> {
        self.shared.state().local_role()
    }
}

impl SessionStore for LocalStore {
    fn subscribe(&self) -> StoreSubscriptions {
        StoreSubscriptions {
            connection: self.shared.connection.subscribe(),
            peers: self.shared.peers.subscribe(),
            local_audio: self.shared.local_audio.subscribe(),
        }
    }

    async fn get_auth_token_by_room_code(
        &mut self,
        room_code: &str,
    ) -> Result<AuthToken, StoreError> {
        self.simulate_latency().await;
        let token = self.shared.state().issue_token(room_code);
        if token.is_err() {
            tracing::debug!("room code rejected");
        }
        token
    }

    async fn join(&mut self, config: JoinConfig) -> Result<(), StoreError> {
        self.simulate_latency().await;
        let peer_id = self.shared.mutate(|state| state.join(&config))?;
        tracing::info!(%peer_id, user_name = %config.user_name, "peer joined");
        Ok(())
    }

    fn leave(&mut self) {
        if self.shared.mutate(RoomState::leave) {
            tracing::info!("local peer left");
        }
    }

    fn set_local_audio_enabled(&mut self, enabled: bool) -> Result<(), StoreError> {
        self.shared.mutate(|state| state.set_local_audio(enabled))?;
        tracing::debug!(enabled, "local audio set");
        Ok(())
    }

    fn change_role_of_peer(
        &mut self,
        peer_id: &PeerId,
        role: &RoleName,
        force: bool,
    ) -> Result<(), StoreError> {
        self.shared.mutate(|state| state.change_role(peer_id, role, force))?;
        tracing::debug!(%peer_id, %role, force, "role change accepted");
        Ok(())
    }
}

/// Handle for acting on the room as the other participants and the server
/// would.
#[derive(Debug, Clone)]
pub struct RoomHandle {
    shared: Arc<Shared>,
}

impl RoomHandle {
    /// Add a remote participant. Returns its id.
    pub fn add_peer(&self, name: impl Into<String>, role: RoleName) -> PeerId {
        let name = name.into();
        let peer_id = self.shared.mutate(|state| state.add_remote(name.clone(), role));
        tracing::debug!(%peer_id, %name, "remote peer added");
        peer_id
    }

    /// Remove a participant. Removing the local peer disconnects it.
    pub fn remove_peer(&self, peer_id: &PeerId) -> bool {
        self.shared.mutate(|state| state.remove(peer_id))
    }

    /// Change any participant's role.
    ///
    /// # Errors
    ///
    /// - `StoreError::PeerNotFound` if the peer is not in the room
    /// - `StoreError::UnknownRole` if the role is not in the room's table
    pub fn assign_role(&self, peer_id: &PeerId, role: &RoleName) -> Result<(), StoreError> {
        self.shared.mutate(|state| state.assign_role(peer_id, role))
    }

    /// Drop the local peer's connection.
    pub fn disconnect(&self) {
        if self.shared.mutate(RoomState::leave) {
            tracing::warn!("local peer disconnected by room");
        }
    }

    /// Every member, including those hidden from a disconnected client.
    pub fn members(&self) -> Vec<Peer> {
        self.shared.state().members().to_vec()
    }

    /// Role change requests awaiting consent.
    pub fn pending_role_requests(&self) -> Vec<RoleChangeRequest> {
        self.shared.state().pending_requests().to_vec()
    }
}

/// The local client's view of the room, read through the handle.
impl StoreReader for RoomHandle {
    fn is_connected(&self) -> bool {
        self.shared.state().is_connected()
    }

    fn peers(&self) -> Vec<Peer> {
        self.shared.state().visible_peers()
    }

    fn is_local_audio_enabled(&self) -> bool {
        self.shared.state().local_audio_enabled()
    }

    fn local_role(&self) -> Option<Role> {
        self.shared.state().local_role()
    }
}
