//! Room state and policy.
//!
//! [`RoomState`] is the authoritative state behind [`crate::LocalStore`]. It
//! is a plain state machine with no channels or locks; the store wraps it and
//! publishes the derived selectors after every mutation.
//!
//! The room re-validates everything a client forwards. A client-side check
//! that passes here is not a guarantee: role changes are authorized against
//! the room's capability table, not the client's.

use std::collections::BTreeMap;

use stageroom_core::{
    AuthToken, JoinConfig, Peer, PeerId, Permissions, Role, RoleCapabilityTable, RoleName,
    StoreError,
};

/// A role change that was requested without `force` and awaits the target's
/// consent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleChangeRequest {
    /// Peer asked to change role.
    pub peer_id: PeerId,
    /// Requested role.
    pub role: RoleName,
}

/// Authoritative room state.
#[derive(Debug, Clone)]
pub struct RoomState {
    /// Capability table used for every permission decision.
    roles: RoleCapabilityTable,
    /// Room code → role it grants.
    room_codes: BTreeMap<String, RoleName>,
    /// Issued token → role it grants.
    issued_tokens: BTreeMap<String, RoleName>,
    /// Members in join order, including the local peer while connected.
    members: Vec<Peer>,
    /// Local peer. `None` while not connected.
    local_peer: Option<PeerId>,
    /// Whether the local audio track is enabled.
    local_audio: bool,
    /// Non-forced role change requests.
    pending_requests: Vec<RoleChangeRequest>,
    /// Next peer id suffix.
    next_peer: u64,
}

impl RoomState {
    /// Create an empty room.
    pub fn new(roles: RoleCapabilityTable, room_codes: BTreeMap<String, RoleName>) -> Self {
        Self {
            roles,
            room_codes,
            issued_tokens: BTreeMap::new(),
            members: Vec::new(),
            local_peer: None,
            local_audio: false,
            pending_requests: Vec::new(),
            next_peer: 1,
        }
    }

    /// Exchange a room code for a fresh token.
    pub fn issue_token(&mut self, room_code: &str) -> Result<AuthToken, StoreError> {
        let role = self.room_codes.get(room_code).cloned().ok_or(StoreError::UnknownRoomCode)?;
        let token = format!("tok-{:016x}", rand::random::<u64>());
        self.issued_tokens.insert(token.clone(), role);
        Ok(AuthToken::new(token))
    }

    /// Join as the local peer. Returns the local peer's id.
    pub fn join(&mut self, config: &JoinConfig) -> Result<PeerId, StoreError> {
        if self.local_peer.is_some() {
            return Err(StoreError::AlreadyJoined);
        }
        let role = self
            .issued_tokens
            .get(config.auth_token.as_str())
            .cloned()
            .ok_or(StoreError::InvalidToken)?;

        let id = self.allocate_id();
        self.members.push(Peer::local(id.clone(), config.user_name.clone(), role));
        self.local_peer = Some(id.clone());
        self.local_audio = !config.settings.is_audio_muted && self.local_permissions().publish_audio;
        Ok(id)
    }

    /// Leave the room. Returns `false` if not connected.
    pub fn leave(&mut self) -> bool {
        let Some(id) = self.local_peer.take() else {
            return false;
        };
        self.members.retain(|p| p.id != id);
        self.local_audio = false;
        true
    }

    /// Enable or disable local audio.
    pub fn set_local_audio(&mut self, enabled: bool) -> Result<(), StoreError> {
        let role = self.local_role().ok_or(StoreError::NotConnected)?;
        if enabled && !role.permissions.publish_audio {
            return Err(StoreError::Rejected {
                reason: format!("role {} may not publish audio", role.name),
            });
        }
        self.local_audio = enabled;
        Ok(())
    }

    /// Change a peer's role on behalf of the local peer.
    pub fn change_role(
        &mut self,
        peer_id: &PeerId,
        role: &RoleName,
        force: bool,
    ) -> Result<(), StoreError> {
        let actor = self.local_role().ok_or(StoreError::NotConnected)?;
        if !actor.permissions.change_role {
            return Err(StoreError::Rejected {
                reason: format!("role {} may not change roles", actor.name),
            });
        }
        self.validate_assignment(peer_id, role)?;

        if force {
            self.apply_role(peer_id, role);
        } else {
            self.pending_requests
                .push(RoleChangeRequest { peer_id: peer_id.clone(), role: role.clone() });
        }
        Ok(())
    }

    /// Change a peer's role without an actor check, as another participant
    /// with the permission would.
    pub fn assign_role(&mut self, peer_id: &PeerId, role: &RoleName) -> Result<(), StoreError> {
        self.validate_assignment(peer_id, role)?;
        self.apply_role(peer_id, role);
        Ok(())
    }

    /// Add a remote participant.
    pub fn add_remote(&mut self, name: impl Into<String>, role: RoleName) -> PeerId {
        let id = self.allocate_id();
        self.members.push(Peer::remote(id.clone(), name, role));
        id
    }

    /// Remove a participant. Removing the local peer leaves the room.
    pub fn remove(&mut self, peer_id: &PeerId) -> bool {
        if self.local_peer.as_ref() == Some(peer_id) {
            return self.leave();
        }
        let before = self.members.len();
        self.members.retain(|p| &p.id != peer_id);
        self.members.len() != before
    }

    /// Whether the local peer is in the room.
    pub fn is_connected(&self) -> bool {
        self.local_peer.is_some()
    }

    /// Peers visible to the local client. Empty while not connected.
    pub fn visible_peers(&self) -> Vec<Peer> {
        if self.is_connected() { self.members.clone() } else { Vec::new() }
    }

    /// Every member, connected or not.
    pub fn members(&self) -> &[Peer] {
        &self.members
    }

    /// Whether local audio is enabled.
    pub fn local_audio_enabled(&self) -> bool {
        self.local_audio
    }

    /// Local peer's role. Roles outside the table resolve with no
    /// permissions.
    pub fn local_role(&self) -> Option<Role> {
        let id = self.local_peer.as_ref()?;
        let peer = self.members.iter().find(|p| &p.id == id)?;
        let permissions = self.roles.permissions(&peer.role_name).unwrap_or(Permissions::NONE);
        Some(Role::new(peer.role_name.clone(), permissions))
    }

    /// Role change requests awaiting consent.
    pub fn pending_requests(&self) -> &[RoleChangeRequest] {
        &self.pending_requests
    }

    fn local_permissions(&self) -> Permissions {
        self.local_role().map_or(Permissions::NONE, |r| r.permissions)
    }

    fn validate_assignment(&self, peer_id: &PeerId, role: &RoleName) -> Result<(), StoreError> {
        if !self.members.iter().any(|p| &p.id == peer_id) {
            return Err(StoreError::PeerNotFound(peer_id.clone()));
        }
        if !self.roles.contains(role) {
            return Err(StoreError::UnknownRole(role.clone()));
        }
        Ok(())
    }

    fn apply_role(&mut self, peer_id: &PeerId, role: &RoleName) {
        if let Some(peer) = self.members.iter_mut().find(|p| &p.id == peer_id) {
            peer.role_name = role.clone();
        }
        self.pending_requests.retain(|r| &r.peer_id != peer_id);

        if self.local_peer.as_ref() == Some(peer_id) && !self.local_permissions().publish_audio {
            self.local_audio = false;
        }
    }

    fn allocate_id(&mut self) -> PeerId {
        let id = PeerId::new(format!("peer-{}", self.next_peer));
        self.next_peer += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use stageroom_core::JoinSettings;

    use super::*;

    fn room() -> RoomState {
        let codes = [("lst", RoleName::Listener), ("spk", RoleName::Speaker), ("mod", RoleName::Moderator)]
            .into_iter()
            .map(|(code, role)| (code.to_string(), role))
            .collect();
        RoomState::new(RoleCapabilityTable::standard(), codes)
    }

    fn join_as(room: &mut RoomState, code: &str, muted: bool) -> PeerId {
        let auth_token = room.issue_token(code).expect("known code");
        let config = JoinConfig {
            user_name: "alice".into(),
            auth_token,
            settings: JoinSettings { is_audio_muted: muted },
        };
        room.join(&config).expect("join")
    }

    #[test]
    fn unknown_room_code_is_rejected() {
        assert_eq!(room().issue_token("nope"), Err(StoreError::UnknownRoomCode));
    }

    #[test]
    fn forged_token_is_rejected() {
        let mut room = room();
        let config = JoinConfig {
            user_name: "alice".into(),
            auth_token: AuthToken::new("tok-forged"),
            settings: JoinSettings { is_audio_muted: true },
        };
        assert_eq!(room.join(&config), Err(StoreError::InvalidToken));
        assert!(!room.is_connected());
    }

    #[test]
    fn join_twice_is_rejected() {
        let mut room = room();
        join_as(&mut room, "spk", true);
        let auth_token = room.issue_token("spk").expect("known code");
        let config = JoinConfig {
            user_name: "again".into(),
            auth_token,
            settings: JoinSettings { is_audio_muted: true },
        };
        assert_eq!(room.join(&config), Err(StoreError::AlreadyJoined));
    }

    #[test]
    fn peers_are_hidden_until_connected() {
        let mut room = room();
        room.add_remote("bob", RoleName::Speaker);
        assert!(room.visible_peers().is_empty());

        join_as(&mut room, "lst", true);
        assert_eq!(room.visible_peers().len(), 2);

        assert!(room.leave());
        assert!(room.visible_peers().is_empty());
        assert!(!room.leave(), "leave is idempotent");
    }

    #[test]
    fn listener_cannot_enable_audio() {
        let mut room = room();
        join_as(&mut room, "lst", false);

        assert!(!room.local_audio_enabled(), "listener joins muted regardless of settings");
        assert!(matches!(room.set_local_audio(true), Err(StoreError::Rejected { .. })));
        assert_eq!(room.set_local_audio(false), Ok(()));
    }

    #[test]
    fn speaker_cannot_change_roles() {
        let mut room = room();
        join_as(&mut room, "spk", true);
        let bob = room.add_remote("bob", RoleName::Listener);

        let result = room.change_role(&bob, &RoleName::Speaker, true);
        assert!(matches!(result, Err(StoreError::Rejected { .. })));
    }

    #[test]
    fn moderator_forced_change_applies() {
        let mut room = room();
        join_as(&mut room, "mod", true);
        let bob = room.add_remote("bob", RoleName::Listener);

        assert_eq!(room.change_role(&bob, &RoleName::Speaker, true), Ok(()));
        let bob_role = room.members().iter().find(|p| p.id == bob).map(|p| p.role_name.clone());
        assert_eq!(bob_role, Some(RoleName::Speaker));
    }

    #[test]
    fn unforced_change_waits_for_consent() {
        let mut room = room();
        join_as(&mut room, "mod", true);
        let bob = room.add_remote("bob", RoleName::Listener);

        assert_eq!(room.change_role(&bob, &RoleName::Speaker, false), Ok(()));
        assert_eq!(room.pending_requests().len(), 1);

        room.assign_role(&bob, &RoleName::Speaker).expect("assign");
        assert!(room.pending_requests().is_empty());
    }

    #[test]
    fn demoting_self_to_listener_mutes() {
        let mut room = room();
        let me = join_as(&mut room, "mod", false);
        assert!(room.local_audio_enabled());

        room.change_role(&me, &RoleName::Listener, true).expect("demote");
        assert!(!room.local_audio_enabled());
        assert_eq!(room.local_role().map(|r| r.name), Some(RoleName::Listener));
    }

    #[test]
    fn unknown_target_and_role_are_rejected() {
        let mut room = room();
        join_as(&mut room, "mod", true);
        let bob = room.add_remote("bob", RoleName::Listener);

        assert_eq!(
            room.change_role(&PeerId::new("ghost"), &RoleName::Speaker, true),
            Err(StoreError::PeerNotFound(PeerId::new("ghost")))
        );
        let host = RoleName::Other("host".into());
        assert_eq!(room.change_role(&bob, &host, true), Err(StoreError::UnknownRole(host.clone())));
    }

    #[test]
    fn removing_local_peer_leaves() {
        let mut room = room();
        let me = join_as(&mut room, "spk", true);
        assert!(room.remove(&me));
        assert!(!room.is_connected());
    }
}
