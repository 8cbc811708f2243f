//! Roster renderer.
//!
//! Turns a peer-list snapshot into display rows. Every call rebuilds the
//! whole roster from the snapshot it is given; nothing from a previous
//! render survives, so a row can never outlive the peer it describes.
//!
//! Rendering is permission-agnostic. Every visible menu offers all three
//! actions; [`crate::PermissionGate`] decides at dispatch time.

use stageroom_core::{Peer, PeerId, RoleName};

use crate::{ActionKind, AudioButton};

/// Derives avatar image URLs from peer names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarService {
    base_url: String,
}

impl Default for AvatarService {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL)
    }
}

impl AvatarService {
    /// Default avatar endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "https://source.boringavatars.com/marble/120";

    /// Create a service rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// Avatar URL for a name. Equal names share an avatar.
    pub fn url_for(&self, name: &str) -> String {
        format!("{}/{name}", self.base_url)
    }
}

/// Per-row action menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionMenu {
    /// Whether the menu is shown at all.
    pub visible: bool,
    /// Label of the mute/unmute item.
    pub mute_label: &'static str,
}

impl ActionMenu {
    /// Items in display order with their labels.
    pub fn items(&self) -> [(ActionKind, &'static str); 3] {
        [
            (ActionKind::ToggleMute, self.mute_label),
            (ActionKind::MakeSpeaker, "Make speaker"),
            (ActionKind::MakeListener, "Make listener"),
        ]
    }
}

/// One rendered roster row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    /// Peer the row describes.
    pub peer_id: PeerId,
    /// Whether the row is the local peer.
    pub is_local: bool,
    /// Avatar image URL.
    pub avatar_url: String,
    /// `"<name>[ (You)] - <role>"`.
    pub label: String,
    /// Action menu.
    pub menu: ActionMenu,
}

/// Render the full roster for a peer-list snapshot.
///
/// `audio_enabled` seeds the mute item labels.
pub fn render(peers: &[Peer], avatars: &AvatarService, audio_enabled: bool) -> Vec<RosterEntry> {
    peers.iter().map(|peer| render_entry(peer, avatars, audio_enabled)).collect()
}

fn render_entry(peer: &Peer, avatars: &AvatarService, audio_enabled: bool) -> RosterEntry {
    let you = if peer.is_local { " (You)" } else { "" };
    let label = format!("{}{you} - {}", peer.name, peer.role_name);

    // Listeners get no self-actions
    let visible = !(peer.is_local && peer.role_name == RoleName::Listener);

    RosterEntry {
        peer_id: peer.id.clone(),
        is_local: peer.is_local,
        avatar_url: avatars.url_for(&peer.name),
        label,
        menu: ActionMenu { visible, mute_label: AudioButton::label_for(audio_enabled) },
    }
}
