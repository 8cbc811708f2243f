//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold
//! once pending notifications are applied. They verify WHAT must be true,
//! not specific test scenarios.

use stageroom_app::{AudioButton, ViewMode};
use stageroom_core::RoleName;

use super::{ClientSnapshot, Invariant, InvariantResult, Violation};

/// Exactly one view is shown, and it is the one the connection implies.
pub struct ViewMatchesConnection;

impl Invariant for ViewMatchesConnection {
    fn name(&self) -> &'static str {
        "view_matches_connection"
    }

    fn check(&self, state: &ClientSnapshot) -> InvariantResult {
        let in_room = state.view.mode == ViewMode::Room;
        if in_room != state.store.connected {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "view {:?} while store connected = {}",
                    state.view.mode, state.store.connected
                ),
            });
        }
        Ok(())
    }
}

/// The roster has one row per store peer, in store order, labelled from the
/// peer's current name and role.
pub struct RosterMatchesStore;

impl Invariant for RosterMatchesStore {
    fn name(&self) -> &'static str {
        "roster_matches_store"
    }

    fn check(&self, state: &ClientSnapshot) -> InvariantResult {
        let peers = &state.store.peers;
        if state.roster.len() != peers.len() {
            return Err(Violation {
                invariant: self.name(),
                message: format!("{} rows for {} peers", state.roster.len(), peers.len()),
            });
        }

        for (row, peer) in state.roster.iter().zip(peers) {
            let you = if peer.is_local { " (You)" } else { "" };
            let expected = format!("{}{you} - {}", peer.name, peer.role_name);
            if row.peer_id != peer.id || row.is_local != peer.is_local || row.label != expected {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!(
                        "row {} {:?} does not match peer {} {expected:?}",
                        row.peer_id, row.label, peer.id
                    ),
                });
            }
        }
        Ok(())
    }
}

/// The local row has no action menu exactly when the local peer is a
/// listener. Every other row keeps its menu.
pub struct LocalMenuHiddenForListener;

impl Invariant for LocalMenuHiddenForListener {
    fn name(&self) -> &'static str {
        "local_menu_hidden_for_listener"
    }

    fn check(&self, state: &ClientSnapshot) -> InvariantResult {
        for (row, peer) in state.roster.iter().zip(&state.store.peers) {
            let expected = !(row.is_local && peer.role_name == RoleName::Listener);
            if row.menu.visible != expected {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!(
                        "row {} ({}) menu visible = {}",
                        row.peer_id, peer.role_name, row.menu.visible
                    ),
                });
            }
        }
        Ok(())
    }
}

/// The mute control is hidden for a session that connected as a listener,
/// and never hidden on the join form.
///
/// The restriction is applied when the connection is established; a later
/// role change does not re-evaluate it. Snapshots without a recorded
/// connection role only get the join-form half of the check.
pub struct ListenerMuteHidden;

impl Invariant for ListenerMuteHidden {
    fn name(&self) -> &'static str {
        "listener_mute_hidden"
    }

    fn check(&self, state: &ClientSnapshot) -> InvariantResult {
        let hidden = state.view.audio_button.hidden;
        let expected = match (state.view.mode, &state.role_at_connect) {
            (ViewMode::JoinForm, _) => false,
            (ViewMode::Room, Some(role)) => *role == RoleName::Listener,
            (ViewMode::Room, None) => return Ok(()),
        };

        if hidden != expected {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "mute hidden = {hidden} in {:?} (connected as {:?})",
                    state.view.mode, state.role_at_connect
                ),
            });
        }
        Ok(())
    }
}

/// Every mute label reflects the store's local audio flag.
pub struct AudioLabelsMatchStore;

impl Invariant for AudioLabelsMatchStore {
    fn name(&self) -> &'static str {
        "audio_labels_match_store"
    }

    fn check(&self, state: &ClientSnapshot) -> InvariantResult {
        let expected = AudioButton::label_for(state.store.audio_enabled);

        if state.view.audio_button.label() != expected {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "button says {:?} but store audio enabled = {}",
                    state.view.audio_button.label(),
                    state.store.audio_enabled
                ),
            });
        }
        if let Some(row) = state.roster.iter().find(|r| r.menu.mute_label != expected) {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "row {} says {:?}, expected {expected:?}",
                    row.peer_id, row.menu.mute_label
                ),
            });
        }
        Ok(())
    }
}
