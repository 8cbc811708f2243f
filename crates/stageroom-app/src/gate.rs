//! Action permission gate.
//!
//! A dispatch table keyed by [`ActionKind`]. Each rule pairs a precondition
//! over the local role with the store call the action forwards to. The local
//! role is read from the store on every dispatch and never cached, so a role
//! change mid-session takes effect on the next click.
//!
//! The checks are advisory: they fail fast before a store round trip. The
//! store re-validates and may still refuse.
//!
//! | Action | Allowed when |
//! |---|---|
//! | [`ActionKind::ToggleMute`] | not a listener; speakers only on themselves |
//! | [`ActionKind::MakeSpeaker`] | role has `change_role` |
//! | [`ActionKind::MakeListener`] | role has `change_role` |

use std::fmt;

use stageroom_core::{PeerId, Role, RoleName, StoreReader};
use thiserror::Error;

use crate::AppAction;

/// Control actions a user can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Invert the local audio-enabled flag.
    ToggleMute,
    /// Make the target a speaker.
    MakeSpeaker,
    /// Make the target a listener.
    MakeListener,
}

impl ActionKind {
    /// All actions in menu order.
    pub const ALL: [Self; 3] = [Self::ToggleMute, Self::MakeSpeaker, Self::MakeListener];
}

/// Peer an action was triggered on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlTarget {
    /// Target peer.
    pub peer_id: PeerId,
    /// Whether the target is the local peer.
    pub is_local: bool,
}

/// Why the gate refused an action. Display text is shown to the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// Listeners cannot touch audio
    #[error("You do not have the permission to mute/unmute!")]
    ListenerCannotMute,

    /// Speakers can only mute/unmute themselves
    #[error("You do not have the permission to mute/unmute other peers!")]
    CannotMuteOthers,

    /// Role lacks `change_role`
    #[error("You do not have the permission to change role!")]
    CannotChangeRole,

    /// No local role to check against
    #[error("You are not connected to a room!")]
    NotInRoom,
}

type Precondition = fn(&Role, &ControlTarget) -> Result<(), Denial>;
type Forward = fn(&ControlTarget, &dyn StoreReader) -> AppAction;

#[derive(Clone, Copy)]
struct Rule {
    precondition: Precondition,
    forward: Forward,
}

/// Dispatch table validating control actions before they reach the store.
#[derive(Clone)]
pub struct PermissionGate {
    toggle_mute: Rule,
    make_speaker: Rule,
    make_listener: Rule,
}

impl fmt::Debug for PermissionGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(ActionKind::ALL).finish()
    }
}

impl Default for PermissionGate {
    fn default() -> Self {
        Self::standard()
    }
}

impl PermissionGate {
    /// Gate with the mute, promote and demote rules.
    pub fn standard() -> Self {
        Self {
            toggle_mute: Rule { precondition: may_toggle_mute, forward: forward_toggle_mute },
            make_speaker: Rule {
                precondition: may_change_role,
                forward: |target, _| change_role(target, RoleName::Speaker),
            },
            make_listener: Rule {
                precondition: may_change_role,
                forward: |target, _| change_role(target, RoleName::Listener),
            },
        }
    }

    /// Validate an action against the store's current local role and return
    /// the store call it forwards to.
    pub fn dispatch(
        &self,
        kind: ActionKind,
        target: &ControlTarget,
        store: &dyn StoreReader,
    ) -> Result<AppAction, Denial> {
        let rule = self.rule(kind);
        let role = store.local_role().ok_or(Denial::NotInRoom)?;
        (rule.precondition)(&role, target)?;
        Ok((rule.forward)(target, store))
    }

    fn rule(&self, kind: ActionKind) -> &Rule {
        match kind {
            ActionKind::ToggleMute => &self.toggle_mute,
            ActionKind::MakeSpeaker => &self.make_speaker,
            ActionKind::MakeListener => &self.make_listener,
        }
    }
}

fn may_toggle_mute(role: &Role, target: &ControlTarget) -> Result<(), Denial> {
    if role.is_listener() {
        return Err(Denial::ListenerCannotMute);
    }
    if role.is_speaker() && !target.is_local {
        return Err(Denial::CannotMuteOthers);
    }
    Ok(())
}

fn may_change_role(role: &Role, _target: &ControlTarget) -> Result<(), Denial> {
    if role.permissions.change_role { Ok(()) } else { Err(Denial::CannotChangeRole) }
}

fn forward_toggle_mute(_target: &ControlTarget, store: &dyn StoreReader) -> AppAction {
    AppAction::SetLocalAudioEnabled { enabled: !store.is_local_audio_enabled() }
}

fn change_role(target: &ControlTarget, role: RoleName) -> AppAction {
    AppAction::ChangeRoleOfPeer { peer_id: target.peer_id.clone(), role, force: true }
}
