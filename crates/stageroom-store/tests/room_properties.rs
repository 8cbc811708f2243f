//! Property-based tests for the room state.
//!
//! Arbitrary sequences of joins, leaves, audio toggles and role changes must
//! never leave the room in a state a client could observe as inconsistent.

use stageroom_core::{JoinConfig, JoinSettings, PeerId, RoleCapabilityTable, RoleName};
use stageroom_store::RoomState;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Join { code: &'static str, muted: bool },
    Leave,
    SetAudio(bool),
    AddRemote(RoleName),
    ChangeRole { target: usize, role: RoleName, force: bool },
    AssignRole { target: usize, role: RoleName },
    Remove(usize),
}

fn role_strategy() -> impl Strategy<Value = RoleName> {
    prop_oneof![
        Just(RoleName::Listener),
        Just(RoleName::Speaker),
        Just(RoleName::Moderator),
        Just(RoleName::Other("host".into())),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        2 => (prop_oneof![Just("lst"), Just("spk"), Just("mod"), Just("bad")], any::<bool>())
            .prop_map(|(code, muted)| Op::Join { code, muted }),
        1 => Just(Op::Leave),
        2 => any::<bool>().prop_map(Op::SetAudio),
        2 => role_strategy().prop_map(Op::AddRemote),
        2 => (0usize..6, role_strategy(), any::<bool>())
            .prop_map(|(target, role, force)| Op::ChangeRole { target, role, force }),
        1 => (0usize..6, role_strategy()).prop_map(|(target, role)| Op::AssignRole { target, role }),
        1 => (0usize..6).prop_map(Op::Remove),
    ]
}

fn room() -> RoomState {
    let codes = [("lst", RoleName::Listener), ("spk", RoleName::Speaker), ("mod", RoleName::Moderator)]
        .into_iter()
        .map(|(code, role)| (code.to_string(), role))
        .collect();
    RoomState::new(RoleCapabilityTable::standard(), codes)
}

fn target(room: &RoomState, index: usize) -> PeerId {
    room.members()
        .get(index)
        .map_or_else(|| PeerId::new("ghost"), |p| p.id.clone())
}

fn apply(room: &mut RoomState, op: Op) {
    match op {
        Op::Join { code, muted } => {
            if let Ok(auth_token) = room.issue_token(code) {
                let config = JoinConfig {
                    user_name: "local".into(),
                    auth_token,
                    settings: JoinSettings { is_audio_muted: muted },
                };
                let _ = room.join(&config);
            }
        },
        Op::Leave => {
            let _ = room.leave();
        },
        Op::SetAudio(enabled) => {
            let _ = room.set_local_audio(enabled);
        },
        Op::AddRemote(role) => {
            let _ = room.add_remote("remote", role);
        },
        Op::ChangeRole { target: index, role, force } => {
            let id = target(room, index);
            let _ = room.change_role(&id, &role, force);
        },
        Op::AssignRole { target: index, role } => {
            let id = target(room, index);
            let _ = room.assign_role(&id, &role);
        },
        Op::Remove(index) => {
            let id = target(room, index);
            let _ = room.remove(&id);
        },
    }
}

proptest! {
    #[test]
    fn prop_room_stays_consistent(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut room = room();

        for op in ops {
            apply(&mut room, op);

            let locals = room.members().iter().filter(|p| p.is_local).count();
            prop_assert_eq!(locals, usize::from(room.is_connected()));

            if room.is_connected() {
                prop_assert_eq!(room.visible_peers().len(), room.members().len());
            } else {
                prop_assert!(room.visible_peers().is_empty());
                prop_assert!(!room.local_audio_enabled());
                prop_assert!(room.local_role().is_none());
            }

            if let Some(role) = room.local_role() {
                if !role.permissions.publish_audio {
                    prop_assert!(!room.local_audio_enabled());
                }
            }

            let mut ids: Vec<_> = room.members().iter().map(|p| p.id.clone()).collect();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), room.members().len());
        }
    }
}
