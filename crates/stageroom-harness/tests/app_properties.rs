//! Property-based tests for the client against the in-process store.
//!
//! Arbitrary interleavings of user input and room activity (peers joining
//! and leaving, remote role changes, dropped connections) must leave the
//! client agreeing with the store after every step.

use proptest::prelude::*;
use stageroom_app::{ActionKind, AppEvent, ClientConfig, RoomCodes};
use stageroom_core::{PeerId, RoleName, StoreReader};
use stageroom_harness::{InvariantRegistry, RecordingStore, SimClient};
use stageroom_store::{LocalStore, LocalStoreConfig, RoomHandle};

#[derive(Debug, Clone)]
enum Step {
    Submit { name: &'static str, role: &'static str },
    AudioButton,
    RowAction { index: usize, kind: ActionKind },
    Leave,
    Refresh,
    AddPeer(RoleName),
    RemovePeer(usize),
    AssignRole { index: usize, role: RoleName },
    Disconnect,
}

fn role_strategy() -> impl Strategy<Value = RoleName> {
    prop_oneof![Just(RoleName::Listener), Just(RoleName::Speaker), Just(RoleName::Moderator)]
}

fn kind_strategy() -> impl Strategy<Value = ActionKind> {
    prop_oneof![
        Just(ActionKind::ToggleMute),
        Just(ActionKind::MakeSpeaker),
        Just(ActionKind::MakeListener),
    ]
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => (
            prop_oneof![Just("alice"), Just(""), Just("  ")],
            prop_oneof![Just("listener"), Just("speaker"), Just("moderator"), Just("host")],
        )
            .prop_map(|(name, role)| Step::Submit { name, role }),
        2 => Just(Step::AudioButton),
        4 => (0usize..5, kind_strategy()).prop_map(|(index, kind)| Step::RowAction { index, kind }),
        1 => Just(Step::Leave),
        1 => Just(Step::Refresh),
        2 => role_strategy().prop_map(Step::AddPeer),
        1 => (0usize..5).prop_map(Step::RemovePeer),
        2 => (0usize..5, role_strategy()).prop_map(|(index, role)| Step::AssignRole { index, role }),
        1 => Just(Step::Disconnect),
    ]
}

fn member(room: &RoomHandle, index: usize) -> Option<PeerId> {
    room.members().get(index).map(|p| p.id.clone())
}

async fn run(client: &mut SimClient<RecordingStore<LocalStore>>, room: &RoomHandle, step: Step) {
    match step {
        Step::Submit { name, role } => {
            client
                .dispatch(AppEvent::SubmitJoin { user_name: name.into(), role: role.into() })
                .await;
        },
        Step::AudioButton => client.dispatch(AppEvent::AudioButtonClicked).await,
        Step::RowAction { index, kind } => {
            let peer_id = client.app().roster().get(index).map(|e| e.peer_id.clone());
            if let Some(peer_id) = peer_id {
                client.dispatch(AppEvent::RosterAction { peer_id, kind }).await;
            }
        },
        Step::Leave => client.dispatch(AppEvent::LeaveClicked).await,
        Step::Refresh => client.dispatch(AppEvent::PeersChanged { peers: None }).await,
        Step::AddPeer(role) => {
            room.add_peer("remote", role);
            client.settle().await;
        },
        Step::RemovePeer(index) => {
            if let Some(id) = member(room, index) {
                room.remove_peer(&id);
            }
            client.settle().await;
        },
        Step::AssignRole { index, role } => {
            if let Some(id) = member(room, index) {
                let _ = room.assign_role(&id, &role);
            }
            client.settle().await;
        },
        Step::Disconnect => {
            room.disconnect();
            client.settle().await;
        },
    }
}

fn setup() -> (SimClient<RecordingStore<LocalStore>>, RoomHandle) {
    let store = LocalStore::new(
        LocalStoreConfig::default()
            .with_room_code("lst-code", RoleName::Listener)
            .with_room_code("spk-code", RoleName::Speaker)
            .with_room_code("mod-code", RoleName::Moderator),
    );
    let room = store.handle();
    let config = ClientConfig::new(RoomCodes::new("lst-code", "spk-code", "mod-code"));
    (SimClient::new(RecordingStore::new(store), &config), room)
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread().build().unwrap()
}

proptest! {
    #[test]
    fn prop_client_agrees_with_store(steps in prop::collection::vec(step_strategy(), 0..40)) {
        let invariants = InvariantRegistry::standard();
        let (mut client, room) = setup();

        runtime().block_on(async {
            for (i, step) in steps.into_iter().enumerate() {
                let context = format!("after step {i}: {step:?}");
                run(&mut client, &room, step).await;
                invariants.assert_all(&client.snapshot(), &context);
            }
        });
    }

    #[test]
    fn prop_denials_never_reach_the_store(steps in prop::collection::vec(step_strategy(), 0..40)) {
        let (mut client, room) = setup();

        runtime().block_on(async {
            for step in steps {
                let log = client.store().log();
                log.clear();
                let alerts_before = client.alerts().len();

                run(&mut client, &room, step).await;

                let alerted = client.alerts().len() > alerts_before;
                if alerted {
                    assert_eq!(log.audio_calls() + log.role_calls(), 0, "denied action reached the store");
                }
            }
        });
    }

    #[test]
    fn prop_at_most_one_join_per_session(steps in prop::collection::vec(step_strategy(), 0..40)) {
        let (mut client, room) = setup();
        let log = client.store().log();

        runtime().block_on(async {
            for step in steps {
                let was_connected = client.store().is_connected();
                let joins_before = log.joins();
                run(&mut client, &room, step).await;
                if was_connected {
                    assert_eq!(log.joins(), joins_before, "join issued while connected");
                }
            }
        });
    }
}
