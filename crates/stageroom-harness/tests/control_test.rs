//! Join, view-sync and permission-gate behavior against the in-process store.
//!
//! # Test Strategy
//!
//! Each test drives the client the way a user would (form submit, button,
//! roster menu) through [`SimClient`], with every store action recorded.
//! Tests end with oracle checks on:
//! - the exact store calls made (count and arguments)
//! - alerts shown to the user
//! - view, button and roster state after notifications settle

use stageroom_app::{ActionKind, AppEvent, ClientConfig, JoinButton, RoomCodes, ViewMode};
use stageroom_core::{Peer, PeerId, Permissions, RoleCapabilityTable, RoleName, StoreReader};
use stageroom_harness::{CallLog, InvariantRegistry, RecordingStore, SimClient, StoreCall};
use stageroom_store::{LocalStore, LocalStoreConfig, RoomHandle};

type Client = SimClient<RecordingStore<LocalStore>>;

fn client_config() -> ClientConfig {
    ClientConfig::new(RoomCodes::new("lst-code", "spk-code", "mod-code"))
}

fn store_config() -> LocalStoreConfig {
    LocalStoreConfig::default()
        .with_room_code("lst-code", RoleName::Listener)
        .with_room_code("spk-code", RoleName::Speaker)
        .with_room_code("mod-code", RoleName::Moderator)
}

fn client_with(store_config: LocalStoreConfig) -> (Client, CallLog, RoomHandle) {
    let store = LocalStore::new(store_config);
    let room = store.handle();
    let store = RecordingStore::new(store);
    let log = store.log();
    (SimClient::new(store, &client_config()), log, room)
}

fn submit(user_name: &str, role: &str) -> AppEvent {
    AppEvent::SubmitJoin { user_name: user_name.into(), role: role.into() }
}

/// Join as `role` with one remote speaker ("bob") already in the room.
async fn joined_as(role: &str) -> (Client, CallLog, RoomHandle, PeerId) {
    let (mut client, log, room) = client_with(store_config());
    let bob = room.add_peer("bob", RoleName::Speaker);
    client.dispatch(submit("alice", role)).await;
    log.clear();
    (client, log, room, bob)
}

fn local_id(client: &Client) -> PeerId {
    client
        .store()
        .peers()
        .into_iter()
        .find(|p| p.is_local)
        .map(|p| p.id)
        .unwrap()
}

fn row_action(peer_id: &PeerId, kind: ActionKind) -> AppEvent {
    AppEvent::RosterAction { peer_id: peer_id.clone(), kind }
}

#[tokio::test]
async fn join_calls_store_once_with_audio_muted() {
    for role in ["listener", "speaker", "moderator"] {
        let (mut client, log, _room) = client_with(store_config());

        client.dispatch(submit("alice", role)).await;

        assert_eq!(log.joins(), 1, "role {role}");
        assert!(log.calls().contains(&StoreCall::Join {
            user_name: "alice".into(),
            is_audio_muted: true
        }));
        assert_eq!(client.app().view().mode, ViewMode::Room);
        InvariantRegistry::standard().assert_all(&client.snapshot(), role);
    }
}

#[tokio::test]
async fn role_is_case_insensitive() {
    let (mut client, log, _room) = client_with(store_config());

    client.dispatch(submit("alice", " Moderator ")).await;

    assert_eq!(log.calls()[0], StoreCall::GetAuthToken { room_code: "mod-code".into() });
    assert_eq!(client.store().local_role().map(|r| r.name), Some(RoleName::Moderator));
}

#[tokio::test]
async fn empty_username_makes_no_calls() {
    let (mut client, log, _room) = client_with(store_config());

    client.dispatch(submit("", "speaker")).await;
    client.dispatch(submit("   ", "speaker")).await;

    assert!(log.calls().is_empty());
    assert_eq!(client.app().view().mode, ViewMode::JoinForm);
    assert_eq!(client.app().view().join_button, JoinButton::Idle);
}

#[tokio::test]
async fn failed_token_exchange_resets_join_label() {
    // Client knows a speaker code the store does not
    let store_config = LocalStoreConfig::default().with_room_code("lst-code", RoleName::Listener);
    let (mut client, log, _room) = client_with(store_config);

    client.dispatch(submit("alice", "speaker")).await;

    assert_eq!(log.token_requests(), 1);
    assert_eq!(log.joins(), 0);
    assert_eq!(client.app().view().join_button, JoinButton::Idle);
    assert_eq!(client.app().view().mode, ViewMode::JoinForm);
    assert!(client.alerts().is_empty());
}

#[tokio::test]
async fn unknown_role_never_reaches_the_store() {
    let (mut client, log, _room) = client_with(store_config());

    client.dispatch(submit("alice", "host")).await;

    assert!(log.calls().is_empty());
    assert_eq!(client.app().view().join_button, JoinButton::Idle);
}

#[tokio::test]
async fn listener_mute_control_stays_hidden() {
    let (mut client, _log, _room, _bob) = joined_as("listener").await;
    assert!(client.app().view().audio_button.hidden);

    client.dispatch(AppEvent::ConnectionChanged { connected: true }).await;

    assert!(client.app().view().audio_button.hidden);
    assert_eq!(client.app().view().mode, ViewMode::Room);
}

#[tokio::test]
async fn speaker_mute_control_is_visible() {
    let (client, _log, _room, _bob) = joined_as("speaker").await;
    assert!(!client.app().view().audio_button.hidden);
    assert_eq!(client.app().view().audio_button.label(), "Unmute");
}

#[tokio::test]
async fn roster_is_replaced_on_every_notification() {
    let (mut client, _log, room, _bob) = joined_as("speaker").await;
    assert_eq!(client.app().roster().len(), 2);

    room.add_peer("carol", RoleName::Listener);
    client.settle().await;
    let labels: Vec<_> = client.app().roster().iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, ["bob - speaker", "alice (You) - speaker", "carol - listener"]);

    let only = vec![Peer::remote("p9", "dave", RoleName::Moderator)];
    client.dispatch(AppEvent::PeersChanged { peers: Some(only) }).await;
    let labels: Vec<_> = client.app().roster().iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, ["dave - moderator"]);
}

#[tokio::test]
async fn manual_refresh_reads_store() {
    let (mut client, _log, _room, _bob) = joined_as("speaker").await;

    client.dispatch(AppEvent::PeersChanged { peers: None }).await;

    assert_eq!(client.app().roster().len(), 2);
    InvariantRegistry::standard().assert_all(&client.snapshot(), "after manual refresh");
}

#[tokio::test]
async fn listener_mute_is_denied() {
    let (mut client, log, _room, bob) = joined_as("listener").await;

    client.dispatch(AppEvent::AudioButtonClicked).await;
    client.dispatch(row_action(&bob, ActionKind::ToggleMute)).await;

    assert_eq!(log.audio_calls(), 0);
    assert_eq!(client.alerts(), [
        "You do not have the permission to mute/unmute!",
        "You do not have the permission to mute/unmute!",
    ]);
}

#[tokio::test]
async fn speaker_cannot_mute_remote_peer() {
    let (mut client, log, _room, bob) = joined_as("speaker").await;

    client.dispatch(row_action(&bob, ActionKind::ToggleMute)).await;

    assert_eq!(log.audio_calls(), 0);
    assert_eq!(client.alerts(), ["You do not have the permission to mute/unmute other peers!"]);
}

#[tokio::test]
async fn speaker_self_mute_inverts_audio() {
    let (mut client, log, _room, _bob) = joined_as("speaker").await;
    let me = local_id(&client);

    client.dispatch(row_action(&me, ActionKind::ToggleMute)).await;

    assert_eq!(log.calls(), [StoreCall::SetLocalAudioEnabled { enabled: true }]);
    assert!(client.store().is_local_audio_enabled());
    assert_eq!(client.app().view().audio_button.label(), "Mute");
    assert!(client.alerts().is_empty());

    client.dispatch(AppEvent::AudioButtonClicked).await;

    assert_eq!(log.audio_calls(), 2);
    assert!(!client.store().is_local_audio_enabled());
    assert!(client.app().roster().iter().all(|e| e.menu.mute_label == "Unmute"));
}

#[tokio::test]
async fn role_change_without_permission_is_denied() {
    let (mut client, log, _room, bob) = joined_as("speaker").await;

    client.dispatch(row_action(&bob, ActionKind::MakeListener)).await;

    assert_eq!(log.role_calls(), 0);
    assert_eq!(client.alerts(), ["You do not have the permission to change role!"]);
}

#[tokio::test]
async fn moderator_role_change_is_forced() {
    let (mut client, log, _room, bob) = joined_as("moderator").await;

    client.dispatch(row_action(&bob, ActionKind::MakeListener)).await;

    assert_eq!(log.calls(), [StoreCall::ChangeRoleOfPeer {
        peer_id: bob.clone(),
        role: RoleName::Listener,
        force: true
    }]);
    let bob_row = client.app().roster().iter().find(|e| e.peer_id == bob).map(|e| e.label.clone());
    assert_eq!(bob_row.as_deref(), Some("bob - listener"));
}

#[tokio::test]
async fn self_demotion_restricts_local_row() {
    let (mut client, _log, _room, _bob) = joined_as("moderator").await;
    let me = local_id(&client);

    client.dispatch(row_action(&me, ActionKind::MakeListener)).await;

    let row = client.app().roster().iter().find(|e| e.is_local).cloned().unwrap();
    assert!(!row.menu.visible);
    // Mute control restriction is applied at connection time only
    assert!(!client.app().view().audio_button.hidden);
    InvariantRegistry::standard().assert_all(&client.snapshot(), "after self demotion");
}

#[tokio::test]
async fn store_rejection_is_reported_on_status_line() {
    let mut roles = RoleCapabilityTable::empty();
    roles.insert(RoleName::Listener, Permissions::NONE);
    roles.insert(RoleName::Moderator, Permissions::ALL);
    let store_config = LocalStoreConfig { roles, ..store_config() };
    let (mut client, log, room) = client_with(store_config);
    let bob = room.add_peer("bob", RoleName::Listener);
    client.dispatch(submit("alice", "moderator")).await;

    client.dispatch(row_action(&bob, ActionKind::MakeSpeaker)).await;

    assert_eq!(log.role_calls(), 1);
    assert!(client.alerts().is_empty());
    assert!(client.app().status_message().is_some_and(|m| m.starts_with("Rejected: ")));
}

#[tokio::test]
async fn leaving_calls_store_once() {
    let (mut client, log, _room, _bob) = joined_as("speaker").await;

    client.dispatch(AppEvent::LeaveClicked).await;

    assert_eq!(log.leaves(), 1);
    assert_eq!(client.app().view().mode, ViewMode::JoinForm);
    assert_eq!(client.app().view().join_button, JoinButton::Idle);
    assert!(client.app().roster().is_empty());
    assert!(!client.has_quit());
}

#[tokio::test]
async fn unload_leaves_and_quits() {
    let (mut client, log, _room, _bob) = joined_as("listener").await;

    client.dispatch(AppEvent::Unload).await;

    assert_eq!(log.leaves(), 1);
    assert!(client.has_quit());
    assert!(!client.store().is_connected());
}

#[tokio::test]
async fn remote_disconnect_returns_to_join_form() {
    let (mut client, _log, room, _bob) = joined_as("listener").await;

    room.disconnect();
    client.settle().await;

    assert_eq!(client.app().view().mode, ViewMode::JoinForm);
    assert!(!client.app().view().audio_button.hidden);
    assert!(client.app().roster().is_empty());
    InvariantRegistry::standard().assert_all(&client.snapshot(), "after disconnect");
}

#[tokio::test]
async fn actions_outside_a_room_are_dropped() {
    let (mut client, log, room) = client_with(store_config());
    let bob = room.add_peer("bob", RoleName::Speaker);

    client.dispatch(AppEvent::AudioButtonClicked).await;
    client.dispatch(row_action(&bob, ActionKind::MakeSpeaker)).await;

    assert!(log.calls().is_empty());
    assert!(client.alerts().is_empty());
}
