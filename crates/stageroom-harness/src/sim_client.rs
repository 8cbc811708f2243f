//! Step-wise client for deterministic tests.
//!
//! [`SimClient`] owns an [`App`] and a [`Bridge`] and runs them the way
//! [`stageroom_app::Runtime`] does, but one event at a time: each
//! [`SimClient::dispatch`] executes the resulting actions and then drains
//! every store notification, leaving the client quiescent so invariants can
//! be checked between steps.

use stageroom_app::{App, AppAction, AppEvent, Bridge, ClientConfig, ViewMode};
use stageroom_core::{RoleName, SessionStore, StoreSubscriptions};

use crate::ClientSnapshot;

/// App + Bridge stepped by hand.
pub struct SimClient<S: SessionStore> {
    app: App,
    bridge: Bridge<S>,
    subscriptions: StoreSubscriptions,
    alerts: Vec<String>,
    quit: bool,
    role_at_connect: Option<RoleName>,
}

impl<S: SessionStore> SimClient<S> {
    /// Create a client over a store.
    pub fn new(store: S, config: &ClientConfig) -> Self {
        let bridge = Bridge::new(store, config.room_codes.clone());
        let subscriptions = bridge.subscribe();
        Self {
            app: App::new(config),
            bridge,
            subscriptions,
            alerts: Vec::new(),
            quit: false,
            role_at_connect: None,
        }
    }

    /// Feed one event, execute its actions and drain store notifications.
    pub async fn dispatch(&mut self, event: AppEvent) {
        self.apply(event).await;
        self.settle().await;
    }

    /// Apply every store notification not yet delivered to the App.
    pub async fn settle(&mut self) {
        while let Some(event) = self.next_notification() {
            self.apply(event).await;
        }
    }

    fn next_notification(&mut self) -> Option<AppEvent> {
        let subs = &mut self.subscriptions;
        if subs.connection.has_changed().unwrap_or(false) {
            let connected = *subs.connection.borrow_and_update();
            return Some(AppEvent::ConnectionChanged { connected });
        }
        if subs.peers.has_changed().unwrap_or(false) {
            let peers = subs.peers.borrow_and_update().clone();
            return Some(AppEvent::PeersChanged { peers: Some(peers) });
        }
        if subs.local_audio.has_changed().unwrap_or(false) {
            let enabled = *subs.local_audio.borrow_and_update();
            return Some(AppEvent::LocalAudioChanged { enabled });
        }
        None
    }

    async fn apply(&mut self, event: AppEvent) {
        let entering_room = matches!(event, AppEvent::ConnectionChanged { connected: true });
        let mut pending = self.app.handle(event, self.bridge.reader());
        if entering_room && self.app.view().mode == ViewMode::Room {
            // A listener sighting on any connect notification sticks for the session
            let role = self.bridge.reader().local_role().map(|r| r.name);
            if self.role_at_connect.is_none() || role == Some(RoleName::Listener) {
                self.role_at_connect = role;
            }
        }

        while !pending.is_empty() {
            for action in std::mem::take(&mut pending) {
                match action {
                    AppAction::Render => {},
                    AppAction::Quit => self.quit = true,
                    AppAction::Alert { message } => self.alerts.push(message),
                    AppAction::Join { .. }
                    | AppAction::Leave
                    | AppAction::SetLocalAudioEnabled { .. }
                    | AppAction::ChangeRoleOfPeer { .. } => {
                        for event in self.bridge.process_app_action(action).await {
                            pending.extend(self.app.handle(event, self.bridge.reader()));
                        }
                    },
                }
            }
        }

        if self.app.view().mode == ViewMode::JoinForm {
            self.role_at_connect = None;
        }
    }

    /// Capture App and store state for invariant checks.
    pub fn snapshot(&self) -> ClientSnapshot {
        ClientSnapshot::capture(&self.app, self.bridge.reader())
            .with_role_at_connect(self.role_at_connect.clone())
    }

    /// The App.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// The wrapped store.
    pub fn store(&self) -> &S {
        self.bridge.store()
    }

    /// Alerts shown so far.
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Whether the App asked to quit.
    pub fn has_quit(&self) -> bool {
        self.quit
    }
}
