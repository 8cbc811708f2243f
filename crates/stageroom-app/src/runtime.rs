//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: UI state machine
//! - [`Bridge`]: Store bridge executing forwarded actions
//! - [`Driver`]: Platform-specific I/O
//!
//! Store subscriptions are polled ahead of user input, so a notification
//! produced by one user action is applied before the next action is read.

use stageroom_core::{SessionStore, StoreSubscriptions};

use crate::{App, AppAction, AppEvent, Bridge, ClientConfig, Driver};

/// Generic runtime that orchestrates App, Bridge, and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `S`: Session store
pub struct Runtime<D, S>
where
    D: Driver,
    S: SessionStore,
{
    driver: D,
    app: App,
    bridge: Bridge<S>,
}

impl<D, S> Runtime<D, S>
where
    D: Driver,
    S: SessionStore,
{
    /// Create a new runtime with the given driver, store and configuration.
    pub fn new(driver: D, store: S, config: &ClientConfig) -> Self {
        let app = App::new(config);
        let bridge = Bridge::new(store, config.room_codes.clone());
        Self { driver, app, bridge }
    }

    /// Run the main event loop until the App quits.
    ///
    /// Each cycle:
    /// 1. Waits for a store notification or user input
    /// 2. Feeds the resulting events to the App
    /// 3. Executes the App's actions, routing store-bound ones through the
    ///    Bridge and feeding any resulting events back to the App
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        let result = self.event_loop().await;
        self.driver.stop();
        result
    }

    async fn event_loop(&mut self) -> Result<(), D::Error> {
        let mut subscriptions = self.bridge.subscribe();
        self.driver.render(&self.app)?;

        loop {
            let events = self.next_events(&mut subscriptions).await?;
            if self.process_events(events).await? {
                return Ok(());
            }
        }
    }

    /// Wait for the next store notification or batch of user input.
    async fn next_events(
        &mut self,
        subscriptions: &mut StoreSubscriptions,
    ) -> Result<Vec<AppEvent>, D::Error> {
        tokio::select! {
            biased;

            changed = subscriptions.connection.changed() => Ok(match changed {
                Ok(()) => {
                    let connected = *subscriptions.connection.borrow_and_update();
                    vec![AppEvent::ConnectionChanged { connected }]
                },
                Err(_) => Self::store_closed(),
            }),

            changed = subscriptions.peers.changed() => Ok(match changed {
                Ok(()) => {
                    let peers = subscriptions.peers.borrow_and_update().clone();
                    vec![AppEvent::PeersChanged { peers: Some(peers) }]
                },
                Err(_) => Self::store_closed(),
            }),

            changed = subscriptions.local_audio.changed() => Ok(match changed {
                Ok(()) => {
                    let enabled = *subscriptions.local_audio.borrow_and_update();
                    vec![AppEvent::LocalAudioChanged { enabled }]
                },
                Err(_) => Self::store_closed(),
            }),

            events = self.driver.poll_events(&self.app) => events,
        }
    }

    fn store_closed() -> Vec<AppEvent> {
        tracing::warn!("session store closed its subscriptions");
        vec![AppEvent::Unload]
    }

    /// Feed events to the App and execute the resulting actions.
    ///
    /// Returns `true` if the application should quit.
    async fn process_events(&mut self, events: Vec<AppEvent>) -> Result<bool, D::Error> {
        for event in events {
            let actions = self.app.handle(event, self.bridge.reader());
            if self.process_actions(actions).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Process actions returned by the App.
    ///
    /// Returns `true` if should quit.
    async fn process_actions(&mut self, initial_actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.driver.render(&self.app)?,
                    AppAction::Quit => return Ok(true),
                    AppAction::Alert { message } => self.driver.alert(&self.app, &message)?,

                    // Store operations go through the bridge
                    AppAction::Join { .. }
                    | AppAction::Leave
                    | AppAction::SetLocalAudioEnabled { .. }
                    | AppAction::ChangeRoleOfPeer { .. } => {
                        let events = self.bridge.process_app_action(action).await;
                        for event in events {
                            let new_actions = self.app.handle(event, self.bridge.reader());
                            pending_actions.extend(new_actions);
                        }
                    },
                }
            }
        }
        Ok(false)
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a reference to the Bridge
    pub fn bridge(&self) -> &Bridge<S> {
        &self.bridge
    }
}
