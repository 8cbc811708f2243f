//! Application state machine.
//!
//! This module defines the [`App`] state machine, which manages the
//! presentation state of the client completely decoupled from I/O and from
//! the session store's mechanics.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//! Store state is read through a [`StoreReader`] passed with each event, so
//! every decision sees the store as it is at that moment.
//!
//! # Responsibilities
//!
//! - Switches between the join form and the room view.
//! - Rebuilds the roster on every peer-list notification.
//! - Runs every control action through the [`crate::PermissionGate`].
//! - Tracks the join and self-mute button states.

use stageroom_core::StoreReader;

use crate::{
    ActionKind, AppAction, AppEvent, AvatarService, ClientConfig, ControlTarget, JoinButton,
    PermissionGate, RosterEntry, ViewState, roster,
};

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct App {
    /// View mode and button state.
    view: ViewState,
    /// Rendered roster, replaced wholesale on each peer-list notification.
    roster: Vec<RosterEntry>,
    /// Avatar URL source.
    avatars: AvatarService,
    /// Control action dispatch table.
    gate: PermissionGate,
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(&ClientConfig::default())
    }
}

impl App {
    /// Create a new App showing the join form.
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            view: ViewState::default(),
            roster: Vec::new(),
            avatars: config.avatars.clone(),
            gate: PermissionGate::standard(),
            status_message: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent, store: &dyn StoreReader) -> Vec<AppAction> {
        match event {
            AppEvent::SubmitJoin { user_name, role } => self.submit_join(user_name, role),
            AppEvent::JoinFailed { reason } => {
                tracing::warn!(%reason, "join failed");
                self.view.join_button = JoinButton::Idle;
                vec![AppAction::Render]
            },
            AppEvent::ConnectionChanged { connected } => {
                self.view.on_connection_changed(connected, store.local_role().as_ref());
                vec![AppAction::Render]
            },
            AppEvent::PeersChanged { peers } => {
                let peers = peers.unwrap_or_else(|| store.peers());
                self.roster = roster::render(&peers, &self.avatars, store.is_local_audio_enabled());
                vec![AppAction::Render]
            },
            AppEvent::LocalAudioChanged { enabled } => {
                self.set_audio_enabled(enabled);
                vec![AppAction::Render]
            },
            AppEvent::AudioButtonClicked => {
                let Some(local) = store.peers().into_iter().find(|p| p.is_local) else {
                    tracing::debug!("audio button clicked outside a room");
                    return vec![];
                };
                let target = ControlTarget { peer_id: local.id, is_local: true };
                self.control(ActionKind::ToggleMute, &target, store)
            },
            AppEvent::RosterAction { peer_id, kind } => {
                let Some(entry) = self.roster.iter().find(|e| e.peer_id == peer_id) else {
                    tracing::debug!(%peer_id, "action on a peer no longer in the roster");
                    return vec![];
                };
                let target = ControlTarget { peer_id, is_local: entry.is_local };
                self.control(kind, &target, store)
            },
            AppEvent::LeaveClicked => {
                tracing::info!("leaving room");
                self.view.join_button = JoinButton::Idle;
                vec![AppAction::Leave, AppAction::Render]
            },
            AppEvent::Unload => {
                self.view.join_button = JoinButton::Idle;
                vec![AppAction::Leave, AppAction::Quit]
            },
            AppEvent::StoreRejected { reason } => {
                tracing::warn!(%reason, "store rejected action");
                self.status_message = Some(format!("Rejected: {reason}"));
                vec![AppAction::Render]
            },
            AppEvent::Resize => vec![AppAction::Render],
        }
    }

    /// Validate the join form and start joining.
    fn submit_join(&mut self, user_name: String, role: String) -> Vec<AppAction> {
        if user_name.trim().is_empty() {
            return vec![];
        }
        if self.view.join_button == JoinButton::Loading {
            tracing::debug!("join already in flight");
            return vec![];
        }

        self.view.join_button = JoinButton::Loading;
        self.status_message = None;
        vec![AppAction::Render, AppAction::Join { user_name, role }]
    }

    /// Run a control action through the gate.
    fn control(
        &mut self,
        kind: ActionKind,
        target: &ControlTarget,
        store: &dyn StoreReader,
    ) -> Vec<AppAction> {
        match self.gate.dispatch(kind, target, store) {
            Ok(action) => {
                if let AppAction::SetLocalAudioEnabled { enabled } = action {
                    // Optimistic; the next audio notification is authoritative
                    self.view.audio_button.audio_enabled = enabled;
                    if let Some(entry) = self.roster.iter_mut().find(|e| e.peer_id == target.peer_id)
                    {
                        entry.menu.mute_label = self.view.audio_button.label();
                    }
                }
                tracing::debug!(?kind, peer_id = %target.peer_id, "action forwarded");
                vec![action, AppAction::Render]
            },
            Err(denial) => {
                tracing::info!(?kind, peer_id = %target.peer_id, %denial, "action denied");
                vec![AppAction::Alert { message: denial.to_string() }]
            },
        }
    }

    fn set_audio_enabled(&mut self, enabled: bool) {
        self.view.audio_button.audio_enabled = enabled;
        let label = self.view.audio_button.label();
        for entry in &mut self.roster {
            entry.menu.mute_label = label;
        }
    }

    /// View mode and button state.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Rendered roster in store order.
    pub fn roster(&self) -> &[RosterEntry] {
        &self.roster
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}
