//! Store-to-Application translation layer.
//!
//! The [`Bridge`] wraps a [`SessionStore`] and adapts it to the application
//! lifecycle.
//!
//! # Responsibilities
//!
//! - Converts store-bound [`crate::AppAction`]s into store calls, including
//!   the token exchange that precedes a join.
//! - Interprets store results and converts failures back into
//!   [`crate::AppEvent`]s for the App.
//! - Hands out the store's subscriptions and a read-only view of its state.

use stageroom_core::{
    JoinConfig, JoinSettings, SessionStore, StoreError, StoreReader, StoreSubscriptions,
};
use thiserror::Error;

use crate::{AppAction, AppEvent, RoomCodes, TokenError, acquire_token};

/// Errors from the join sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JoinError {
    /// Token acquisition failed
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Store refused the join
    #[error("join failed: {0}")]
    Join(StoreError),
}

/// Bridge between App and the session store.
pub struct Bridge<S: SessionStore> {
    store: S,
    room_codes: RoomCodes,
}

impl<S: SessionStore> Bridge<S> {
    /// Create a new Bridge over a store.
    pub fn new(store: S, room_codes: RoomCodes) -> Self {
        Self { store, room_codes }
    }

    /// Read-only view of the store for the App.
    pub fn reader(&self) -> &dyn StoreReader {
        &self.store
    }

    /// The wrapped store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Subscribe to the store's selectors.
    pub fn subscribe(&self) -> StoreSubscriptions {
        self.store.subscribe()
    }

    /// Process an App action and return resulting App events.
    pub async fn process_app_action(&mut self, action: AppAction) -> Vec<AppEvent> {
        match action {
            AppAction::Join { user_name, role } => match self.join(user_name, &role).await {
                Ok(()) => vec![],
                Err(e) => {
                    tracing::warn!(error = %e, "token API error");
                    vec![AppEvent::JoinFailed { reason: e.to_string() }]
                },
            },
            AppAction::Leave => {
                self.store.leave();
                vec![]
            },
            AppAction::SetLocalAudioEnabled { enabled } => {
                let result = self.store.set_local_audio_enabled(enabled);
                Self::handle_store_result(result)
            },
            AppAction::ChangeRoleOfPeer { peer_id, role, force } => {
                let result = self.store.change_role_of_peer(&peer_id, &role, force);
                Self::handle_store_result(result)
            },
            AppAction::Render | AppAction::Quit | AppAction::Alert { .. } => vec![],
        }
    }

    /// Exchange the role's room code for a token and join with audio muted.
    async fn join(&mut self, user_name: String, role: &str) -> Result<(), JoinError> {
        let auth_token = acquire_token(&mut self.store, &self.room_codes, role).await?;
        let config = JoinConfig {
            user_name,
            auth_token,
            settings: JoinSettings { is_audio_muted: true },
        };
        self.store.join(config).await.map_err(JoinError::Join)?;
        tracing::info!(%role, "joined room");
        Ok(())
    }

    fn handle_store_result(result: Result<(), StoreError>) -> Vec<AppEvent> {
        match result {
            Ok(()) => vec![],
            Err(e) => vec![AppEvent::StoreRejected { reason: e.to_string() }],
        }
    }
}
