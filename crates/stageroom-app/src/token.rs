//! Token acquisition.
//!
//! Maps the role picked in the join form to its pre-provisioned room code and
//! exchanges the code with the store for a session credential.

use std::collections::BTreeMap;

use stageroom_core::{AuthToken, RoleName, SessionStore, StoreError};
use thiserror::Error;

/// Errors from [`acquire_token`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Role is not one of the built-in roles
    #[error("unknown role: {0:?}")]
    UnknownRole(String),

    /// No room code configured for the role
    #[error("no room code configured for role {0}")]
    MissingRoomCode(RoleName),

    /// Store refused the exchange
    #[error("token exchange failed: {0}")]
    Exchange(#[from] StoreError),
}

/// Room codes, one per built-in role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomCodes {
    codes: BTreeMap<RoleName, String>,
}

impl RoomCodes {
    /// Codes for the listener, speaker and moderator roles.
    pub fn new(
        listener: impl Into<String>,
        speaker: impl Into<String>,
        moderator: impl Into<String>,
    ) -> Self {
        Self::default()
            .with_code(RoleName::Listener, listener)
            .with_code(RoleName::Speaker, speaker)
            .with_code(RoleName::Moderator, moderator)
    }

    /// Set the code for one role. Empty codes are treated as unset.
    #[must_use]
    pub fn with_code(mut self, role: RoleName, code: impl Into<String>) -> Self {
        let code = code.into();
        if code.is_empty() {
            self.codes.remove(&role);
        } else {
            self.codes.insert(role, code);
        }
        self
    }

    /// Code for a role. `None` if none is configured.
    pub fn code_for(&self, role: &RoleName) -> Option<&str> {
        self.codes.get(role).map(String::as_str)
    }

    /// Resolve a role as entered by the user (case-insensitive).
    pub fn resolve(&self, role: &str) -> Result<(RoleName, &str), TokenError> {
        let name: RoleName = role.into();
        if !name.is_builtin() {
            return Err(TokenError::UnknownRole(role.to_string()));
        }
        let code = self.code_for(&name).ok_or_else(|| TokenError::MissingRoomCode(name.clone()))?;
        Ok((name, code))
    }
}

/// Acquire a session credential for `role`.
pub async fn acquire_token<S: SessionStore>(
    store: &mut S,
    codes: &RoomCodes,
    role: &str,
) -> Result<AuthToken, TokenError> {
    let (name, code) = codes.resolve(role)?;
    tracing::debug!(role = %name, "exchanging room code");
    Ok(store.get_auth_token_by_room_code(code).await?)
}
