//! Connection view controller.
//!
//! Applies connection-state notifications to [`ViewState`]. Every transition
//! is a set from the authoritative flag, never a toggle: delivering the same
//! notification twice, or notifications out of order, always leaves exactly
//! one view visible and the listener restriction in place.

use stageroom_core::Role;

use crate::{JoinButton, ViewMode, ViewState};

impl ViewState {
    /// Apply a connection-state change.
    ///
    /// `role` is the local role read from the store at call time.
    pub fn on_connection_changed(&mut self, connected: bool, role: Option<&Role>) {
        if connected {
            tracing::debug!(role = ?role.map(|r| &r.name), "connected");
            if role.is_some_and(Role::is_listener) {
                self.audio_button.hidden = true;
            }
            self.mode = ViewMode::Room;
        } else {
            tracing::debug!("disconnected");
            // Restrictions last for one session
            self.audio_button.hidden = false;
            self.join_button = JoinButton::Idle;
            self.mode = ViewMode::JoinForm;
        }
    }
}
