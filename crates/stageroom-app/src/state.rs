//! Observable presentation state.
//!
//! These structures are the "View Model" for the client: which view is
//! showing and what the two stateful buttons display. None of it is
//! authoritative. Every field is set from store state as notifications
//! arrive, so there is no local copy to drift out of sync.

/// Which top-level view is visible. Exactly one is shown at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Join form (username + role).
    #[default]
    JoinForm,
    /// Room view (controls + roster).
    Room,
}

/// Join button state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JoinButton {
    /// Ready to submit.
    #[default]
    Idle,
    /// Token exchange or join in flight.
    Loading,
}

impl JoinButton {
    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Join",
            Self::Loading => "Loading...",
        }
    }
}

/// Button background color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonColor {
    /// Audio is live; pressing mutes.
    Red,
    /// Audio is muted; pressing unmutes.
    Green,
}

/// Self-mute button. Label and color are derived from one flag, so they
/// always change together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AudioButton {
    /// Whether local audio is enabled.
    pub audio_enabled: bool,
    /// Hidden for listeners for the rest of the session.
    pub hidden: bool,
}

impl AudioButton {
    /// Label for an audio state. Shared with the roster's mute item.
    pub fn label_for(audio_enabled: bool) -> &'static str {
        if audio_enabled { "Mute" } else { "Unmute" }
    }

    /// Button label.
    pub fn label(self) -> &'static str {
        Self::label_for(self.audio_enabled)
    }

    /// Button color.
    pub fn color(self) -> ButtonColor {
        if self.audio_enabled { ButtonColor::Red } else { ButtonColor::Green }
    }
}

/// Visibility and button state of the whole client chrome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Visible view.
    pub mode: ViewMode,
    /// Join button.
    pub join_button: JoinButton,
    /// Self-mute button.
    pub audio_button: AudioButton,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_button_label_and_color_move_together() {
        let muted = AudioButton { audio_enabled: false, hidden: false };
        assert_eq!((muted.label(), muted.color()), ("Unmute", ButtonColor::Green));

        let live = AudioButton { audio_enabled: true, hidden: false };
        assert_eq!((live.label(), live.color()), ("Mute", ButtonColor::Red));
    }

    #[test]
    fn join_button_labels() {
        assert_eq!(JoinButton::Idle.label(), "Join");
        assert_eq!(JoinButton::Loading.label(), "Loading...");
    }
}
