//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering.

use std::io::{self, Stdout, stdout};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use stageroom_app::{App, AppEvent, Driver};
use thiserror::Error;

use crate::{InputState, KeyInput, ui};

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Terminal input stream ended.
    #[error("terminal input closed")]
    InputClosed,
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Owns the terminal, its event stream and the [`InputState`] for form
/// editing, roster selection and alerts.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    input_state: InputState,
    restored: bool,
}

impl TerminalDriver {
    /// Take over the terminal: raw mode and the alternate screen.
    pub fn new() -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let event_stream = EventStream::new();

        Ok(Self { terminal, event_stream, input_state: InputState::new(), restored: false })
    }

    /// Convert a crossterm key event to `KeyInput`.
    fn convert_key(key: KeyEvent) -> Option<KeyInput> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(KeyInput::Interrupt);
        }
        match key.code {
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Delete => Some(KeyInput::Delete),
            KeyCode::Tab => Some(KeyInput::Tab),
            KeyCode::Esc => Some(KeyInput::Esc),
            KeyCode::Left => Some(KeyInput::Left),
            KeyCode::Right => Some(KeyInput::Right),
            KeyCode::Up => Some(KeyInput::Up),
            KeyCode::Down => Some(KeyInput::Down),
            KeyCode::Home => Some(KeyInput::Home),
            KeyCode::End => Some(KeyInput::End),
            _ => None,
        }
    }

    fn draw(&mut self, app: &App) -> Result<(), TerminalError> {
        let input = &self.input_state;
        self.terminal.draw(|frame| ui::render(frame, app, input))?;
        Ok(())
    }

    fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_events(&mut self, app: &App) -> Result<Vec<AppEvent>, Self::Error> {
        match self.event_stream.next().await {
            Some(Ok(Event::Key(key_event))) if key_event.kind == KeyEventKind::Press => {
                let Some(key) = Self::convert_key(key_event) else {
                    return Ok(vec![]);
                };
                let events = self.input_state.handle_key(key, app);
                // Selection, form edits and alert dismissal are local to the driver
                self.draw(app)?;
                Ok(events)
            },
            Some(Ok(Event::Resize(..))) => Ok(vec![AppEvent::Resize]),
            Some(Ok(_)) => Ok(vec![]),
            Some(Err(e)) => Err(TerminalError::Io(e)),
            None => Err(TerminalError::InputClosed),
        }
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.draw(app)
    }

    fn alert(&mut self, app: &App, message: &str) -> Result<(), Self::Error> {
        self.input_state.show_alert(message);
        self.draw(app)
    }

    fn stop(&mut self) {
        self.restore();
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_c_interrupts() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(TerminalDriver::convert_key(key), Some(KeyInput::Interrupt));
    }

    #[test]
    fn plain_c_is_a_character() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(TerminalDriver::convert_key(key), Some(KeyInput::Char('c')));
    }

    #[test]
    fn function_keys_are_ignored() {
        let key = KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE);
        assert_eq!(TerminalDriver::convert_key(key), None);
    }
}
