//! Input state and key handling for the TUI.
//!
//! This module owns all terminal-local interaction state: the join form
//! fields, the roster selection, the open action menu and the alert modal.
//! Keys are mapped onto [`AppEvent`]s against whichever view the App is
//! showing; nothing here decides permissions.

use stageroom_app::{App, AppEvent, RosterEntry, ViewMode};
use stageroom_core::{PeerId, RoleName};

/// Roles offered by the join form, in selector order.
pub static ROLES: [RoleName; 3] = [RoleName::Listener, RoleName::Speaker, RoleName::Moderator];

/// Key input events from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Character input.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Tab key.
    Tab,
    /// Escape key.
    Esc,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Ctrl-C.
    Interrupt,
}

/// Join form field with keyboard focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    /// Username text field.
    #[default]
    Name,
    /// Role selector.
    Role,
}

/// Input state for the TUI.
#[derive(Debug)]
pub struct InputState {
    /// Username buffer.
    name: String,
    /// Cursor position within the username, in characters.
    cursor: usize,
    /// Index into [`ROLES`].
    role_index: usize,
    /// Focused join form field.
    focus: Focus,
    /// Peer whose roster row is selected. `None` selects the first row.
    selected: Option<PeerId>,
    /// Peer whose action menu is open, and the highlighted item.
    menu: Option<(PeerId, usize)>,
    /// Alert being shown. `None` if no alert.
    alert: Option<String>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    /// Create an empty input state with the speaker role preselected.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            cursor: 0,
            role_index: 1,
            focus: Focus::Name,
            selected: None,
            menu: None,
            alert: None,
        }
    }

    /// Current username text.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cursor position within the username.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Role currently chosen in the selector.
    pub fn role(&self) -> &RoleName {
        &ROLES[self.role_index % ROLES.len()]
    }

    /// Focused join form field.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Row of the selected peer. Falls back to the first row when that
    /// peer has left the roster.
    pub fn selected(&self, roster: &[RosterEntry]) -> Option<usize> {
        if roster.is_empty() {
            return None;
        }
        let row = self.selected.as_ref().and_then(|peer_id| row_of(roster, peer_id));
        Some(row.unwrap_or(0))
    }

    /// Row and highlighted item of the open action menu. `None` if closed or
    /// if its peer is no longer offering a menu.
    pub fn menu(&self, roster: &[RosterEntry]) -> Option<(usize, usize)> {
        let (peer_id, item) = self.menu.as_ref()?;
        let row = row_of(roster, peer_id).filter(|&row| roster[row].menu.visible)?;
        Some((row, *item))
    }

    /// Alert being shown.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Show a blocking alert. Replaces any alert already open.
    pub fn show_alert(&mut self, message: impl Into<String>) {
        self.menu = None;
        self.alert = Some(message.into());
    }

    /// Handle a key input event.
    ///
    /// Returns the events for the App. While an alert is open, the key only
    /// dismisses it.
    pub fn handle_key(&mut self, key: KeyInput, app: &App) -> Vec<AppEvent> {
        if self.alert.take().is_some() {
            return vec![];
        }
        if key == KeyInput::Interrupt {
            return vec![AppEvent::Unload];
        }

        match app.view().mode {
            ViewMode::JoinForm => self.handle_form_key(key),
            ViewMode::Room => self.handle_room_key(key, app),
        }
    }

    fn handle_form_key(&mut self, key: KeyInput) -> Vec<AppEvent> {
        match (key, self.focus) {
            (KeyInput::Esc, _) => return vec![AppEvent::Unload],
            (KeyInput::Enter, _) => {
                return vec![AppEvent::SubmitJoin {
                    user_name: self.name.clone(),
                    role: self.role().to_string(),
                }];
            },
            (KeyInput::Tab, Focus::Name) => self.focus = Focus::Role,
            (KeyInput::Tab, Focus::Role) => self.focus = Focus::Name,

            (KeyInput::Left, Focus::Role) => {
                self.role_index = (self.role_index + ROLES.len() - 1) % ROLES.len();
            },
            (KeyInput::Right, Focus::Role) => self.role_index = (self.role_index + 1) % ROLES.len(),

            (KeyInput::Char(c), Focus::Name) => {
                let at = self.byte_offset(self.cursor);
                self.name.insert(at, c);
                self.cursor += 1;
            },
            (KeyInput::Backspace, Focus::Name) if self.cursor > 0 => {
                self.cursor -= 1;
                let at = self.byte_offset(self.cursor);
                self.name.remove(at);
            },
            (KeyInput::Delete, Focus::Name) if self.cursor < self.name.chars().count() => {
                let at = self.byte_offset(self.cursor);
                self.name.remove(at);
            },
            (KeyInput::Left, Focus::Name) => self.cursor = self.cursor.saturating_sub(1),
            (KeyInput::Right, Focus::Name) => {
                self.cursor = (self.cursor + 1).min(self.name.chars().count());
            },
            (KeyInput::Home, Focus::Name) => self.cursor = 0,
            (KeyInput::End, Focus::Name) => self.cursor = self.name.chars().count(),
            _ => {},
        }
        vec![]
    }

    fn handle_room_key(&mut self, key: KeyInput, app: &App) -> Vec<AppEvent> {
        let roster = app.roster();

        if self.menu.is_some() {
            let Some((row, item)) = self.menu(roster) else {
                // The peer left under the open menu; the key goes nowhere
                self.menu = None;
                return vec![];
            };
            return self.handle_menu_key(key, &roster[row], item);
        }

        let Some(row) = self.selected(roster) else {
            return Self::room_shortcut(key, app);
        };
        let entry = &roster[row];
        match key {
            KeyInput::Up => self.select(&roster[row.saturating_sub(1)]),
            KeyInput::Down => self.select(&roster[(row + 1).min(roster.len() - 1)]),
            KeyInput::Enter if entry.menu.visible => {
                self.select(entry);
                self.menu = Some((entry.peer_id.clone(), 0));
            },
            _ => return Self::room_shortcut(key, app),
        }
        vec![]
    }

    fn handle_menu_key(
        &mut self,
        key: KeyInput,
        entry: &RosterEntry,
        item: usize,
    ) -> Vec<AppEvent> {
        let items = entry.menu.items();
        let last = items.len() - 1;
        match key {
            KeyInput::Up => self.menu = Some((entry.peer_id.clone(), item.saturating_sub(1))),
            KeyInput::Down => self.menu = Some((entry.peer_id.clone(), (item + 1).min(last))),
            KeyInput::Esc => self.menu = None,
            KeyInput::Enter => {
                self.menu = None;
                let (kind, _) = items[item.min(last)];
                return vec![AppEvent::RosterAction { peer_id: entry.peer_id.clone(), kind }];
            },
            _ => {},
        }
        vec![]
    }

    fn select(&mut self, entry: &RosterEntry) {
        self.selected = Some(entry.peer_id.clone());
    }

    fn room_shortcut(key: KeyInput, app: &App) -> Vec<AppEvent> {
        match key {
            KeyInput::Char('m') if !app.view().audio_button.hidden => {
                vec![AppEvent::AudioButtonClicked]
            },
            KeyInput::Char('l') => vec![AppEvent::LeaveClicked],
            KeyInput::Char('r') => vec![AppEvent::PeersChanged { peers: None }],
            KeyInput::Char('q') | KeyInput::Esc => vec![AppEvent::Unload],
            _ => vec![],
        }
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.name.char_indices().nth(chars).map_or(self.name.len(), |(i, _)| i)
    }
}

fn row_of(roster: &[RosterEntry], peer_id: &PeerId) -> Option<usize> {
    roster.iter().position(|entry| &entry.peer_id == peer_id)
}
