//! UI rendering
//!
//! Rendering functions that convert App and input state into terminal
//! output using ratatui widgets. All functions are pure (no I/O).

mod alert;
mod join;
mod room;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};
use stageroom_app::{App, ViewMode};

use crate::InputState;

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App, input: &InputState) {
    const MAIN_AREA_MIN_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(MAIN_AREA_MIN_HEIGHT), Constraint::Length(STATUS_HEIGHT)])
        .split(frame.area());

    let [main_area, status_area] = chunks.as_ref() else {
        return;
    };

    // Exactly one of the two views, picked from the App's mode
    match app.view().mode {
        ViewMode::JoinForm => join::render(frame, app, input, *main_area),
        ViewMode::Room => room::render(frame, app, input, *main_area),
    }
    status::render(frame, app, *status_area);

    if let Some(message) = input.alert() {
        let area = frame.area();
        alert::render(frame, message, area);
    }
}

/// Rectangle of at most `width` x `height` centered in `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
