//! Join form
//!
//! Username field, role selector and the join button.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use stageroom_app::{App, JoinButton};

use crate::{Focus, InputState};

const FORM_WIDTH: u16 = 56;
const FORM_HEIGHT: u16 = 9;
const NAME_PREFIX: &str = " Username: ";
const ROLE_PREFIX: &str = " Role:     ";
const HINT: &str = " Tab field · ←/→ role · Enter join · Esc quit";
const NAME_LINE_OFFSET_Y: u16 = 2; // border + blank line

/// Render the join form centered in `area`.
pub fn render(frame: &mut Frame, app: &App, input: &InputState, area: Rect) {
    let form = super::centered(area, FORM_WIDTH, FORM_HEIGHT);
    let block = Block::default().borders(Borders::ALL).title(" Join room ");

    let focused = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let field_style = |focus: Focus| if input.focus() == focus { focused } else { Style::default() };

    let button = match app.view().join_button {
        JoinButton::Idle => Span::styled(
            format!("[ {} ]", JoinButton::Idle.label()),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        JoinButton::Loading => Span::styled(
            format!("[ {} ]", JoinButton::Loading.label()),
            Style::default().fg(Color::DarkGray),
        ),
    };

    let text = vec![
        Line::default(),
        Line::from(vec![
            Span::raw(NAME_PREFIX),
            Span::styled(input.name(), field_style(Focus::Name)),
        ]),
        Line::from(vec![
            Span::raw(ROLE_PREFIX),
            Span::styled(format!("< {} >", input.role()), field_style(Focus::Role)),
        ]),
        Line::default(),
        Line::from(vec![Span::raw(" "), button]),
        Line::default(),
        Line::from(Span::styled(HINT, Style::default().fg(Color::DarkGray))),
    ];

    frame.render_widget(Paragraph::new(text).block(block), form);

    if input.focus() == Focus::Name {
        let prefix = NAME_PREFIX.chars().count() as u16;
        let cursor_x =
            form.x.saturating_add(1).saturating_add(prefix).saturating_add(input.cursor() as u16);
        let max_x = form.x.saturating_add(form.width).saturating_sub(2);
        let cursor_y = form.y.saturating_add(NAME_LINE_OFFSET_Y);
        frame.set_cursor_position((cursor_x.min(max_x), cursor_y));
    }
}
