//! Status bar
//!
//! Displays the connection state, peer count and the last status message.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use stageroom_app::{App, ViewMode};

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let connection = match app.view().mode {
        ViewMode::JoinForm => Span::styled("Not connected", Style::default().fg(Color::Red)),
        ViewMode::Room => Span::styled(
            "Connected",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    };

    let peers = match app.view().mode {
        ViewMode::Room => format!(" | Peers: {}", app.roster().len()),
        ViewMode::JoinForm => String::new(),
    };
    let message = app.status_message().map_or_else(String::new, |m| format!(" | {m}"));

    let status_line = Line::from(vec![
        Span::raw(" "),
        connection,
        Span::raw(peers),
        Span::styled(message, Style::default().fg(Color::Yellow)),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
