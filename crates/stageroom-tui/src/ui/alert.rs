//! Alert modal
//!
//! Blocking message box drawn over everything else.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const ALERT_WIDTH: u16 = 60;
const ALERT_HEIGHT: u16 = 6;
const DISMISS_HINT: &str = "press any key";

/// Render the alert over `area`.
pub fn render(frame: &mut Frame, message: &str, area: Rect) {
    let popup = super::centered(area, ALERT_WIDTH, ALERT_HEIGHT);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Alert ")
        .border_style(Style::default().fg(Color::Red));

    let text = vec![
        Line::from(Span::styled(message, Style::default().add_modifier(Modifier::BOLD))),
        Line::default(),
        Line::from(Span::styled(DISMISS_HINT, Style::default().fg(Color::DarkGray))),
    ];
    let paragraph =
        Paragraph::new(text).block(block).alignment(Alignment::Center).wrap(Wrap { trim: true });

    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}
