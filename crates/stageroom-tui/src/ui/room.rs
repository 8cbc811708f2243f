//! Room view
//!
//! Control bar (leave, self-mute) above the roster, plus the per-row action
//! menu when one is open.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};
use stageroom_app::{App, ButtonColor, RosterEntry};

use crate::InputState;

const CONTROLS_HEIGHT: u16 = 3;
const ROSTER_MIN_HEIGHT: u16 = 3;
const MENU_WIDTH: u16 = 20;
const MENU_HEIGHT: u16 = 5;
const SELECTED_PREFIX: &str = "> ";
const UNSELECTED_PREFIX: &str = "  ";
const MENU_MARKER: &str = " [...]";
const BORDER_SIZE: u16 = 2;

/// Render the room view.
pub fn render(frame: &mut Frame, app: &App, input: &InputState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(CONTROLS_HEIGHT), Constraint::Min(ROSTER_MIN_HEIGHT)])
        .split(area);

    let [controls_area, roster_area] = chunks.as_ref() else {
        return;
    };

    render_controls(frame, app, *controls_area);
    render_roster(frame, app, input, *roster_area);
}

fn render_controls(frame: &mut Frame, app: &App, area: Rect) {
    let audio = app.view().audio_button;

    let mut spans =
        vec![Span::raw(" "), Span::styled("[l] Leave", Style::default().fg(Color::Cyan))];
    if !audio.hidden {
        let color = match audio.color() {
            ButtonColor::Red => Color::Red,
            ButtonColor::Green => Color::Green,
        };
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            format!("[m] {}", audio.label()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::styled(
        "   ↑/↓ select · Enter actions · r refresh · q quit",
        Style::default().fg(Color::DarkGray),
    ));

    let block = Block::default().borders(Borders::ALL).title(" Controls ");
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_roster(frame: &mut Frame, app: &App, input: &InputState, area: Rect) {
    let roster = app.roster();
    let selected = input.selected(roster);

    let items: Vec<ListItem> = roster
        .iter()
        .enumerate()
        .map(|(i, entry)| roster_item(entry, selected == Some(i)))
        .collect();

    let title = format!(" Peers ({}) ", roster.len());
    let block = Block::default().borders(Borders::ALL).title(title);
    frame.render_widget(List::new(items).block(block), area);

    if let Some((row, item)) = input.menu(roster) {
        let y = area.y.saturating_add(1).saturating_add(row as u16);
        let max_y = area.y.saturating_add(area.height).saturating_sub(MENU_HEIGHT);
        let popup = Rect {
            x: area.x.saturating_add(area.width.saturating_sub(MENU_WIDTH + BORDER_SIZE)),
            y: y.min(max_y).max(area.y),
            width: MENU_WIDTH.min(area.width),
            height: MENU_HEIGHT.min(area.height),
        };
        render_menu(frame, &roster[row], item, popup);
    }
}

fn roster_item(entry: &RosterEntry, selected: bool) -> ListItem<'static> {
    let (prefix, style) = if selected {
        (SELECTED_PREFIX, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    } else {
        (UNSELECTED_PREFIX, Style::default())
    };
    let marker = if entry.menu.visible { MENU_MARKER } else { "" };

    ListItem::new(Line::from(vec![
        Span::raw(prefix),
        Span::styled(entry.label.clone(), style),
        Span::styled(marker, Style::default().fg(Color::Cyan)),
        Span::styled(format!("  {}", entry.avatar_url), Style::default().fg(Color::DarkGray)),
    ]))
}

fn render_menu(frame: &mut Frame, entry: &RosterEntry, highlighted: usize, area: Rect) {
    let items: Vec<ListItem> = entry
        .menu
        .items()
        .iter()
        .enumerate()
        .map(|(i, (_, label))| {
            let style = if i == highlighted {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default()
            };
            ListItem::new(Span::styled(format!(" {label} "), style))
        })
        .collect();

    let block = Block::default().borders(Borders::ALL).title(" Actions ");
    frame.render_widget(Clear, area);
    frame.render_widget(List::new(items).block(block), area);
}
