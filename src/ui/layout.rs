//! Layout components (main area, status bar)

use crate::app::App;
use crate::platform::{RESET_SHORTCUT, SUBMIT_SHORTCUT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into the main content area and the status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        format!(" {} ", app.settings.mode),
        Style::default().fg(Color::Green),
    )];

    spans.push(Span::styled(
        get_hints(app),
        Style::default().fg(Color::Gray),
    ));

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Quit hint on the right
    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the focused row
fn get_hints(app: &App) -> String {
    if app.state.has_dialog() {
        return "Enter/Esc:dismiss".to_string();
    }
    let form = &app.state.form;
    if form.is_buttons_row_active() {
        "←/→:button  Enter:press  Tab:next".to_string()
    } else if form.is_active_field_numeric() {
        format!("Tab:next  ↑/↓:step  {SUBMIT_SHORTCUT}:predict  {RESET_SHORTCUT}:reset")
    } else {
        format!("Tab/↓:next  ←/→:change  {SUBMIT_SHORTCUT}:predict  {RESET_SHORTCUT}:reset")
    }
}
