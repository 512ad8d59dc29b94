//! Apartment price form rendering

use super::field_renderer::draw_field;
use crate::app::App;
use crate::platform::{RESET_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::{Form, PREDICT_BUTTON, RESET_BUTTON};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the price form with action sidebar
pub fn draw_price_form(frame: &mut Frame, area: Rect, app: &App) {
    // Split into form (left) and action panel (right)
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Form area
            Constraint::Length(20), // Action panel
        ])
        .split(area);

    draw_form(frame, main_chunks[0], app);
    draw_action_panel(frame, main_chunks[1], app);
}

/// Draw one row per catalog field
fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.form;
    let form_focused = !form.is_buttons_row_active();
    let border_color = if form_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Apartment price ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> =
        form.fields().iter().map(|_| Constraint::Length(1)).collect();
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .horizontal_margin(1)
        .split(inner);

    for (index, field) in form.fields().iter().enumerate() {
        draw_field(frame, rows[index], field, form.active_field() == index);
    }
}

/// Draw the Predict / Reset buttons
fn draw_action_panel(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.form;
    let is_focused = form.is_buttons_row_active();

    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Actions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let button_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT), // Predict (primary)
            Constraint::Length(BUTTON_HEIGHT), // Reset
            Constraint::Length(1),
            Constraint::Min(0), // Shortcuts
        ])
        .split(inner_area);

    render_action_button(
        frame,
        button_chunks[0],
        "Predict",
        is_focused && form.selected_button == PREDICT_BUTTON,
        Some(Color::Green),
    );
    render_action_button(
        frame,
        button_chunks[1],
        "Reset",
        is_focused && form.selected_button == RESET_BUTTON,
        Some(Color::Gray),
    );

    let help = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{SUBMIT_SHORTCUT} predict"),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            format!("{RESET_SHORTCUT} reset"),
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(help, button_chunks[3]);
}
