//! Field rendering utilities for forms

use crate::state::{FieldKind, FormField};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Width of the label column
pub const LABEL_WIDTH: u16 = 34;

/// Draw a single-line form row: label on the left, value on the right
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let label_style = if is_active {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let value_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };

    let marker = if is_active { "› " } else { "  " };
    let label = format!("{marker}{:<width$}", field.label(), width = LABEL_WIDTH as usize);

    let display_value = field.display_value();
    let display_str = if display_value.is_empty() && !is_active {
        "(empty)".to_string()
    } else {
        display_value
    };

    let mut spans = vec![
        Span::styled(label, label_style),
        Span::styled(display_str, value_style),
    ];
    // Numeric fields are typed into, so they get a cursor
    if is_active && field.kind().is_numeric() {
        spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }
    if is_active {
        spans.push(Span::styled(
            format!("  {}", field_hint(field.kind())),
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Short key hint for the focused field
fn field_hint(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::City => "←/→ choose",
        FieldKind::Binary => "←/→/Space toggle",
        FieldKind::Integer => "digits, ↑/↓ ±1",
        FieldKind::Decimal => "one decimal, ↑/↓ ±0.1",
    }
}
