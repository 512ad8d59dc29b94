//! Prediction result dialog

use super::base::{dismiss_hint, render_dialog, DialogConfig};
use ratatui::{style::Color, Frame};

/// Render the predicted price centered on the screen
pub fn render_info_dialog(frame: &mut Frame, message: &str) {
    render_dialog(
        frame,
        DialogConfig {
            title: "Price prediction",
            title_color: Color::Green,
            border_color: Color::Green,
            message,
            hint: Some(dismiss_hint()),
            max_width: 60,
        },
    );
}
