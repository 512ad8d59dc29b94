//! Dialog components for TUI

mod base;
mod error_dialog;
mod info_dialog;

use crate::state::ResultDialog;
use ratatui::Frame;

pub use error_dialog::render_error_dialog;
pub use info_dialog::render_info_dialog;

/// Render whichever submission outcome is pending
pub fn render_result_dialog(frame: &mut Frame, dialog: &ResultDialog) {
    if dialog.is_error() {
        render_error_dialog(frame, dialog.message());
    } else {
        render_info_dialog(frame, dialog.message());
    }
}
