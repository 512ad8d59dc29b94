//! Application state definitions

use super::forms::FormState;

/// Outcome dialog shown after a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultDialog {
    /// Predicted price message
    Info(String),
    /// Failure message
    Error(String),
}

impl ResultDialog {
    pub fn message(&self) -> &str {
        match self {
            Self::Info(msg) | Self::Error(msg) => msg,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Main application state
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub form: FormState,
    /// Modal dialog currently displayed, if any
    pub dialog: Option<ResultDialog>,
    /// Short feedback shown in the status bar
    pub status_message: Option<String>,
    /// Number of completed submissions in this session
    pub submissions: usize,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a modal dialog is open
    pub fn has_dialog(&self) -> bool {
        self.dialog.is_some()
    }

    pub fn show_info(&mut self, message: impl Into<String>) {
        self.dialog = Some(ResultDialog::Info(message.into()));
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.dialog = Some(ResultDialog::Error(message.into()));
    }

    pub fn dismiss_dialog(&mut self) {
        self.dialog = None;
    }
}
