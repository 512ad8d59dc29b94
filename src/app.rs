//! Application state and core logic

use crate::config::{PredictorSettings, TuiConfig};
use crate::predictor::{self, format_price, CommandPredictor, PredictorTrait};
use crate::state::{AppState, Form, PREDICT_BUTTON, RESET_BUTTON};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Price model collaborator
    predictor: Box<dyn PredictorTrait>,
    /// Artifact, mode and currency used for every submission
    pub settings: PredictorSettings,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App backed by the configured predictor program
    pub fn new(config: TuiConfig) -> Self {
        let predictor = CommandPredictor::from_settings(&config.predictor);
        Self::with_predictor(Box::new(predictor), config.predictor)
    }

    pub fn with_predictor(
        predictor: Box<dyn PredictorTrait>,
        settings: PredictorSettings,
    ) -> Self {
        Self {
            state: AppState::new(),
            predictor,
            settings,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Result dialog is modal
        if self.state.has_dialog() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_dialog();
            }
            return Ok(());
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            // Keyboard shortcuts (work from anywhere)
            KeyCode::Char('s') if ctrl => self.submit().await,
            KeyCode::Enter if key.modifiers.contains(crate::platform::SUBMIT_MODIFIER) => {
                self.submit().await
            }
            KeyCode::Char('r') if ctrl => self.reset(),
            KeyCode::Char('q') if ctrl => self.quit = true,
            KeyCode::Tab => self.state.form.next_field(),
            KeyCode::BackTab => self.state.form.prev_field(),
            _ if self.state.form.is_buttons_row_active() => self.handle_buttons_key(key).await,
            _ if self.state.form.is_active_field_numeric() => self.handle_numeric_key(key),
            _ => self.handle_choice_key(key),
        }
        Ok(())
    }

    /// Keys on the Predict / Reset row
    async fn handle_buttons_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.state.form.prev_button(),
            KeyCode::Right | KeyCode::Char('l') => self.state.form.next_button(),
            KeyCode::Up | KeyCode::Char('k') => self.state.form.prev_field(),
            KeyCode::Down | KeyCode::Char('j') => self.state.form.next_field(),
            KeyCode::Enter | KeyCode::Char(' ') => match self.state.form.selected_button {
                PREDICT_BUTTON => self.submit().await,
                RESET_BUTTON => self.reset(),
                _ => {}
            },
            _ => {}
        }
    }

    /// Keys on a numeric stepper row
    fn handle_numeric_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => {
                self.state.form.step_active(true);
            }
            KeyCode::Down => {
                self.state.form.step_active(false);
            }
            KeyCode::Enter => self.state.form.next_field(),
            KeyCode::Char(c) => {
                if !self.state.form.input_char(c) {
                    tracing::trace!(%c, "keystroke rejected");
                }
            }
            KeyCode::Backspace => {
                self.state.form.backspace();
            }
            _ => {}
        }
    }

    /// Keys on a city or yes/no row
    fn handle_choice_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.state.form.cycle_active(false),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
                self.state.form.cycle_active(true)
            }
            KeyCode::Up | KeyCode::Char('k') => self.state.form.prev_field(),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Enter => self.state.form.next_field(),
            _ => {}
        }
    }

    /// Submit the form and show the outcome in a dialog
    pub async fn submit(&mut self) {
        tracing::info!("submitting prediction");
        let result =
            predictor::submit(&self.state.form, self.predictor.as_ref(), &self.settings).await;
        self.state.submissions += 1;
        match result {
            Ok(price) => {
                tracing::info!(price, "prediction succeeded");
                self.state.show_info(format!(
                    "Predicted apartment price: {} {}",
                    format_price(price),
                    self.settings.currency
                ));
                self.state.status_message = None;
            }
            Err(err) => {
                tracing::warn!(kind = err.kind(), error = %err, "prediction failed");
                self.state
                    .show_error(format!("Something went wrong: {err}"));
            }
        }
    }

    /// Restore every field to its default
    pub fn reset(&mut self) {
        tracing::info!("resetting form");
        self.state.form.reset();
        self.state.status_message = Some("Form reset to defaults".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictor::MockPredictorTrait;
    use crate::state::{FormState, ResultDialog, FIELDS, YES_TOKEN};
    use anyhow::anyhow;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app_returning(price: f64) -> App {
        let mut mock = MockPredictorTrait::new();
        mock.expect_predict().returning(move |_, _, _| Ok(price));
        App::with_predictor(Box::new(mock), PredictorSettings::default())
    }

    fn app_failing(message: &'static str) -> App {
        let mut mock = MockPredictorTrait::new();
        mock.expect_predict()
            .returning(move |_, _, _| Err(anyhow!(message)));
        App::with_predictor(Box::new(mock), PredictorSettings::default())
    }

    fn focus(app: &mut App, id: &str) {
        let index = FIELDS.iter().position(|d| d.id == id).unwrap();
        app.state.form.set_active_field(index);
    }

    mod submission {
        use super::*;

        #[tokio::test]
        async fn test_defaults_submit_shows_formatted_price() {
            let mut app = app_returning(500000.0);
            app.handle_key(ctrl('s')).await.unwrap();

            let dialog = app.state.dialog.clone().unwrap();
            assert!(!dialog.is_error());
            assert!(dialog.message().contains("500,000.00"));
            assert!(dialog.message().contains("PLN"));
            assert_eq!(app.state.submissions, 1);
        }

        #[tokio::test]
        async fn test_predictor_failure_shows_error() {
            let mut app = app_failing("model not found");
            app.submit().await;

            let dialog = app.state.dialog.clone().unwrap();
            assert!(dialog.is_error());
            assert!(dialog.message().contains("model not found"));
        }

        #[tokio::test]
        async fn test_empty_city_shows_validation_error_without_predicting() {
            let mut mock = MockPredictorTrait::new();
            mock.expect_predict().times(0);
            let mut app = App::with_predictor(Box::new(mock), PredictorSettings::default());
            app.state.form.set_value("city", " ");
            app.submit().await;

            assert_eq!(
                app.state.dialog,
                Some(ResultDialog::Error(
                    "Something went wrong: city must not be empty".to_string()
                ))
            );
        }

        #[tokio::test]
        async fn test_form_usable_after_error() {
            let mut app = app_failing("boom");
            app.submit().await;
            assert!(app.state.has_dialog());

            // Keys other than Enter/Esc are swallowed by the dialog
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            assert_eq!(app.state.form.active_field_index, 0);

            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            assert!(!app.state.has_dialog());
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            assert_eq!(app.state.form.active_field_index, 1);
        }

        #[tokio::test]
        async fn test_enter_dismisses_result_dialog() {
            let mut app = app_returning(1.0);
            app.submit().await;
            assert!(app.state.has_dialog());

            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert!(!app.state.has_dialog());
            assert_eq!(app.state.submissions, 1);
        }

        #[tokio::test]
        async fn test_modifier_enter_submits_from_any_row() {
            let mut app = app_returning(310000.0);
            focus(&mut app, "rooms");
            let submit_key = KeyEvent::new(KeyCode::Enter, crate::platform::SUBMIT_MODIFIER);
            app.handle_key(submit_key).await.unwrap();

            assert_eq!(app.state.submissions, 1);
            assert!(app
                .state
                .dialog
                .as_ref()
                .is_some_and(|d| d.message().contains("310,000.00")));
            assert_eq!(app.state.form.value("rooms"), Some("2"));
        }

        #[tokio::test]
        async fn test_submit_does_not_mutate_form() {
            let mut app = app_returning(1.0);
            app.state.form.set_value("squareMeters", "50.25");
            let before = app.state.form.clone();
            app.submit().await;
            assert_eq!(app.state.form, before);
        }

        #[tokio::test]
        async fn test_predict_button() {
            let mut app = app_returning(250000.0);
            app.state.form.set_active_field(FIELDS.len());
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert!(app
                .state
                .dialog
                .as_ref()
                .is_some_and(|d| d.message().contains("250,000.00")));
        }
    }

    mod reset {
        use super::*;

        #[tokio::test]
        async fn test_ctrl_r_restores_defaults() {
            let mut app = app_returning(1.0);
            app.state.form.set_value("hasBalcony", YES_TOKEN);
            app.state.form.set_value("rooms", "7");
            app.handle_key(ctrl('r')).await.unwrap();
            assert_eq!(app.state.form, FormState::new());
            assert!(app.state.status_message.is_some());
        }

        #[tokio::test]
        async fn test_reset_button() {
            let mut app = app_returning(1.0);
            app.state.form.set_value("city", "lodz");
            app.state.form.set_active_field(FIELDS.len());
            app.handle_key(key(KeyCode::Right)).await.unwrap();
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert_eq!(app.state.form.value("city"), Some("gdynia"));
            assert!(!app.state.has_dialog());
        }

        #[tokio::test]
        async fn test_reset_then_submit_succeeds() {
            let mut mock = MockPredictorTrait::new();
            let expected = crate::state::extract(&FormState::new()).unwrap();
            mock.expect_predict()
                .withf(move |features, _, _| *features == expected)
                .times(1)
                .returning(|_, _, _| Ok(420000.0));
            let mut app = App::with_predictor(Box::new(mock), PredictorSettings::default());
            app.state.form.set_value("squareMeters", ".");
            app.reset();
            app.submit().await;
            assert!(!app.state.dialog.unwrap().is_error());
        }
    }

    mod editing {
        use super::*;

        #[tokio::test]
        async fn test_typing_is_validated() {
            let mut app = app_returning(1.0);
            focus(&mut app, "squareMeters");
            for c in ['.', '2', '5'] {
                app.handle_key(key(KeyCode::Char(c))).await.unwrap();
            }
            assert_eq!(app.state.form.value("squareMeters"), Some("50.0"));

            app.handle_key(key(KeyCode::Backspace)).await.unwrap();
            app.handle_key(key(KeyCode::Char('5'))).await.unwrap();
            assert_eq!(app.state.form.value("squareMeters"), Some("50.5"));
        }

        #[tokio::test]
        async fn test_arrows_step_numeric_fields() {
            let mut app = app_returning(1.0);
            focus(&mut app, "poiCount");
            app.handle_key(key(KeyCode::Up)).await.unwrap();
            app.handle_key(key(KeyCode::Up)).await.unwrap();
            assert_eq!(app.state.form.value("poiCount"), Some("5"));
        }

        #[tokio::test]
        async fn test_arrows_cycle_choices() {
            let mut app = app_returning(1.0);
            app.handle_key(key(KeyCode::Left)).await.unwrap();
            assert_eq!(app.state.form.value("city"), Some("gdansk"));

            focus(&mut app, "hasElevator");
            app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
            assert_eq!(app.state.form.value("hasElevator"), Some(YES_TOKEN));
        }

        #[tokio::test]
        async fn test_down_moves_focus_on_choice_rows() {
            let mut app = app_returning(1.0);
            app.handle_key(key(KeyCode::Down)).await.unwrap();
            assert_eq!(app.state.form.active_field_index, 1);
            app.handle_key(key(KeyCode::BackTab)).await.unwrap();
            assert_eq!(app.state.form.active_field_index, 0);
        }

        #[test]
        fn test_ctrl_q_quits() {
            let mut app = app_returning(1.0);
            assert!(!app.should_quit());
            tokio_test::block_on(app.handle_key(ctrl('q'))).unwrap();
            assert!(app.should_quit());
        }
    }
}
