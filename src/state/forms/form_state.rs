//! Form state management

use super::field::{FormField, FIELDS};
use super::validation::validate;

/// Number of buttons on the action row (0=Predict, 1=Reset)
pub const BUTTON_COUNT: usize = 2;
pub const PREDICT_BUTTON: usize = 0;
pub const RESET_BUTTON: usize = 1;

/// Trait for common form navigation
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// Live value of every catalog field plus focus state
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    fields: Vec<FormField>,
    pub active_field_index: usize,
    /// Which button is selected when on the buttons row
    pub selected_button: usize,
}

impl FormState {
    /// Create a form holding the default literal of every field
    pub fn new() -> Self {
        Self {
            fields: FIELDS.iter().map(FormField::new).collect(),
            active_field_index: 0,
            selected_button: PREDICT_BUTTON,
        }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    #[cfg(test)]
    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id() == id)
    }

    #[cfg(test)]
    pub fn value(&self, id: &str) -> Option<&str> {
        self.field(id).map(|f| f.value.as_str())
    }

    /// Overwrite a field value without keystroke validation.
    ///
    /// Returns false if `id` is not in the catalog.
    #[cfg(test)]
    pub fn set_value(&mut self, id: &str, value: &str) -> bool {
        match self.fields.iter_mut().find(|f| f.id() == id) {
            Some(field) => {
                field.value = value.to_string();
                true
            }
            None => false,
        }
    }

    /// Restore every field to its default and focus the first row
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.reset();
        }
        self.active_field_index = 0;
        self.selected_button = PREDICT_BUTTON;
    }

    /// Returns true if the buttons row is currently active
    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_index == self.fields.len()
    }

    /// Whether the focused row is a numeric field
    pub fn is_active_field_numeric(&self) -> bool {
        self.get_field(self.active_field_index)
            .is_some_and(|f| f.kind().is_numeric())
    }

    /// Move to the next button (wraps around)
    pub fn next_button(&mut self) {
        self.selected_button = (self.selected_button + 1) % BUTTON_COUNT;
    }

    /// Move to the previous button (wraps around)
    pub fn prev_button(&mut self) {
        if self.selected_button == 0 {
            self.selected_button = BUTTON_COUNT - 1;
        } else {
            self.selected_button -= 1;
        }
    }

    /// Type a character into the focused numeric field.
    ///
    /// The keystroke is dropped when the resulting text fails validation.
    pub fn input_char(&mut self, c: char) -> bool {
        let Some(field) = self.get_active_field_mut() else {
            return false;
        };
        if !field.kind().is_numeric() {
            return false;
        }
        let mut candidate = field.value.clone();
        candidate.push(c);
        if validate(&candidate, field.kind()) {
            field.value = candidate;
            true
        } else {
            false
        }
    }

    /// Remove the last character of the focused numeric field, if allowed
    pub fn backspace(&mut self) -> bool {
        let Some(field) = self.get_active_field_mut() else {
            return false;
        };
        if !field.kind().is_numeric() || field.value.is_empty() {
            return false;
        }
        let mut candidate = field.value.clone();
        candidate.pop();
        if validate(&candidate, field.kind()) {
            field.value = candidate;
            true
        } else {
            false
        }
    }

    /// Cycle the focused categorical field
    pub fn cycle_active(&mut self, forward: bool) {
        if let Some(field) = self.get_active_field_mut() {
            field.cycle(forward);
        }
    }

    /// Step the focused numeric field
    pub fn step_active(&mut self, up: bool) -> bool {
        self.get_active_field_mut().is_some_and(|f| f.step(up))
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for FormState {
    fn field_count(&self) -> usize {
        self.fields.len() + 1 // fields + buttons row
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields.len());
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.active_field_index)
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index)
    }
}
