//! Form domain layer
//!
//! Field catalog, keystroke validation, live form state and the
//! feature-record extraction used on submit.

mod features;
mod field;
mod form_state;
mod validation;

pub use features::{extract, FeatureRecord};
pub use field::{FieldKind, FormField};
pub use form_state::{Form, FormState, PREDICT_BUTTON, RESET_BUTTON};

#[cfg(test)]
pub use features::FeatureValue;
#[cfg(test)]
pub use field::{FIELDS, YES_TOKEN};
