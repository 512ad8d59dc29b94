//! Errors surfaced by a form submission

/// Failure of a single submission, shown to the user and then discarded
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// A required field was empty at submission time
    #[error("{field} must not be empty")]
    Validation { field: &'static str },
    /// A numeric field could not be coerced to its declared kind
    #[error("invalid value {value:?} for {field}: {reason}")]
    Parse {
        field: &'static str,
        value: String,
        reason: String,
    },
    /// The predictor failed to produce a price
    #[error("{0}")]
    Predictor(String),
}

impl SubmitError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::Parse { .. } => "parse",
            Self::Predictor(_) => "predictor",
        }
    }
}

impl From<anyhow::Error> for SubmitError {
    fn from(err: anyhow::Error) -> Self {
        Self::Predictor(format!("{err:#}"))
    }
}
