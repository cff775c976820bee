//! Encoding errors

use thiserror::Error;

/// Result type for encoding operations
pub type EncodingResult<T> = Result<T, EncodingError>;

/// Categorical encoding failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodingError {
    /// Value was not present when the map was fitted
    #[error("Unseen value '{value}' for column {column}")]
    UnseenValue { column: String, value: String },

    /// Attempted to fit a numeric column
    #[error("Column {0} is not categorical")]
    NotCategorical(String),

    /// Layout names a categorical column with no fitted map
    #[error("No encoding fitted for column {0}")]
    NotFitted(String),

    /// Row lacks a value for a layout column
    #[error("Missing value for column {0}")]
    MissingValue(String),

    /// Value has the wrong kind for its column
    #[error("Invalid value for column {column}: expected {expected}")]
    InvalidValue { column: String, expected: String },
}

impl EncodingError {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            EncodingError::UnseenValue { .. } => "PLACEMENT_UNSEEN_VALUE",
            EncodingError::NotCategorical(_) => "PLACEMENT_NOT_CATEGORICAL",
            EncodingError::NotFitted(_) => "PLACEMENT_ENCODING_NOT_FITTED",
            EncodingError::MissingValue(_) => "PLACEMENT_MISSING_FEATURE",
            EncodingError::InvalidValue { .. } => "PLACEMENT_INVALID_VALUE",
        }
    }
}
