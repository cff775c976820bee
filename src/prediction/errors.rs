//! Prediction errors

use thiserror::Error;

use crate::encoding::EncodingError;
use crate::model::ModelError;

/// Result type for prediction operations
pub type PredictionResult<T> = Result<T, PredictionError>;

/// Failures while scoring a single candidate
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    /// Expected features absent from the input, in training order
    #[error("Missing features: {}", .features.join(", "))]
    MissingFeature { features: Vec<String> },

    /// Input is not an attribute object
    #[error("Invalid prediction input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl PredictionError {
    /// Returns the stable string code; wrapped errors keep their own
    pub fn code(&self) -> &'static str {
        match self {
            PredictionError::MissingFeature { .. } => "PLACEMENT_MISSING_FEATURE",
            PredictionError::InvalidInput(_) => "PLACEMENT_INVALID_INPUT",
            PredictionError::Encoding(e) => e.code(),
            PredictionError::Model(e) => e.code(),
        }
    }
}
