//! Classifier errors

use thiserror::Error;

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Training and inference failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("Feature matrix has {rows} rows but {labels} labels were given")]
    ShapeMismatch { rows: usize, labels: usize },

    #[error("Cannot train on an empty dataset")]
    EmptyDataset,

    #[error("Row {row} has {actual} features, expected {expected}")]
    RaggedMatrix { row: usize, expected: usize, actual: usize },

    #[error("Feature row has {actual} values, model expects {expected}")]
    FeatureCountMismatch { expected: usize, actual: usize },

    #[error("Non-finite value in row {row}, column {column}")]
    NonFiniteFeature { row: usize, column: usize },

    #[error("Invalid forest configuration: {0}")]
    InvalidConfig(String),
}

impl ModelError {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::ShapeMismatch { .. } => "PLACEMENT_SHAPE_MISMATCH",
            ModelError::EmptyDataset => "PLACEMENT_EMPTY_DATASET",
            ModelError::RaggedMatrix { .. } => "PLACEMENT_SHAPE_MISMATCH",
            ModelError::FeatureCountMismatch { .. } => "PLACEMENT_FEATURE_COUNT_MISMATCH",
            ModelError::NonFiniteFeature { .. } => "PLACEMENT_NON_FINITE_FEATURE",
            ModelError::InvalidConfig(_) => "PLACEMENT_INVALID_MODEL_CONFIG",
        }
    }
}
