//! Column search errors

use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    #[error("Unknown operator '{0}'; expected one of > < >= <= == !=")]
    UnknownOperator(String),

    /// Ordering operator applied to a categorical column
    #[error("Operator {op} is not supported on categorical column {column}")]
    UnsupportedOperator { column: String, op: String },

    #[error("Value '{value}' is not valid for column {column}")]
    InvalidValue { column: String, value: String },
}

impl SearchError {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            SearchError::UnknownColumn(_) => "PLACEMENT_UNKNOWN_COLUMN",
            SearchError::UnknownOperator(_) => "PLACEMENT_UNKNOWN_OPERATOR",
            SearchError::UnsupportedOperator { .. } => "PLACEMENT_UNSUPPORTED_OPERATOR",
            SearchError::InvalidValue { .. } => "PLACEMENT_INVALID_SEARCH_VALUE",
        }
    }
}
