//! Record schema error types
//!
//! Error codes:
//! - PLACEMENT_SCHEMA_VALIDATION_FAILED (REJECT)
//! - PLACEMENT_RECORD_INDEX_MISMATCH (REJECT)
//! - PLACEMENT_DATASET_UNREADABLE (FATAL)

use std::fmt;

/// Severity levels for schema errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The requesting operation is rejected; corrected input may be retried
    Reject,
    /// The dataset cannot be used at all
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Row violates the fixed student schema
    PlacementSchemaValidationFailed,
    /// Record index does not match its position in the store
    PlacementRecordIndexMismatch,
    /// Dataset file missing or not a JSON array of rows
    PlacementDatasetUnreadable,
}

impl SchemaErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::PlacementSchemaValidationFailed => "PLACEMENT_SCHEMA_VALIDATION_FAILED",
            SchemaErrorCode::PlacementRecordIndexMismatch => "PLACEMENT_RECORD_INDEX_MISMATCH",
            SchemaErrorCode::PlacementDatasetUnreadable => "PLACEMENT_DATASET_UNREADABLE",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            SchemaErrorCode::PlacementDatasetUnreadable => Severity::Fatal,
            _ => Severity::Reject,
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Validation failure details
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationDetails {
    /// Column name (e.g., "CGPA")
    pub field: String,
    /// Expected type or condition
    pub expected: String,
    /// Actual value or type found
    pub actual: String,
}

impl ValidationDetails {
    pub fn new(field: impl Into<String>, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(field, "field to be present", "missing")
    }

    pub fn extra_field(field: impl Into<String>) -> Self {
        Self::new(field, "no undeclared fields", "extra field present")
    }

    pub fn type_mismatch(field: impl Into<String>, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::new(field, expected, actual)
    }

    pub fn null_value(field: impl Into<String>) -> Self {
        Self::new(field, "non-null value", "null")
    }
}

impl fmt::Display for ValidationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}': expected {}, got {}", self.field, self.expected, self.actual)
    }
}

/// Schema error type with full context
#[derive(Debug, Clone)]
pub struct SchemaError {
    /// Error code
    code: SchemaErrorCode,
    /// Human-readable message
    message: String,
    /// Row position if applicable
    row: Option<usize>,
    /// Validation details if applicable
    details: Option<ValidationDetails>,
}

impl SchemaError {
    /// Create a validation failed error for the row at `row`
    pub fn validation_failed(row: usize, details: ValidationDetails) -> Self {
        Self {
            code: SchemaErrorCode::PlacementSchemaValidationFailed,
            message: format!("Row {} failed validation: {}", row, details),
            row: Some(row),
            details: Some(details),
        }
    }

    /// Create an index mismatch error
    pub fn index_mismatch(position: usize, index: usize) -> Self {
        Self {
            code: SchemaErrorCode::PlacementRecordIndexMismatch,
            message: format!("Record at position {} carries index {}", position, index),
            row: Some(position),
            details: None,
        }
    }

    /// Create an error for an unreadable or malformed dataset file
    pub fn dataset_unreadable(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::PlacementDatasetUnreadable,
            message: format!("Cannot read dataset '{}': {}", path.into(), reason.into()),
            row: None,
            details: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending row position if applicable
    pub fn row(&self) -> Option<usize> {
        self.row
    }

    /// Returns validation details if applicable
    pub fn details(&self) -> Option<&ValidationDetails> {
        self.details.as_ref()
    }

    /// Returns whether this is a fatal error
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
