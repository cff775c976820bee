//! API error types
//!
//! API errors are pass-through: they keep the code of the component that
//! failed (records, query, encoding, model, prediction, search).

use std::fmt;

use crate::context::ContextError;
use crate::records::SchemaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Request rejected; the loop continues
    Error,
    /// The session cannot continue
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// API-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// Request is not valid JSON or lacks a field
    PlacementInvalidRequest,
    /// `op` names no known operation
    PlacementUnknownOperation,
    /// Response data could not be rendered as JSON
    PlacementSerializationFailed,
}

impl ApiErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            ApiErrorCode::PlacementInvalidRequest => "PLACEMENT_INVALID_REQUEST",
            ApiErrorCode::PlacementUnknownOperation => "PLACEMENT_UNKNOWN_OPERATION",
            ApiErrorCode::PlacementSerializationFailed => "PLACEMENT_SERIALIZATION_FAILED",
        }
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// API error with the originating code preserved
#[derive(Debug, Clone)]
pub struct ApiError {
    code: String,
    message: String,
    severity: Severity,
}

impl ApiError {
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self {
            code: ApiErrorCode::PlacementInvalidRequest.code().to_string(),
            message: reason.into(),
            severity: Severity::Error,
        }
    }

    pub fn serialization_failed(reason: impl Into<String>) -> Self {
        Self {
            code: ApiErrorCode::PlacementSerializationFailed.code().to_string(),
            message: reason.into(),
            severity: Severity::Error,
        }
    }

    pub fn unknown_operation(op: impl Into<String>) -> Self {
        Self {
            code: ApiErrorCode::PlacementUnknownOperation.code().to_string(),
            message: format!("Unknown operation: {}", op.into()),
            severity: Severity::Error,
        }
    }

    /// Pass-through from the analysis context
    pub fn from_context_error(err: ContextError) -> Self {
        let severity = match &err {
            ContextError::Schema(e) if e.is_fatal() => Severity::Fatal,
            _ => Severity::Error,
        };
        Self {
            code: err.code().to_string(),
            message: err.message(),
            severity,
        }
    }

    /// Pass-through from dataset loading
    pub fn from_schema_error(err: SchemaError) -> Self {
        Self::from_context_error(ContextError::Schema(err))
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self.severity, Severity::Fatal)
    }
}

impl From<ContextError> for ApiError {
    fn from(err: ContextError) -> Self {
        Self::from_context_error(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
