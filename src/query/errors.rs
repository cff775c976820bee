//! Profile query error types
//!
//! Error codes:
//! - PLACEMENT_UNKNOWN_RULE (REJECT)

use std::fmt;

/// Severity levels for query errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Query rejected; the fact base is untouched
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Query-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorCode {
    /// Rule name not present in the catalog
    PlacementUnknownRule,
}

impl QueryErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            QueryErrorCode::PlacementUnknownRule => "PLACEMENT_UNKNOWN_RULE",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            QueryErrorCode::PlacementUnknownRule => Severity::Reject,
        }
    }
}

impl fmt::Display for QueryErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Query error type with full context
#[derive(Debug, Clone)]
pub struct QueryError {
    code: QueryErrorCode,
    message: String,
    rule: String,
}

impl QueryError {
    /// Create an unknown rule error
    pub fn unknown_rule(rule: impl Into<String>) -> Self {
        let rule = rule.into();
        Self {
            code: QueryErrorCode::PlacementUnknownRule,
            message: format!("Unknown profile rule '{}'", rule),
            rule,
        }
    }

    pub fn code(&self) -> QueryErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The rule name that was requested
    pub fn rule(&self) -> &str {
        &self.rule
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)
    }
}

impl std::error::Error for QueryError {}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;
