//! Rule catalog errors

use thiserror::Error;

/// Result type for catalog construction
pub type RuleResult<T> = Result<T, RuleError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// Two rules in one catalog share a name
    #[error("Duplicate rule name '{0}'")]
    DuplicateRule(String),
}

impl RuleError {
    pub fn code(&self) -> &'static str {
        match self {
            RuleError::DuplicateRule(_) => "PLACEMENT_DUPLICATE_RULE",
        }
    }
}
