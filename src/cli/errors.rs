//! CLI error types
//!
//! Every CLI error ends the process with exit code 1. Errors raised by
//! lower components keep their code.

use std::fmt;
use std::io;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::context::ContextError;
use crate::records::SchemaError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// stdin/stdout failure or unparsable input
    IoError,
    /// Startup failed
    BootFailed,
    /// Code of the component that failed
    Component(String),
}

impl CliErrorCode {
    pub fn code(&self) -> &str {
        match self {
            Self::IoError => "PLACEMENT_CLI_IO_ERROR",
            Self::BootFailed => "PLACEMENT_CLI_BOOT_FAILED",
            Self::Component(code) => code,
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BootFailed, msg)
    }

    fn component(code: &str, msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::Component(code.to_string()), msg)
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    pub fn code_str(&self) -> &str {
        self.code.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::component(e.code(), e.to_string())
    }
}

impl From<ContextError> for CliError {
    fn from(e: ContextError) -> Self {
        Self::component(e.code(), e.message())
    }
}

impl From<SchemaError> for CliError {
    fn from(e: SchemaError) -> Self {
        Self::component(e.code().code(), e.message())
    }
}

impl From<ApiError> for CliError {
    fn from(e: ApiError) -> Self {
        Self::component(e.code(), e.message())
    }
}

pub type CliResult<T> = Result<T, CliError>;
