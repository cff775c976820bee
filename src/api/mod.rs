//! Request API
//!
//! JSON request parsing, dispatch over an `AnalysisContext`, and the
//! response envelopes written by the CLI.
//!
//! # Supported Operations
//!
//! - profile
//! - predict
//! - search
//! - records
//! - summary
//! - importance
//! - rules
//! - reload
//! - metrics

mod errors;
mod handler;
mod request;
mod response;

pub use errors::{ApiError, ApiErrorCode, ApiResult, Severity};
pub use handler::{importance_data, profile_data, records_data, rules_data, ApiHandler};
pub use request::{ProfileRequest, Request, SearchRequest};
pub use response::{ErrorResponse, Response, SuccessResponse};
