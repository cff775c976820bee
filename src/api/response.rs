//! Response envelopes
//!
//! `{"status":"ok","data":…}` or `{"status":"error","code":…,"message":…}`

use serde::Serialize;
use serde_json::Value;

use super::errors::ApiError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessResponse {
    pub status: &'static str,
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn from_error(err: &ApiError) -> Self {
        Self {
            status: "error",
            code: err.code().to_string(),
            message: err.message().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Success(SuccessResponse),
    Error(ErrorResponse),
}

impl Response {
    pub fn success(data: Value) -> Self {
        Response::Success(SuccessResponse { status: "ok", data })
    }

    pub fn error(err: &ApiError) -> Self {
        Response::Error(ErrorResponse::from_error(err))
    }

    /// Single-line JSON rendering
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(
                r#"{{"status":"error","code":"PLACEMENT_INTERNAL","message":"response serialization failed: {}"}}"#,
                e.to_string().replace('"', "'")
            )
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }
}
