//! Request parsing for the `serve` loop
//!
//! One JSON object per line, discriminated by `op`.

use serde::Deserialize;
use serde_json::Value;

use super::errors::{ApiError, ApiResult};

/// Run a named profile rule
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRequest {
    pub rule: String,
    /// Override for the number of preview rows
    pub preview: Option<usize>,
}

/// `column op value` search; numeric values are accepted as JSON numbers
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub column: String,
    pub op: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Profile(ProfileRequest),
    /// Raw attribute object
    Predict(Value),
    Search(SearchRequest),
    /// Dataset rows; `None` returns every row
    Records { preview: Option<usize> },
    Summary,
    Importance,
    Rules,
    Reload,
    Metrics,
}

#[derive(Debug, Deserialize)]
struct RawRequest {
    op: String,
    #[serde(default)]
    rule: Option<String>,
    #[serde(default)]
    preview: Option<usize>,
    #[serde(default)]
    attributes: Option<Value>,
    #[serde(default)]
    column: Option<String>,
    #[serde(default)]
    operator: Option<String>,
    #[serde(default)]
    value: Option<Value>,
}

impl Request {
    pub fn parse(json: &str) -> ApiResult<Self> {
        let raw: RawRequest =
            serde_json::from_str(json).map_err(|e| ApiError::invalid_request(format!("Invalid JSON: {}", e)))?;

        match raw.op.as_str() {
            "profile" => {
                let rule = raw.rule.ok_or_else(|| ApiError::invalid_request("Missing rule"))?;
                Ok(Request::Profile(ProfileRequest {
                    rule,
                    preview: raw.preview,
                }))
            }
            "predict" => {
                let attributes = raw
                    .attributes
                    .ok_or_else(|| ApiError::invalid_request("Missing attributes"))?;
                Ok(Request::Predict(attributes))
            }
            "search" => {
                let column = raw.column.ok_or_else(|| ApiError::invalid_request("Missing column"))?;
                let op = raw.operator.ok_or_else(|| ApiError::invalid_request("Missing operator"))?;
                let value = match raw.value {
                    Some(Value::String(s)) => s,
                    Some(Value::Number(n)) => n.to_string(),
                    Some(_) => return Err(ApiError::invalid_request("value must be a string or number")),
                    None => return Err(ApiError::invalid_request("Missing value")),
                };
                Ok(Request::Search(SearchRequest { column, op, value }))
            }
            "records" => Ok(Request::Records { preview: raw.preview }),
            "summary" => Ok(Request::Summary),
            "importance" => Ok(Request::Importance),
            "rules" => Ok(Request::Rules),
            "reload" => Ok(Request::Reload),
            "metrics" => Ok(Request::Metrics),
            other => Err(ApiError::unknown_operation(other)),
        }
    }
}
