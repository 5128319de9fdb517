use serde::Deserialize;
use serde_json::Value;

/// Error body sent by the backend.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// A string for most errors, a list of validation failures for 422.
    #[serde(default)]
    pub detail: Option<Value>,
}

/// One entry of a validation failure list.
#[derive(Debug, Deserialize)]
pub struct ValidationIssue {
    /// Human-readable message.
    pub msg: String,
}
