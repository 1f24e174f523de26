/*
[INPUT]:  Error sources (transport, API error bodies, serialization, binding setup)
[OUTPUT]: Structured error types surfaced to SDK callers
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or changing error body handling
*/

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured error body returned by Float APIs
///
/// ```json
/// { "error": "missing password", "message": "You must specify a password." }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl std::fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.error, &self.message) {
            (Some(error), Some(message)) => write!(f, "{error}: {message}"),
            (Some(error), None) => f.write_str(error),
            (None, Some(message)) => f.write_str(message),
            (None, None) => f.write_str("unspecified error"),
        }
    }
}

/// Main error type for the Float SDK
#[derive(Error, Debug)]
pub enum FloatError {
    /// Request never produced an HTTP response
    #[error("HTTP transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// API returned a structured error response
    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: ApiErrorBody },

    /// API returned a non-success status without a structured body
    #[error("HTTP status {status}")]
    Http { status: u16 },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Alias binding misconfigured or unknown
    #[error("Binding error: {0}")]
    Binding(String),

    /// Arguments passed to a bound operation could not be decoded
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FloatError {
    /// HTTP status of the failed response, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            FloatError::Api { status, .. } | FloatError::Http { status } => Some(*status),
            FloatError::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Check if the error was raised locally before any request was made
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            FloatError::Binding(_) | FloatError::InvalidArgument(_) | FloatError::Config(_)
        )
    }

    /// Build an error from a non-success response body.
    ///
    /// A JSON object body is preferred; anything else only keeps the status.
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let parsed = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .filter(serde_json::Value::is_object)
            .and_then(|value| serde_json::from_value::<ApiErrorBody>(value).ok());

        match parsed {
            Some(body) => FloatError::Api {
                status: status.as_u16(),
                body,
            },
            None => FloatError::Http {
                status: status.as_u16(),
            },
        }
    }
}

/// Result type alias for Float SDK operations
pub type Result<T> = std::result::Result<T, FloatError>;
