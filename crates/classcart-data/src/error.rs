//! HTTP client error types.

use thiserror::Error;

/// Errors that can occur when talking to the remote lesson and order services.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// HTTP error response.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request exceeded the configured timeout.
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl FetchError {
    /// Whether the error is a transport-level failure (the request never
    /// produced a usable response). Timeouts count as transport failures.
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::RequestError(_) | FetchError::Timeout(_))
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}
