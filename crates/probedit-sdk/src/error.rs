//! Error types for the Probedit SDK.

use thiserror::Error;

/// SDK operation errors
#[derive(Debug, Error)]
pub enum SdkError {
    /// Server answered with a non-success status
    #[error("Server error (HTTP {status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Message from the `error` field of the body, or the raw body
        message: String,
    },

    /// The server holds no problem record
    #[error("No problem found on server")]
    NotFound,

    /// Connection error (network, DNS, timeout, etc.)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Response body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            SdkError::Decode(e.to_string())
        } else if e.is_status() {
            SdkError::Server {
                status: e.status().map(|s| s.as_u16()).unwrap_or_default(),
                message: e.to_string(),
            }
        } else {
            SdkError::Connection(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::Decode(format!("JSON parsing error: {}", e))
    }
}
