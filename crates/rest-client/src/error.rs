//! Transport error types.

use thiserror::Error;

/// Errors raised below the HTTP status line: the request never produced a
/// response, or the response could not be read.
#[derive(Debug, Error)]
pub enum RestError {
    /// The HTTP verb is not one of GET, POST, PUT, DELETE.
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// Request timed out.
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Connection error (network issue).
    #[error("Connection error: {0}")]
    Connection(String),

    /// The response body could not be read.
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// The proxy URL was rejected.
    #[error("Invalid proxy: {0}")]
    InvalidProxy(String),

    /// Failed to build the HTTP client or request.
    #[error("Request build error: {0}")]
    RequestBuild(String),
}

impl RestError {
    /// Check if this is a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, RestError::Timeout(_))
    }
}

impl From<reqwest::Error> for RestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RestError::Timeout(err.to_string())
        } else if err.is_connect() {
            RestError::Connection(err.to_string())
        } else if err.is_body() || err.is_decode() {
            RestError::Body(err.to_string())
        } else if err.is_builder() {
            RestError::RequestBuild(err.to_string())
        } else {
            RestError::Connection(err.to_string())
        }
    }
}
