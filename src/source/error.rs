//! Error types for snapshot sources.

use thiserror::Error;

/// Reasons a source produced no snapshot.
///
/// Errors returned by [`fetch`](super::SnapshotSource::fetch) are recoverable:
/// the collector logs them and skips the cycle. [`FetchError::Client`] only
/// comes from [`HttpSourceBuilder::build`](super::HttpSourceBuilder::build),
/// before any cycle runs, and is reported to the caller instead.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed or returned a non-success status.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Response body was not a JSON object.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Connection failed.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,

    /// The HTTP client could not be constructed. Never returned by `fetch`.
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::Connection(err.to_string())
        } else if err.is_decode() {
            FetchError::Parse(err.to_string())
        } else {
            FetchError::Http(err.to_string())
        }
    }
}
