//! Error types for the backend client.

use thiserror::Error;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connection refused, DNS, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("HTTP {status}: {path}")]
    Status { status: u16, path: String },

    /// Response body did not have the expected shape.
    #[error("serialization error: {0}")]
    Serialization(String),
}
