//! Core domain errors.

use thiserror::Error;

/// Core domain errors for FinSight.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Document type is not accepted for ingestion.
    #[error("Unsupported document '{0}': only PDF files can be ingested")]
    UnsupportedDocument(String),

    /// Document has no content.
    #[error("Document '{0}' is empty")]
    EmptyDocument(String),

    /// A request could not be handed to the request runner.
    #[error("Failed to dispatch request: {0}")]
    DispatchFailed(String),
}
