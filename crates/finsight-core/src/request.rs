//! Outbound requests and their resolutions.
//!
//! A [`Request`] is created by the controller each time it dispatches work to
//! the backend; the runner answers it with exactly one [`Resolution`].

use crate::document::StagedDocument;
use crate::ids::RequestId;

/// Work handed to the request runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub id: RequestId,
    pub kind: RequestKind,
}

/// What a request asks the backend to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestKind {
    /// Upload and index a document.
    Ingest { document: StagedDocument },
    /// Ask a question against the ingested document.
    Query { question: String },
}

impl Request {
    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self.kind {
            RequestKind::Ingest { .. } => "ingest",
            RequestKind::Query { .. } => "query",
        }
    }

    /// Build the resolution reporting that this request failed.
    pub fn fail(&self, reason: impl Into<String>) -> Resolution {
        let reason = reason.into();
        match &self.kind {
            RequestKind::Ingest { document } => Resolution::Ingestion {
                request_id: self.id.clone(),
                document_name: document.name().to_string(),
                outcome: Outcome::Failure { reason },
            },
            RequestKind::Query { .. } => Resolution::Query {
                request_id: self.id.clone(),
                outcome: Outcome::Failure { reason },
            },
        }
    }
}

/// Result of one backend call.
///
/// The failure reason is diagnostic only: it is logged, never shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    Failure { reason: String },
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for Outcome<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(e) => Outcome::Failure {
                reason: e.to_string(),
            },
        }
    }
}

/// Resolution of a dispatched request, fed back into the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Ingestion {
        request_id: RequestId,
        /// Name of the document that was actually sent, which may differ
        /// from the one staged by the time this resolves.
        document_name: String,
        outcome: Outcome<()>,
    },
    Query {
        request_id: RequestId,
        /// Answer text on success.
        outcome: Outcome<String>,
    },
}

impl Resolution {
    pub fn request_id(&self) -> &RequestId {
        match self {
            Resolution::Ingestion { request_id, .. } | Resolution::Query { request_id, .. } => {
                request_id
            }
        }
    }

    pub fn is_success(&self) -> bool {
        match self {
            Resolution::Ingestion { outcome, .. } => matches!(outcome, Outcome::Success(_)),
            Resolution::Query { outcome, .. } => matches!(outcome, Outcome::Success(_)),
        }
    }
}
