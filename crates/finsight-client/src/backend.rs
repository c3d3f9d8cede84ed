//! Backend abstraction and request execution.

use async_trait::async_trait;
use tracing::debug;

use finsight_core::{Outcome, Request, RequestKind, Resolution, StagedDocument};

use crate::error::ClientError;
use crate::http::HttpClient;

/// The remote collaborator that ingests documents and answers questions.
#[async_trait]
pub trait RagBackend: Send + Sync {
    /// Upload and index a document.
    async fn ingest(&self, document: &StagedDocument) -> Result<(), ClientError>;

    /// Answer a question against the ingested document.
    async fn query(&self, question: &str) -> Result<String, ClientError>;

    /// Whether the backend is reachable.
    async fn health(&self) -> Result<bool, ClientError>;
}

#[async_trait]
impl RagBackend for HttpClient {
    async fn ingest(&self, document: &StagedDocument) -> Result<(), ClientError> {
        self.upload(document).await.map(|_| ())
    }

    async fn query(&self, question: &str) -> Result<String, ClientError> {
        HttpClient::query(self, question).await
    }

    async fn health(&self) -> Result<bool, ClientError> {
        HttpClient::health(self).await
    }
}

/// Run one request against the backend and report how it resolved.
///
/// Never fails: transport and protocol errors become a failed [`Outcome`].
pub async fn execute(backend: &dyn RagBackend, request: Request) -> Resolution {
    let Request { id, kind } = request;
    match kind {
        RequestKind::Ingest { document } => {
            let outcome: Outcome<()> = backend.ingest(&document).await.into();
            debug!(request_id = %id, success = matches!(outcome, Outcome::Success(_)), "Ingestion resolved");
            Resolution::Ingestion {
                request_id: id,
                document_name: document.name().to_string(),
                outcome,
            }
        }
        RequestKind::Query { question } => {
            let outcome: Outcome<String> = backend.query(&question).await.into();
            debug!(request_id = %id, success = matches!(outcome, Outcome::Success(_)), "Query resolved");
            Resolution::Query {
                request_id: id,
                outcome,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finsight_core::RequestId;

    struct FixedBackend {
        answer: Option<&'static str>,
    }

    #[async_trait]
    impl RagBackend for FixedBackend {
        async fn ingest(&self, _document: &StagedDocument) -> Result<(), ClientError> {
            match self.answer {
                Some(_) => Ok(()),
                None => Err(ClientError::Status {
                    status: 503,
                    path: "/upload".to_string(),
                }),
            }
        }

        async fn query(&self, _question: &str) -> Result<String, ClientError> {
            self.answer
                .map(str::to_string)
                .ok_or_else(|| ClientError::Serialization("missing field `answer`".to_string()))
        }

        async fn health(&self) -> Result<bool, ClientError> {
            Ok(self.answer.is_some())
        }
    }

    #[tokio::test]
    async fn test_execute_query_success() {
        let backend = FixedBackend { answer: Some("12%") };
        let request = Request {
            id: RequestId::new("q1"),
            kind: RequestKind::Query {
                question: "growth?".to_string(),
            },
        };

        let resolution = execute(&backend, request).await;
        assert_eq!(
            resolution,
            Resolution::Query {
                request_id: RequestId::new("q1"),
                outcome: Outcome::Success("12%".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_execute_ingest_failure_carries_reason() {
        let backend = FixedBackend { answer: None };
        let request = Request {
            id: RequestId::new("i1"),
            kind: RequestKind::Ingest {
                document: StagedDocument::new("Q3.pdf", b"%PDF".to_vec()),
            },
        };

        match execute(&backend, request).await {
            Resolution::Ingestion {
                request_id,
                document_name,
                outcome: Outcome::Failure { reason },
            } => {
                assert_eq!(request_id.as_str(), "i1");
                assert_eq!(document_name, "Q3.pdf");
                assert_eq!(reason, "HTTP 503: /upload");
            }
            other => panic!("unexpected resolution: {:?}", other),
        }
    }
}
