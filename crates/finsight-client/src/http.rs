//! HTTP client for the ingestion and query endpoints.

use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

use finsight_core::document::PDF_MIME;
use finsight_core::StagedDocument;

use crate::error::ClientError;
use crate::types::{QueryResponse, UploadReceipt};

/// Multipart field carrying the uploaded file.
const UPLOAD_FIELD: &str = "file";

/// Query-string parameter carrying the question.
const QUESTION_PARAM: &str = "question";

/// HTTP client for the backend REST API.
///
/// Built without a request timeout: a hung backend call stays pending.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new(base_url: &str) -> Self {
        Self {
            inner: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL all paths are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check if the backend is up.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let url = format!("{}/", self.base_url);
        debug!(url = %url, "Checking health");

        let response = self.inner.get(&url).send().await?;
        Ok(response.status().is_success())
    }

    /// Upload a document for ingestion.
    ///
    /// Returns the parsed receipt when the body has the usual shape.
    pub async fn upload(
        &self,
        document: &StagedDocument,
    ) -> Result<Option<UploadReceipt>, ClientError> {
        let path = "/upload";
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, document = %document.name(), bytes = document.len(), "POST request");

        let part = Part::bytes(document.bytes().to_vec())
            .file_name(document.name().to_string())
            .mime_str(PDF_MIME)?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self.inner.post(&url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        let body = response.bytes().await?;
        let receipt = serde_json::from_slice::<UploadReceipt>(&body).ok();
        if let Some(ref receipt) = receipt {
            info!(
                document = %document.name(),
                chunks = ?receipt.chunks,
                message = ?receipt.message,
                "Upload accepted"
            );
        }
        Ok(receipt)
    }

    /// Ask a question and return the answer text.
    pub async fn query(&self, question: &str) -> Result<String, ClientError> {
        let path = "/query";
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "GET request");

        let response = self
            .inner
            .get(&url)
            .query(&[(QUESTION_PARAM, question)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        let body: QueryResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Serialization(e.to_string()))?;
        Ok(body.answer)
    }
}
