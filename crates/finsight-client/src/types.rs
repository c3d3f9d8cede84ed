//! Response payloads returned by the backend.

use serde::{Deserialize, Serialize};

/// Body of a successful `GET /query`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryResponse {
    pub answer: String,
}

/// Body of a successful `POST /upload`.
///
/// Any 2xx counts as success; this is only parsed for logging, and every
/// field is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct UploadReceipt {
    pub status: Option<String>,
    pub message: Option<String>,
    pub chunks: Option<u64>,
}
