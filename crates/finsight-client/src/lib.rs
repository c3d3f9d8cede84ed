//! Backend client library for FinSight.
//!
//! Provides the HTTP client for the ingestion and query endpoints, the
//! [`RagBackend`] trait the TUI runs requests against, and [`execute`],
//! which turns a core request into its resolution.

pub mod backend;
pub mod error;
pub mod http;
pub mod types;

pub use backend::{execute, RagBackend};
pub use error::ClientError;
pub use http::HttpClient;
pub use types::{QueryResponse, UploadReceipt};
