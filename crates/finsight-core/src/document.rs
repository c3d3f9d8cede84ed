//! Documents staged for ingestion.

use std::fmt;
use std::sync::Arc;

use crate::error::CoreError;

/// File extension accepted for ingestion (compared case-insensitively).
pub const PDF_EXTENSION: &str = ".pdf";

/// MIME type sent with staged PDF documents.
pub const PDF_MIME: &str = "application/pdf";

/// A file the user picked but that has not been ingested yet.
///
/// Holds the human-readable name and a shared handle to the file bytes, so
/// cloning into a request is cheap.
#[derive(Clone, PartialEq, Eq)]
pub struct StagedDocument {
    name: String,
    bytes: Arc<[u8]>,
}

impl StagedDocument {
    /// Stage a document without any type filtering.
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Stage a PDF document, rejecting other file types and empty files.
    ///
    /// This is the filter the file picker applies before handing a document
    /// to the session.
    pub fn pdf(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Result<Self, CoreError> {
        let name = name.into();
        if !name.to_lowercase().ends_with(PDF_EXTENSION) {
            return Err(CoreError::UnsupportedDocument(name));
        }
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(CoreError::EmptyDocument(name));
        }
        Ok(Self { name, bytes })
    }

    /// Human-readable file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw file contents.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Keep file contents out of logs.
impl fmt::Debug for StagedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StagedDocument")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_accepts_any_case_extension() {
        let doc = StagedDocument::pdf("Q3-Report.PDF", b"%PDF-1.7".to_vec()).unwrap();
        assert_eq!(doc.name(), "Q3-Report.PDF");
        assert_eq!(doc.len(), 8);
    }

    #[test]
    fn test_pdf_rejects_other_types() {
        let err = StagedDocument::pdf("notes.txt", b"hello".to_vec()).unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedDocument(name) if name == "notes.txt"));
    }

    #[test]
    fn test_pdf_rejects_empty_file() {
        let err = StagedDocument::pdf("empty.pdf", Vec::new()).unwrap_err();
        assert!(matches!(err, CoreError::EmptyDocument(_)));
    }

    #[test]
    fn test_debug_omits_contents() {
        let doc = StagedDocument::new("a.pdf", b"secret".to_vec());
        let debug = format!("{:?}", doc);
        assert!(debug.contains("a.pdf"));
        assert!(!debug.contains("secret"));
    }
}
