//! Runtime configuration for the TUI.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use finsight_core::{CoreError, StagedDocument};

/// Backend used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Where logs go unless told otherwise.
pub const DEFAULT_LOG_FILE: &str = "/tmp/finsight-tui.log";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid backend URL '{0}': must start with http:// or https://")]
    InvalidBaseUrl(String),

    #[error("Cannot open document {path}: {reason}")]
    DocumentRead { path: PathBuf, reason: String },
}

/// Settings for one TUI session.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL, without a trailing slash.
    pub base_url: String,

    /// Log file path.
    pub log_file: PathBuf,

    /// PDF to stage at startup.
    pub document: Option<PathBuf>,

    /// How long the UI waits for terminal input per frame.
    pub tick: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            document: None,
            tick: Duration::from_millis(50),
        }
    }
}

impl Config {
    /// Check the settings and normalize the base URL.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        self.base_url = normalize_base_url(&self.base_url)?;
        Ok(self)
    }
}

/// Trim whitespace and trailing slashes, and require an http(s) scheme.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_scheme = trimmed.starts_with("http://") || trimmed.starts_with("https://");
    let has_host = trimmed
        .split_once("://")
        .is_some_and(|(_, rest)| !rest.is_empty());

    if has_scheme && has_host {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigError::InvalidBaseUrl(raw.to_string()))
    }
}

/// Read a file from disk and stage it as a PDF.
///
/// The document name is the file name without its directory.
pub fn load_document(path: &Path) -> Result<StagedDocument, ConfigError> {
    let read_error = |reason: String| ConfigError::DocumentRead {
        path: path.to_path_buf(),
        reason,
    };

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| read_error("not a file".to_string()))?;

    // Check the extension before touching the disk.
    if !name.to_lowercase().ends_with(finsight_core::document::PDF_EXTENSION) {
        return Err(read_error(
            CoreError::UnsupportedDocument(name).to_string(),
        ));
    }

    let bytes = std::fs::read(path).map_err(|e| read_error(e.to_string()))?;
    StagedDocument::pdf(name, bytes).map_err(|e| read_error(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.tick, Duration::from_millis(50));
        assert!(config.document.is_none());
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("http://localhost:8000/").unwrap(),
            "http://localhost:8000"
        );
        assert_eq!(
            normalize_base_url(" https://api.example.com// ").unwrap(),
            "https://api.example.com"
        );
        assert!(normalize_base_url("localhost:8000").is_err());
        assert!(normalize_base_url("ftp://host").is_err());
        assert!(normalize_base_url("http://").is_err());
    }

    #[test]
    fn test_validated_rejects_bad_url() {
        let config = Config {
            base_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            config.validated(),
            Err(ConfigError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_load_document() {
        let dir = std::env::temp_dir().join(format!("finsight-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let pdf = dir.join("Q3.pdf");
        std::fs::write(&pdf, b"%PDF-1.7").unwrap();
        let doc = load_document(&pdf).unwrap();
        assert_eq!(doc.name(), "Q3.pdf");
        assert_eq!(doc.bytes(), b"%PDF-1.7");

        let empty = dir.join("empty.pdf");
        std::fs::write(&empty, b"").unwrap();
        assert!(load_document(&empty).is_err());

        let missing = dir.join("missing.pdf");
        assert!(matches!(
            load_document(&missing),
            Err(ConfigError::DocumentRead { .. })
        ));

        let text = dir.join("notes.txt");
        std::fs::write(&text, b"hello").unwrap();
        let err = load_document(&text).unwrap_err().to_string();
        assert!(err.contains("only PDF files"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
