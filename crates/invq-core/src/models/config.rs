//! Configuration structures for the ingestion service.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{InvqError, Result};

/// Main configuration for the invq service.
///
/// Datastore credentials are read from the environment only,
/// see `invq_datastore::DatastoreConfig`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvqConfig {
    /// HTTP server configuration.
    pub server: ServerConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the server listens on.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8000".to_string(),
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum number of non-whitespace characters for a PDF to count as readable.
    pub min_text_length: usize,

    /// Largest document accepted, in bytes.
    pub max_document_bytes: u64,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            min_text_length: 20,
            max_document_bytes: 25 * 1024 * 1024,
        }
    }
}

impl InvqConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| InvqError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| InvqError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: InvqConfig = serde_json::from_str(r#"{"pdf": {"min_text_length": 5}}"#).unwrap();

        assert_eq!(config.pdf.min_text_length, 5);
        assert_eq!(config.pdf.max_document_bytes, PdfConfig::default().max_document_bytes);
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = InvqConfig::default();
        config.server.bind = "127.0.0.1:9000".to_string();
        config.save(&path).unwrap();

        assert_eq!(InvqConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(InvqConfig::from_file(&path), Err(InvqError::Config(_))));
    }
}
