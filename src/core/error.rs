//! Error types and error handling for the Folio document store.
//!
//! Every public `StorageManager` operation either succeeds or fails with
//! one of these variants. Presentation (exit codes, HTTP status) is left
//! to the adapter that calls into core.

use thiserror::Error;

/// Result type alias for Folio operations
pub type Result<T> = std::result::Result<T, FolioError>;

/// Main error type for the Folio store
#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Asset not found: {id}/{name}")]
    AssetNotFound { id: String, name: String },

    #[error("Document already exists: {0}")]
    DocumentAlreadyExists(String),

    #[error("Value too large for cache: {size} bytes exceeds budget of {max} bytes")]
    TooLarge { size: usize, max: usize },

    /// The on-disk tree, catalog and in-memory state have diverged and
    /// could not be reconciled automatically.
    #[error("Storage inconsistent: {0}")]
    Inconsistent(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl FolioError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            FolioError::DocumentNotFound(_) | FolioError::AssetNotFound { .. }
        )
    }

    /// Check if this is a conflict error (already exists)
    pub fn is_conflict(&self) -> bool {
        matches!(self, FolioError::DocumentAlreadyExists(_))
    }

    /// Check if this is an underlying disk or encoding failure
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            FolioError::IoError(_) | FolioError::SerdeError(_) | FolioError::YamlError(_)
        )
    }

    /// Check if the stores were left out of sync and need operator attention
    pub fn is_fatal(&self) -> bool {
        matches!(self, FolioError::Inconsistent(_))
    }
}
