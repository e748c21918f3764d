//! Error types for the store crate.
//!
//! Structured errors for layout persistence and configuration handling.
//! Callers on the interactive path never see these: the file store degrades
//! to an empty layout on load failure, and save failures are logged and
//! swallowed by the engine.

use std::io;
use thiserror::Error;

/// Errors that can occur during layout store and configuration operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The layout file could not be loaded.
    #[error("Failed to load layout: {0}")]
    LoadError(String),

    /// The layout file could not be saved.
    #[error("Failed to save layout: {0}")]
    SaveError(String),

    /// The storage directory could not be found or created.
    #[error("Storage directory error: {0}")]
    StorageDirectory(String),

    /// A configuration value is invalid.
    #[error("Invalid config '{key}': {reason}")]
    InvalidConfig { key: String, reason: String },

    /// The configuration file format is not supported.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl From<StoreError> for touchline_core::Error {
    fn from(err: StoreError) -> Self {
        touchline_core::Error::store(err.to_string())
    }
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::LoadError("file not found".to_string());
        assert_eq!(err.to_string(), "Failed to load layout: file not found");

        let err = StoreError::InvalidConfig {
            key: "grid.columns".to_string(),
            reason: "must be positive".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid config 'grid.columns': must be positive"
        );

        let err = StoreError::StorageDirectory("permission denied".to_string());
        assert_eq!(err.to_string(), "Storage directory error: permission denied");
    }

    #[test]
    fn test_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: StoreError = io_err.into();
        assert!(matches!(err, StoreError::IoError(_)));

        let core_err: touchline_core::Error =
            StoreError::SaveError("disk full".to_string()).into();
        assert!(matches!(core_err, touchline_core::Error::Store(_)));
    }
}
