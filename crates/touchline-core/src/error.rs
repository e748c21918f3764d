//! Error handling for Touchline.
//!
//! The interactive board engine never surfaces errors mid-gesture (stale
//! input is ignored, conflicts roll back), so this taxonomy covers the
//! non-interactive edges: storage, configuration, and serialization.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Top-level error type shared across Touchline crates.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration is invalid or could not be resolved.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Layout storage failure.
    #[error("Layout store error: {0}")]
    Store(String),

    /// Catch-all for errors that do not fit another variant.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Creates an [`Error::Other`] from any displayable message.
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Creates an [`Error::Config`] from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Creates an [`Error::Store`] from any displayable message.
    pub fn store(msg: impl Into<String>) -> Self {
        Error::Store(msg.into())
    }
}

/// Result type alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;
