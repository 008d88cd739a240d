//! Error types for the store crate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The config document could not be read.
    #[error("Failed to load config from {path}: {source}")]
    Load {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The config document could not be written.
    #[error("Failed to save config to {path}: {source}")]
    Save {
        /// File that was being written.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The config document is not valid JSON.
    #[error("Corrupted config document: {0}")]
    Corrupted(String),

    /// A dotted key path was empty or malformed.
    #[error("Invalid key path: '{0}'")]
    InvalidPath(String),

    /// The config directory could not be resolved.
    #[error("Config directory error: {0}")]
    ConfigDirectory(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
