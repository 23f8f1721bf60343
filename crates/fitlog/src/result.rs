//! Result and error types for fitlog.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for fitlog operations
pub type FitlogResult<T> = Result<T, FitlogError>;

/// Errors that can occur while rendering test output
#[derive(Debug, Error)]
pub enum FitlogError {
    /// A report stylesheet or script could not be loaded
    #[error("Failed to load report asset {path}: {message}")]
    AssetLoad {
        /// Asset path
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// An image referenced by the test output could not be read
    #[error("Failed to read image {path}: {message}")]
    ImageRead {
        /// Resolved image path
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// The wiki-text formatter failed
    #[error("Wiki formatter failed: {message}")]
    Formatter {
        /// Error message
        message: String,
    },

    /// Invalid configuration
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Configuration file could not be parsed
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_yaml_ng::Error),

    /// A recorded event line could not be decoded
    #[error("Invalid event on line {line}: {message}")]
    EventParse {
        /// 1-based line number in the recording
        line: usize,
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FitlogError {
    /// Create a formatter error
    #[must_use]
    pub fn formatter(message: impl Into<String>) -> Self {
        Self::Formatter {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
