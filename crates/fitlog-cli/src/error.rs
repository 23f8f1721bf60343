//! Error types for the CLI

use std::path::PathBuf;
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// An input file could not be opened
    #[error("Cannot open {path}: {source}")]
    Input {
        /// Path given on the command line
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Fitlog library error
    #[error("{0}")]
    Fitlog(#[from] fitlog::FitlogError),

    /// Logging could not be set up
    #[error("Logging setup failed: {message}")]
    Logging {
        /// Error message
        message: String,
    },
}

impl CliError {
    /// Create an input error for `path`
    #[must_use]
    pub fn input(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Input {
            path: path.into(),
            source,
        }
    }

    /// Create a logging setup error
    #[must_use]
    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_passes_through() {
        let err: CliError = fitlog::FitlogError::config("bad config").into();
        assert!(err.to_string().contains("Configuration"));
        assert!(err.to_string().contains("bad config"));
    }

    #[test]
    fn test_input_error_names_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        let err = CliError::input("run.jsonl", io_err);
        assert!(err.to_string().contains("run.jsonl"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(cli_err.to_string().contains("I/O"));
    }

    #[test]
    fn test_fitlog_error_passes_through() {
        let err: CliError = fitlog::FitlogError::EventParse {
            line: 7,
            message: "expected value".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Invalid event on line 7: expected value");
    }
}
