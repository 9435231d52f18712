//! Error types for specimen-stats.
//!
//! Only problems with the surrounding I/O are errors. A cell that is empty or
//! not numeric never produces a `StatsError`: the aggregator treats the record
//! as ineligible and moves on.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// The main error type for loading, aggregating and writing specimen tables.
#[derive(Error, Debug)]
pub enum StatsError {
    /// A source file could not be read or a destination could not be written.
    #[error("Cannot {operation} '{}': {source}", .path.display())]
    FileAccess {
        /// Path that was being opened
        path: PathBuf,
        /// What we were trying to do ("read", "write")
        operation: &'static str,
        /// The underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The CSV stream itself was malformed (not the values inside it).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error related to configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error from serialization operations.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// A type alias for `Result<T, StatsError>`.
pub type Result<T> = std::result::Result<T, StatsError>;

impl StatsError {
    /// Creates a file access error for `path`.
    pub fn file_access(
        path: impl AsRef<Path>,
        operation: &'static str,
        source: std::io::Error,
    ) -> Self {
        Self::FileAccess {
            path: path.as_ref().to_path_buf(),
            operation,
            source,
        }
    }

    /// Creates a configuration error with the given message.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Returns true when the error came from opening a file.
    pub fn is_file_access(&self) -> bool {
        matches!(self, Self::FileAccess { .. })
    }
}

impl From<serde_json::Error> for StatsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
