//! Error types for `capturebox-core`.
//!
//! Each variant carries the path and the underlying reason so an operator
//! can diagnose a failure from the log line alone. The HTTP layer decides
//! how much of that detail reaches the client.

use std::path::Path;

/// Fatal errors raised while preparing the upload directory tree.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// A required directory did not exist and could not be created.
    #[error("failed to create directory '{path}': {reason}")]
    CreateDir { path: String, reason: String },

    /// A required directory path exists but is not a directory.
    #[error("'{path}' exists but is not a directory")]
    NotADirectory { path: String },
}

/// Errors from filesystem operations on the upload tree.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Failed to append a record to the shared log file.
    #[error("failed to append to '{path}': {reason}")]
    Append { path: String, reason: String },

    /// Failed to create or write an image file.
    #[error("failed to write '{path}': {reason}")]
    Write { path: String, reason: String },

    /// Failed to enumerate a directory.
    #[error("failed to list '{path}': {reason}")]
    List { path: String, reason: String },
}

impl StorageError {
    pub(crate) fn append(path: &Path, err: &std::io::Error) -> Self {
        Self::Append {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }

    pub(crate) fn write(path: &Path, err: &std::io::Error) -> Self {
        Self::Write {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }

    pub(crate) fn list(path: &Path, err: &std::io::Error) -> Self {
        Self::List {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }
}

/// Errors from the two ingestion paths (client data and images).
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The submission is missing a required field or is otherwise unusable.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// The submission was valid but could not be persisted.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl IngestError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}
