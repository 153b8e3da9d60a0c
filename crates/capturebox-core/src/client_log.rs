//! Append-only client log file.
//!
//! Each [`LogRecord`] is rendered to a text block and appended to a single
//! shared file. The file is opened in append mode for every record and the
//! whole block goes out in one `write_all`, so nothing is ever truncated or
//! rewritten.
//!
//! # Concurrency
//!
//! There is no lock around the file. Concurrent appends are separate
//! `O_APPEND` writes; the OS does not promise that two large blocks will
//! never interleave, which is acceptable at human request rates.

use std::path::{Path, PathBuf};

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::error::StorageError;
use crate::record::LogRecord;

/// Writer for the shared client log.
#[derive(Debug, Clone)]
pub struct ClientLog {
    path: PathBuf,
}

impl ClientLog {
    /// The file is created on first append if it does not exist.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Append`] if the file cannot be opened or
    /// written.
    pub async fn append(&self, record: &LogRecord) -> Result<(), StorageError> {
        let block = record.render();

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| StorageError::append(&self.path, &e))?;

        file.write_all(block.as_bytes())
            .await
            .map_err(|e| StorageError::append(&self.path, &e))?;

        file.flush()
            .await
            .map_err(|e| StorageError::append(&self.path, &e))?;

        Ok(())
    }
}
