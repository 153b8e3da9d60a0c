//! Image directory writer.
//!
//! Every saved image gets a fresh `image-<ms>.png` name and is created with
//! create-new semantics, so an existing file is never overwritten. A name
//! that is already taken on disk (left by an earlier run) is skipped in
//! favour of the namer's next one.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::bootstrap::list_dir;
use crate::error::StorageError;
use crate::ids::ImageNamer;

/// Attempts at finding an unused filename before giving up.
const MAX_NAME_ATTEMPTS: usize = 8;

/// Writes decoded images into the image directory.
#[derive(Debug)]
pub struct ImageStore {
    dir: PathBuf,
    namer: ImageNamer,
}

impl ImageStore {
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self::with_namer(dir, ImageNamer::new())
    }

    #[must_use]
    pub fn with_namer(dir: impl AsRef<Path>, namer: ImageNamer) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            namer,
        }
    }

    /// Write `bytes` to a new file and return its filename.
    ///
    /// A failed write removes the partially written file.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] if the file cannot be created or
    /// written, or if no unused name is found.
    pub async fn save(&self, bytes: &[u8]) -> Result<String, StorageError> {
        for _ in 0..MAX_NAME_ATTEMPTS {
            let filename = self.namer.next_filename();
            let path = self.dir.join(&filename);

            let mut file = match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!(filename = %filename, "image name taken, trying next");
                    continue;
                }
                Err(e) => return Err(StorageError::write(&path, &e)),
            };

            let written = async {
                file.write_all(bytes).await?;
                file.flush().await
            }
            .await;

            if let Err(e) = written {
                drop(file);
                if let Err(rm) = fs::remove_file(&path).await {
                    warn!(path = %path.display(), error = %rm, "could not remove partial image");
                }
                return Err(StorageError::write(&path, &e));
            }

            info!(filename = %filename, size = bytes.len(), "image saved");
            self.log_listing().await;

            return Ok(filename);
        }

        Err(StorageError::Write {
            path: self.dir.display().to_string(),
            reason: format!("no unused filename after {MAX_NAME_ATTEMPTS} attempts"),
        })
    }

    /// Current directory entries, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::List`] if the directory cannot be read.
    pub async fn list(&self) -> Result<Vec<String>, StorageError> {
        list_dir(&self.dir).await
    }

    async fn log_listing(&self) {
        match self.list().await {
            Ok(entries) => {
                debug!(count = entries.len(), entries = ?entries, "image directory contents");
            }
            Err(e) => warn!(error = %e, "could not list image directory"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ids::image_filename;

    #[tokio::test]
    async fn save_writes_bytes_under_generated_name() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ImageStore::new(tmp.path());

        let filename = store.save(b"\x89PNG data").await.unwrap();

        assert!(filename.starts_with("image-"));
        assert!(filename.ends_with(".png"));
        let on_disk = std::fs::read(tmp.path().join(&filename)).unwrap();
        assert_eq!(on_disk, b"\x89PNG data");
    }

    #[tokio::test]
    async fn rapid_saves_produce_distinct_files() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ImageStore::new(tmp.path());

        let first = store.save(b"one").await.unwrap();
        let second = store.save(b"two").await.unwrap();

        assert_ne!(first, second);
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn existing_file_is_never_overwritten() {
        let tmp = tempfile::tempdir().unwrap();
        let far_future = 9_000_000_000_000;
        let taken = image_filename(far_future + 1);
        std::fs::write(tmp.path().join(&taken), b"keep me").unwrap();
        let store = ImageStore::with_namer(tmp.path(), ImageNamer::starting_after(far_future));

        let filename = store.save(b"new").await.unwrap();

        assert_eq!(filename, image_filename(far_future + 2));
        assert_eq!(std::fs::read(tmp.path().join(&taken)).unwrap(), b"keep me");
    }

    #[tokio::test]
    async fn missing_directory_is_a_write_error() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ImageStore::new(tmp.path().join("absent"));

        let result = store.save(b"data").await;

        assert!(matches!(result, Err(StorageError::Write { .. })));
    }
}
