//! On-disk layout of the upload tree.
//!
//! ```text
//! <public>/uploads/log.txt
//! <public>/uploads/images/image-<ms>.png
//! <public>/uploads/images/test.txt
//! ```

use std::path::{Path, PathBuf};

/// Name of the upload root under the public directory.
const UPLOADS_DIR: &str = "uploads";

/// Name of the image directory under the upload root.
const IMAGES_DIR: &str = "images";

/// Name of the shared client log file under the upload root.
const LOG_FILE: &str = "log.txt";

/// Resolved paths of the upload tree. Computed once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    /// Upload root (`<public>/uploads`).
    pub uploads_dir: PathBuf,
    /// Image directory (`<public>/uploads/images`).
    pub images_dir: PathBuf,
    /// Shared append-only log (`<public>/uploads/log.txt`).
    pub log_file: PathBuf,
}

impl StorageLayout {
    /// Build the layout rooted at the given public directory.
    #[must_use]
    pub fn under(public_dir: impl AsRef<Path>) -> Self {
        let uploads_dir = public_dir.as_ref().join(UPLOADS_DIR);
        let images_dir = uploads_dir.join(IMAGES_DIR);
        let log_file = uploads_dir.join(LOG_FILE);
        Self {
            uploads_dir,
            images_dir,
            log_file,
        }
    }

    /// Directories that must exist before any handler runs, parents first.
    #[must_use]
    pub fn directories(&self) -> [&Path; 2] {
        [&self.uploads_dir, &self.images_dir]
    }
}
