//! Startup bootstrap of the upload tree.
//!
//! Runs once before the listener is bound. Missing directories are created
//! recursively and a failure to do so aborts startup. Each directory is then
//! checked for write access, first through its permission bits and then by
//! writing a probe file. A failed check only degrades the service: it is
//! logged and recorded in the [`BootstrapReport`], and later writes will
//! surface their own errors.

use std::io::ErrorKind;
use std::path::Path;

use tokio::fs;
use tracing::{debug, info, warn};

use crate::error::{StartupError, StorageError};
use crate::layout::StorageLayout;

/// Probe file left in the image directory after a successful write check.
pub const PROBE_FILE: &str = "test.txt";

/// Probe file written to, then removed from, the upload root.
const TRANSIENT_PROBE_FILE: &str = ".write-probe";

const PROBE_CONTENT: &[u8] = b"Test content";

/// Outcome of [`bootstrap`], kept in the server state for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    /// Whether every directory passed both write checks.
    pub writable: bool,
    /// Image directory entries found after bootstrap, sorted.
    pub images: Vec<String>,
}

/// Create and verify the upload tree described by `layout`.
///
/// Existing directories and their contents are left untouched, so running
/// this against an already-populated tree is a no-op apart from the probes.
///
/// # Errors
///
/// Returns [`StartupError`] if a directory is missing and cannot be
/// created, or if a required path exists but is not a directory.
pub async fn bootstrap(layout: &StorageLayout) -> Result<BootstrapReport, StartupError> {
    for dir in layout.directories() {
        ensure_dir(dir).await?;
    }

    let mut writable = true;
    for dir in layout.directories() {
        let keep_probe = dir == layout.images_dir.as_path();
        match check_writable(dir, keep_probe).await {
            Ok(()) => info!(path = %dir.display(), "write access confirmed"),
            Err(reason) => {
                writable = false;
                warn!(
                    path = %dir.display(),
                    reason = %reason,
                    "no write access, uploads to this directory will fail"
                );
            }
        }
    }

    let images = match list_dir(&layout.images_dir).await {
        Ok(entries) => entries,
        Err(e) => {
            warn!(error = %e, "could not list image directory");
            Vec::new()
        }
    };
    info!(count = images.len(), entries = ?images, "image directory contents at startup");

    Ok(BootstrapReport { writable, images })
}

/// List the entry names of a directory, sorted.
///
/// # Errors
///
/// Returns [`StorageError::List`] if the directory cannot be read.
pub async fn list_dir(dir: &Path) -> Result<Vec<String>, StorageError> {
    let mut reader = fs::read_dir(dir)
        .await
        .map_err(|e| StorageError::list(dir, &e))?;

    let mut names = Vec::new();
    while let Some(entry) = reader
        .next_entry()
        .await
        .map_err(|e| StorageError::list(dir, &e))?
    {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

async fn ensure_dir(dir: &Path) -> Result<(), StartupError> {
    match fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() => {
            debug!(path = %dir.display(), "directory already present");
            Ok(())
        }
        Ok(_) => Err(StartupError::NotADirectory {
            path: dir.display().to_string(),
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| StartupError::CreateDir {
                    path: dir.display().to_string(),
                    reason: e.to_string(),
                })?;
            info!(path = %dir.display(), "created directory");
            Ok(())
        }
        Err(e) => Err(StartupError::CreateDir {
            path: dir.display().to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Returns a human-readable reason on failure.
async fn check_writable(dir: &Path, keep_probe: bool) -> Result<(), String> {
    let meta = fs::metadata(dir)
        .await
        .map_err(|e| format!("metadata unavailable: {e}"))?;
    if meta.permissions().readonly() {
        return Err("directory permissions are read-only".to_owned());
    }

    let probe = if keep_probe {
        dir.join(PROBE_FILE)
    } else {
        dir.join(TRANSIENT_PROBE_FILE)
    };
    fs::write(&probe, PROBE_CONTENT)
        .await
        .map_err(|e| format!("probe write to '{}' failed: {e}", probe.display()))?;

    if !keep_probe {
        if let Err(e) = fs::remove_file(&probe).await {
            debug!(path = %probe.display(), error = %e, "could not remove probe file");
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = StorageLayout::under(tmp.path().join("public"));

        let report = bootstrap(&layout).await.unwrap();

        assert!(layout.uploads_dir.is_dir());
        assert!(layout.images_dir.is_dir());
        assert!(report.writable);
        assert_eq!(report.images, vec![PROBE_FILE.to_owned()]);
    }

    #[tokio::test]
    async fn probe_file_written_to_image_dir_only() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = StorageLayout::under(tmp.path());

        bootstrap(&layout).await.unwrap();

        let probe = std::fs::read(layout.images_dir.join(PROBE_FILE)).unwrap();
        assert_eq!(probe, PROBE_CONTENT);
        assert!(!layout.uploads_dir.join(TRANSIENT_PROBE_FILE).exists());
    }

    #[tokio::test]
    async fn rerun_preserves_existing_content() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = StorageLayout::under(tmp.path());
        bootstrap(&layout).await.unwrap();

        std::fs::write(&layout.log_file, "existing record\n").unwrap();
        std::fs::write(layout.images_dir.join("image-1.png"), b"png").unwrap();

        let report = bootstrap(&layout).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(&layout.log_file).unwrap(),
            "existing record\n"
        );
        assert_eq!(
            std::fs::read(layout.images_dir.join("image-1.png")).unwrap(),
            b"png"
        );
        assert_eq!(report.images, vec!["image-1.png", PROBE_FILE]);
    }

    #[tokio::test]
    async fn uncreatable_directory_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("public");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let result = bootstrap(&StorageLayout::under(&blocker)).await;

        assert!(matches!(result, Err(StartupError::CreateDir { .. })));
    }

    #[tokio::test]
    async fn file_in_place_of_directory_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = StorageLayout::under(tmp.path());
        std::fs::write(&layout.uploads_dir, b"oops").unwrap();

        let result = bootstrap(&layout).await;

        assert!(matches!(result, Err(StartupError::NotADirectory { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn read_only_directory_degrades_without_failing() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let layout = StorageLayout::under(tmp.path());
        std::fs::create_dir_all(&layout.images_dir).unwrap();
        std::fs::set_permissions(&layout.images_dir, std::fs::Permissions::from_mode(0o555))
            .unwrap();

        let report = bootstrap(&layout).await.unwrap();

        assert!(!report.writable);
        std::fs::set_permissions(&layout.images_dir, std::fs::Permissions::from_mode(0o755))
            .unwrap();
    }

    #[tokio::test]
    async fn list_dir_missing_directory_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let result = list_dir(&tmp.path().join("absent")).await;
        assert!(matches!(result, Err(StorageError::List { .. })));
    }
}
