//! Atomic writes of downloaded artifacts.
//!
//! Invariants:
//! - The destination either holds the complete artifact or is untouched.
//! - The temporary file lives in the destination directory so the final
//!   rename never crosses filesystems, and it is removed on any failure.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{ClientError, Result};

/// Write `bytes` to `path` through a temporary sibling file and rename it into place.
///
/// Returns the absolute destination path.
pub async fn write_atomic(path: &Path, bytes: Vec<u8>) -> Result<PathBuf> {
    let target = std::path::absolute(path)?;
    let dir = target
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            ClientError::InvalidArgument(format!("{} is not a file path", target.display()))
        })?;

    let dest = target.clone();
    let size = bytes.len();
    tokio::task::spawn_blocking(move || -> io::Result<()> {
        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&dest).map_err(|e| e.error)?;
        Ok(())
    })
    .await
    .map_err(io::Error::other)??;

    debug!(path = %target.display(), size, "artifact written");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_atomic_creates_file_and_returns_absolute_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.jsonl");

        let written = write_atomic(&path, b"{\"a\":1}\n".to_vec()).await.unwrap();

        assert!(written.is_absolute());
        assert_eq!(std::fs::read(&written).unwrap(), b"{\"a\":1}\n");
        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[tokio::test]
    async fn test_write_atomic_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "old").unwrap();

        write_atomic(&path, b"new".to_vec()).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[tokio::test]
    async fn test_write_atomic_missing_directory_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");

        let err = write_atomic(&path, b"x".to_vec()).await.unwrap_err();

        assert!(matches!(err, ClientError::Io(_)));
        assert!(!path.exists());
    }
}
