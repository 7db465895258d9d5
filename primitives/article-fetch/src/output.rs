//! Output file persistence.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::ArticleError;

/// Default destination, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "output.json";

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Replaces the contents of `path` with `contents`.
///
/// The text goes to a uniquely named sibling first and is then renamed over
/// `path`, so a reader sees either the previous file or the new one in full.
/// Concurrent writers race; the last rename wins.
pub async fn write_output(path: &Path, contents: &str) -> Result<(), ArticleError> {
    let temp = temp_sibling(path);

    if let Err(source) = tokio::fs::write(&temp, contents.as_bytes()).await {
        let _ = tokio::fs::remove_file(&temp).await;
        return Err(io_error(path, source));
    }

    if let Err(source) = tokio::fs::rename(&temp, path).await {
        let _ = tokio::fs::remove_file(&temp).await;
        return Err(io_error(path, source));
    }

    debug!(path = %path.display(), bytes = contents.len(), "output written");
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string());
    let seq = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.with_file_name(format!(".{name}.{}.{seq}.tmp", std::process::id()))
}

fn io_error(path: &Path, source: std::io::Error) -> ArticleError {
    ArticleError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn creates_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.json");

        write_output(&path, "{\n  \"a\": 1\n}").await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\n  \"a\": 1\n}");
    }

    #[tokio::test]
    async fn truncates_previous_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.json");
        std::fs::write(&path, "x".repeat(4096)).unwrap();

        write_output(&path, "[]").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[tokio::test]
    async fn leaves_no_temporary_files_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.json");

        write_output(&path, "1").await.unwrap();
        write_output(&path, "2").await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("output.json")]);
    }

    #[tokio::test]
    async fn missing_directory_is_an_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent").join("output.json");

        let err = write_output(&path, "[]").await.unwrap_err();

        match err {
            ArticleError::Io { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("expected io error, got {other:?}"),
        }
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn concurrent_writers_never_interleave() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.json");
        let first = "a".repeat(256 * 1024);
        let second = "b".repeat(128 * 1024);

        let (left, right) = tokio::join!(
            write_output(&path, &first),
            write_output(&path, &second)
        );
        left.unwrap();
        right.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written == first || written == second);
    }
}
