//! Materializing a typed, non-existent path on finalization

use crate::services::fs::FsBackend;
use std::io;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// Create every missing ancestor of `value`, then an empty file at the
/// target. Returns the file path to open, or `None` when the value named a
/// directory (trailing separator, or an already-existing directory): the
/// directory is created and there is nothing to open.
///
/// Never truncates: an existing file at the target is left as it is and
/// simply returned for opening. Creation failures propagate to the caller;
/// nothing must be opened after a failed materialization.
pub async fn materialize(fs: &dyn FsBackend, value: &str) -> io::Result<Option<PathBuf>> {
    if value.ends_with(MAIN_SEPARATOR) {
        fs.create_dir_all(Path::new(value)).await?;
        return Ok(None);
    }

    let target = PathBuf::from(value);
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            fs.create_dir_all(parent).await?;
        }
    }

    match fs.stat(&target).await {
        Ok(kind) if kind.is_dir() => return Ok(None),
        Ok(_) => return Ok(Some(target)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    fs.write_file(&target, &[]).await?;
    Ok(Some(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fs::LocalFs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_creates_missing_ancestors_and_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("new").join("deep").join("file.txt");

        let fs = LocalFs::new();
        let opened = materialize(&fs, target.to_str().unwrap()).await.unwrap();

        assert_eq!(opened, Some(target.clone()));
        assert!(target.is_file());
        assert_eq!(std::fs::read(&target).unwrap(), b"");
    }

    #[tokio::test]
    async fn test_trailing_separator_creates_directory_only() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("only").join("dirs");
        let value = format!("{}{}", target.to_str().unwrap(), MAIN_SEPARATOR);

        let fs = LocalFs::new();
        let opened = materialize(&fs, &value).await.unwrap();

        assert_eq!(opened, None);
        assert!(target.is_dir());
    }

    #[tokio::test]
    async fn test_existing_file_is_not_truncated() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("kept.txt");
        std::fs::write(&target, "precious").unwrap();

        let fs = LocalFs::new();
        let opened = materialize(&fs, target.to_str().unwrap()).await.unwrap();

        assert_eq!(opened, Some(target.clone()));
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "precious");
    }

    #[tokio::test]
    async fn test_existing_directory_without_separator_opens_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("already");
        std::fs::create_dir(&target).unwrap();

        let fs = LocalFs::new();
        let opened = materialize(&fs, target.to_str().unwrap()).await.unwrap();

        assert_eq!(opened, None);
        assert!(target.is_dir());
    }

    #[tokio::test]
    async fn test_creation_failure_propagates() {
        let temp_dir = TempDir::new().unwrap();
        // a file where a parent directory is needed
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let target = blocker.join("child.txt");

        let fs = LocalFs::new();
        assert!(materialize(&fs, target.to_str().unwrap()).await.is_err());
    }
}
