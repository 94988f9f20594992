use super::backend::{DirEntry, FileKind, FsBackend};
use async_trait::async_trait;
use std::io;
use std::path::Path;
use tokio::fs;

/// Local filesystem backend over `tokio::fs`
#[derive(Debug, Clone, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FsBackend for LocalFs {
    async fn stat(&self, path: &Path) -> io::Result<FileKind> {
        // symlink_metadata first so links are recognized as links;
        // then resolve the target to classify them
        let link_meta = fs::symlink_metadata(path).await?;

        if !link_meta.is_symlink() {
            return Ok(if link_meta.is_dir() {
                FileKind::Directory
            } else if link_meta.is_file() {
                FileKind::File
            } else {
                FileKind::Unknown
            });
        }

        match fs::metadata(path).await {
            Ok(target) if target.is_dir() => Ok(FileKind::SymlinkDirectory),
            Ok(target) if target.is_file() => Ok(FileKind::SymlinkFile),
            // dangling or pointing at something exotic
            _ => Ok(FileKind::Unknown),
        }
    }

    async fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        let mut read_dir = fs::read_dir(path).await?;

        while let Some(entry) = read_dir.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();

            let kind = match entry.file_type().await {
                Ok(ft) if ft.is_symlink() => {
                    // classify by target; the raw readdir kind is not enough
                    self.stat(&entry.path()).await.unwrap_or(FileKind::Unknown)
                }
                Ok(ft) if ft.is_dir() => FileKind::Directory,
                Ok(ft) if ft.is_file() => FileKind::File,
                _ => FileKind::Unknown,
            };

            entries.push(DirEntry::new(name, kind));
        }

        Ok(entries)
    }

    async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path).await
    }

    async fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        fs::write(path, contents).await
    }

    async fn exists(&self, path: &Path) -> bool {
        fs::try_exists(path).await.unwrap_or(false)
    }
}
