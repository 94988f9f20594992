//! Filesystem abstraction for the picker
//!
//! The engine never touches `std::fs`/`tokio::fs` directly; everything goes
//! through [`FsBackend`] so tests and alternate hosts can substitute their
//! own filesystem.

use async_trait::async_trait;
use std::io;
use std::path::Path;

/// What kind of object a directory child or stat target is.
///
/// Symlinks are reported with their resolved target kind so the accept
/// handler can branch on "behaves like a file" vs "behaves like a directory"
/// without a second stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    File,
    Directory,
    /// Symlink whose target is a regular file
    SymlinkFile,
    /// Symlink whose target is a directory
    SymlinkDirectory,
    /// Broken symlink, special file, or a stat that failed mid-listing
    Unknown,
}

impl FileKind {
    /// True for anything the picker can descend into
    pub fn is_dir(self) -> bool {
        matches!(self, FileKind::Directory | FileKind::SymlinkDirectory)
    }

    /// True for anything the picker opens directly
    pub fn is_file(self) -> bool {
        matches!(self, FileKind::File | FileKind::SymlinkFile)
    }
}

/// One immediate child of a listed directory
#[derive(Debug, Clone)]
pub struct DirEntry {
    pub name: String,
    pub kind: FileKind,
}

impl DirEntry {
    pub fn new(name: impl Into<String>, kind: FileKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Narrow filesystem interface the picker consumes.
///
/// Errors are plain `io::Error`; `io::ErrorKind::NotFound` is the one kind
/// callers are expected to distinguish.
#[async_trait]
pub trait FsBackend: Send + Sync {
    /// Stat a path, resolving symlinks to report the target kind
    async fn stat(&self, path: &Path) -> io::Result<FileKind>;

    /// List immediate children of a directory (no recursion)
    async fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Create a directory and every missing ancestor
    async fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Write `contents` to a file, creating it if absent
    async fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Whether the path exists at all (any kind)
    async fn exists(&self, path: &Path) -> bool;
}
