//! Candidate items and the listing pipeline
//!
//! [`build_file_items`] is the whole split → list → match → stat → order
//! cycle: it turns the raw typed value into the candidate list the widget
//! shows. It never fails; an unreadable directory is an empty list.

use crate::picker::{matcher, path};
use crate::services::fs::{FileKind, FsBackend};
use std::path::{Path, PathBuf};

/// One entry in the candidate list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileItem {
    pub absolute_path: PathBuf,
    pub kind: FileKind,
    /// Icon prefix + basename, or `..` for the synthetic parent; never the
    /// bare absolute path
    pub label: String,
}

impl FileItem {
    pub fn new(absolute_path: PathBuf, kind: FileKind) -> Self {
        let basename = absolute_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let label = format!("{} {}", icon(kind), basename);
        Self {
            absolute_path,
            kind,
            label,
        }
    }

    /// Item with an explicit display name, used for the synthetic `..`
    pub fn with_display_name(absolute_path: PathBuf, kind: FileKind, name: &str) -> Self {
        let label = format!("{} {}", icon(kind), name);
        Self {
            absolute_path,
            kind,
            label,
        }
    }
}

fn icon(kind: FileKind) -> &'static str {
    match kind {
        FileKind::File => "·",
        FileKind::Directory => "▸",
        FileKind::SymlinkFile => "→",
        FileKind::SymlinkDirectory => "⇒",
        FileKind::Unknown => "?",
    }
}

/// Build the full candidate list for the typed value.
///
/// Steps: split the value; list the directory (missing or unreadable
/// directories list as empty); prefix-match against the fragment; stat each
/// match for its resolved kind; optionally stable-partition directories
/// first; prepend the `..` parent item when the fragment is empty, the
/// directory is not the filesystem root, and the directory had children
/// before filtering.
pub async fn build_file_items(
    fs: &dyn FsBackend,
    value: &str,
    group_directories_first: bool,
) -> Vec<FileItem> {
    let (directory, fragment) = path::split_input(value);

    let listed = match fs.read_dir(Path::new(&directory)).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(directory = %directory, error = %e, "listing failed, showing empty");
            Vec::new()
        }
    };
    let had_children = !listed.is_empty();

    let matched = matcher::filter_entries(listed, &fragment);

    let mut items = Vec::with_capacity(matched.len());
    for entry in matched {
        let absolute_path = Path::new(&directory).join(&entry.name);
        // re-stat rather than trusting the readdir kind so symlink targets
        // are resolved; a failing stat keeps the item with kind Unknown
        let kind = fs
            .stat(&absolute_path)
            .await
            .unwrap_or(FileKind::Unknown);
        items.push(FileItem::new(absolute_path, kind));
    }

    if group_directories_first {
        let (dirs, rest): (Vec<_>, Vec<_>) = items.into_iter().partition(|i| i.kind.is_dir());
        items = dirs;
        items.extend(rest);
    }

    if fragment.is_empty() && !path::is_fs_root(&directory) && had_children {
        let parent = path::parent_of(&directory);
        items.insert(
            0,
            FileItem::with_display_name(PathBuf::from(parent), FileKind::Directory, ".."),
        );
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fs::DirEntry;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::io;
    use std::path::MAIN_SEPARATOR;

    /// Fixed in-memory tree with deterministic readdir order
    struct StaticFs {
        dirs: HashMap<String, Vec<DirEntry>>,
    }

    impl StaticFs {
        fn new(dirs: &[(&str, &[(&str, FileKind)])]) -> Self {
            let dirs = dirs
                .iter()
                .map(|(dir, children)| {
                    (
                        dir.to_string(),
                        children
                            .iter()
                            .map(|(name, kind)| DirEntry::new(*name, *kind))
                            .collect(),
                    )
                })
                .collect();
            Self { dirs }
        }

        /// The OS tolerates a trailing separator on directory paths, so the
        /// double has to as well.
        fn key(path: &Path) -> String {
            let raw = path.to_string_lossy();
            let trimmed = raw.trim_end_matches(MAIN_SEPARATOR);
            if trimmed.is_empty() {
                MAIN_SEPARATOR.to_string()
            } else {
                trimmed.to_string()
            }
        }

        fn lookup(&self, path: &Path) -> Option<(&str, FileKind)> {
            for (dir, children) in &self.dirs {
                for child in children {
                    if Path::new(dir).join(&child.name) == path {
                        return Some((child.name.as_str(), child.kind));
                    }
                }
            }
            None
        }
    }

    #[async_trait]
    impl FsBackend for StaticFs {
        async fn stat(&self, path: &Path) -> io::Result<FileKind> {
            if self.dirs.contains_key(&Self::key(path)) {
                return Ok(FileKind::Directory);
            }
            self.lookup(path)
                .map(|(_, kind)| kind)
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such path"))
        }

        async fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
            self.dirs
                .get(&Self::key(path))
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such directory"))
        }

        async fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
            unimplemented!("not used in listing tests")
        }

        async fn write_file(&self, _path: &Path, _contents: &[u8]) -> io::Result<()> {
            unimplemented!("not used in listing tests")
        }

        async fn exists(&self, path: &Path) -> bool {
            self.stat(path).await.is_ok()
        }
    }

    fn ws() -> String {
        format!("{}ws", MAIN_SEPARATOR)
    }

    fn ws_fs() -> StaticFs {
        StaticFs::new(&[(
            &ws(),
            &[
                ("a.txt", FileKind::File),
                ("b", FileKind::Directory),
                ("abc", FileKind::Directory),
            ],
        )])
    }

    fn labels(items: &[FileItem]) -> Vec<&str> {
        items.iter().map(|i| i.label.as_str()).collect()
    }

    #[tokio::test]
    async fn test_listing_with_empty_fragment_prepends_parent() {
        let fs = ws_fs();
        let value = format!("{}{}", ws(), MAIN_SEPARATOR);

        let items = build_file_items(&fs, &value, false).await;

        // ".." first, then readdir order preserved
        assert_eq!(labels(&items), vec!["▸ ..", "· a.txt", "▸ b", "▸ abc"]);
        assert_eq!(
            items[0].absolute_path,
            PathBuf::from(MAIN_SEPARATOR.to_string())
        );
    }

    #[tokio::test]
    async fn test_grouping_puts_directories_first_stably() {
        let fs = ws_fs();
        let value = format!("{}{}", ws(), MAIN_SEPARATOR);

        let items = build_file_items(&fs, &value, true).await;

        assert_eq!(labels(&items), vec!["▸ ..", "▸ b", "▸ abc", "· a.txt"]);

        // no file-before-directory inversion
        for i in 0..items.len() {
            for j in i + 1..items.len() {
                assert!(!(items[i].kind.is_file() && items[j].kind.is_dir()));
            }
        }
    }

    #[tokio::test]
    async fn test_fragment_filters_by_prefix() {
        let fs = ws_fs();
        let value = format!("{}{}a", ws(), MAIN_SEPARATOR);

        let items = build_file_items(&fs, &value, false).await;

        assert_eq!(labels(&items), vec!["· a.txt", "▸ abc"]);
    }

    #[tokio::test]
    async fn test_uppercase_fragment_matches_nothing_here() {
        let fs = ws_fs();
        let value = format!("{}{}A", ws(), MAIN_SEPARATOR);

        let items = build_file_items(&fs, &value, false).await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_fragment_suppresses_parent_item() {
        let fs = ws_fs();
        let value = format!("{}{}b", ws(), MAIN_SEPARATOR);

        let items = build_file_items(&fs, &value, false).await;
        assert!(items.iter().all(|i| i.label != "▸ .."));
    }

    #[tokio::test]
    async fn test_missing_directory_lists_empty() {
        let fs = ws_fs();
        let value = format!("{0}nope{1}", ws(), MAIN_SEPARATOR);

        let items = build_file_items(&fs, &value, false).await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_empty_directory_gets_no_parent_item() {
        let fs = StaticFs::new(&[(&format!("{}empty", MAIN_SEPARATOR), &[])]);
        let value = format!("{0}empty{0}", MAIN_SEPARATOR);

        let items = build_file_items(&fs, &value, false).await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_root_listing_gets_no_parent_item() {
        let fs = StaticFs::new(&[(
            &MAIN_SEPARATOR.to_string(),
            &[("etc", FileKind::Directory)],
        )]);

        let items = build_file_items(&fs, &MAIN_SEPARATOR.to_string(), false).await;
        assert_eq!(labels(&items), vec!["▸ etc"]);
    }

    #[tokio::test]
    async fn test_no_duplicate_absolute_paths() {
        let fs = ws_fs();
        let value = format!("{}{}", ws(), MAIN_SEPARATOR);

        let items = build_file_items(&fs, &value, true).await;
        let mut paths: Vec<_> = items.iter().map(|i| &i.absolute_path).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), items.len());
    }
}
