//! Path-string helpers for the picker
//!
//! The picker works on the raw string the user is editing, not on
//! `PathBuf`s: a trailing separator is significant ("list this directory")
//! and `PathBuf` normalizes it away. These helpers are pure and total.

use std::path::MAIN_SEPARATOR;

/// The platform filesystem root, where upward `..` generation stops.
///
/// POSIX: `/`. Windows: the drive prefix of the process working directory
/// (e.g. `C:`), matching how the drive-relative hierarchy tops out.
pub fn fs_root() -> String {
    #[cfg(windows)]
    {
        std::env::current_dir()
            .ok()
            .and_then(|cwd| {
                cwd.to_string_lossy()
                    .split(MAIN_SEPARATOR)
                    .next()
                    .map(str::to_owned)
            })
            .unwrap_or_else(|| String::from(MAIN_SEPARATOR))
    }
    #[cfg(not(windows))]
    {
        String::from(MAIN_SEPARATOR)
    }
}

/// Split the typed value into `(directory, fragment)`.
///
/// A value ending in the separator is entirely a directory with an empty
/// fragment; otherwise the directory is the parent and the fragment is the
/// final segment still being typed. An empty value (or a bare name with no
/// separator) resolves its directory to `.`, the current-directory
/// convention.
pub fn split_input(value: &str) -> (String, String) {
    if value.ends_with(MAIN_SEPARATOR) {
        return (value.to_string(), String::new());
    }

    match value.rfind(MAIN_SEPARATOR) {
        // "/name" keeps the root itself as the directory
        Some(0) => (MAIN_SEPARATOR.to_string(), value[1..].to_string()),
        Some(i) => (value[..i].to_string(), value[i + 1..].to_string()),
        None => (String::from("."), value.to_string()),
    }
}

/// Is this directory string the filesystem root?
///
/// Tolerates a trailing separator so `/` and `C:\` both count.
pub fn is_fs_root(directory: &str) -> bool {
    let root = fs_root();
    directory == root
        || directory.trim_end_matches(MAIN_SEPARATOR) == root.trim_end_matches(MAIN_SEPARATOR)
}

/// Append the platform separator unless the value already ends with one
pub fn ensure_trailing_sep(value: &str) -> String {
    if value.ends_with(MAIN_SEPARATOR) {
        value.to_string()
    } else {
        format!("{value}{MAIN_SEPARATOR}")
    }
}

/// Parent of a directory string, with the filesystem root as fixed point.
///
/// Accepts directories with or without a trailing separator.
pub fn parent_of(directory: &str) -> String {
    let root = fs_root();
    let trimmed = directory.trim_end_matches(MAIN_SEPARATOR);

    if directory == root || trimmed.is_empty() {
        return root;
    }

    match trimmed.rfind(MAIN_SEPARATOR) {
        Some(0) => MAIN_SEPARATOR.to_string(),
        Some(i) => trimmed[..i].to_string(),
        None => String::from("."),
    }
}
