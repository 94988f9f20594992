//! Literal prefix matching for the typed fragment
//!
//! A fragment that is entirely lower-case matches case-insensitively; any
//! upper-case character makes the match exact. No fuzzy scoring here.

use crate::services::fs::DirEntry;

/// Does `name` start with `fragment` under the smart-case rule?
pub fn matches(name: &str, fragment: &str) -> bool {
    let case_sensitive = fragment != fragment.to_lowercase();

    if case_sensitive {
        name.starts_with(fragment)
    } else {
        name.to_lowercase().starts_with(fragment)
    }
}

/// Keep the listed entries whose names match the fragment.
///
/// The empty fragment is the identity filter.
pub fn filter_entries(entries: Vec<DirEntry>, fragment: &str) -> Vec<DirEntry> {
    if fragment.is_empty() {
        return entries;
    }

    entries
        .into_iter()
        .filter(|e| matches(&e.name, fragment))
        .collect()
}
