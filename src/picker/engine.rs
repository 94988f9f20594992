//! The navigation engine: one picking session as an explicit state machine
//!
//! [`Picker`] owns the typed path value and the candidate list. It is a
//! synchronous core deliberately free of I/O: the driver (the app loop, or a
//! test) performs the listings it requests and reports them back through
//! [`Picker::listing_ready`]. Descending into a subdirectory reassigns the
//! value and re-enters `Listing`; there is no recursion and no directory
//! stack.
//!
//! Listing results are guarded by a monotonically increasing sequence
//! number: only the most recently requested listing is applied, so a result
//! that arrives after the value changed again, or after the session was
//! hidden, is discarded.

use crate::picker::item::FileItem;
use crate::picker::path;
use std::path::PathBuf;

/// Where the session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerState {
    /// A listing request is outstanding
    Listing,
    /// Candidates shown, waiting for an edit or an accept
    AwaitingInput,
    /// Session closed: opened, created, or hidden
    Done,
}

/// A listing the driver must run and feed back via `listing_ready`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub seq: u64,
    pub value: String,
}

/// Decision produced by an accept event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accept {
    /// A directory was chosen; the session re-enters the listing cycle
    Descend(ListRequest),
    /// An existing file was chosen; open it
    OpenExisting(PathBuf),
    /// Nothing was selected; materialize the literal typed value
    CreateNew(String),
    /// Accept fired outside `AwaitingInput`; nothing to do
    Ignored,
}

/// One type-ahead picking session
#[derive(Debug)]
pub struct Picker {
    value: String,
    items: Vec<FileItem>,
    selected: Option<usize>,
    state: PickerState,
    seq: u64,
}

impl Picker {
    /// Begin a session rooted at `initial_dir`, returning the first listing
    /// request. The initial value always carries a trailing separator.
    pub fn start(initial_dir: &str) -> (Self, ListRequest) {
        let value = path::ensure_trailing_sep(initial_dir);
        let picker = Self {
            value: value.clone(),
            items: Vec::new(),
            selected: None,
            state: PickerState::Listing,
            seq: 1,
        };
        let request = ListRequest { seq: 1, value };
        (picker, request)
    }

    pub fn state(&self) -> PickerState {
        self.state
    }

    /// The path string the user currently sees
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn items(&self) -> &[FileItem] {
        &self.items
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&FileItem> {
        self.selected.and_then(|i| self.items.get(i))
    }

    /// The user edited the value. Supersedes any outstanding listing.
    pub fn value_changed(&mut self, value: String) -> Option<ListRequest> {
        if self.state == PickerState::Done {
            return None;
        }

        self.value = value;
        self.state = PickerState::Listing;
        self.seq += 1;
        Some(ListRequest {
            seq: self.seq,
            value: self.value.clone(),
        })
    }

    /// Apply a finished listing. Returns false (and changes nothing) when
    /// the result is stale or the session already ended.
    pub fn listing_ready(&mut self, seq: u64, items: Vec<FileItem>) -> bool {
        if self.state == PickerState::Done || seq != self.seq {
            tracing::trace!(seq, current = self.seq, "discarding stale listing");
            return false;
        }

        self.selected = if items.is_empty() { None } else { Some(0) };
        self.items = items;
        self.state = PickerState::AwaitingInput;
        true
    }

    /// The user accepted. Decides between descend, open, and create.
    pub fn accept(&mut self) -> Accept {
        if self.state != PickerState::AwaitingInput {
            return Accept::Ignored;
        }

        let Some(item) = self.selected_item() else {
            // nothing matched what was typed: the literal value is the
            // create target, and the session is over either way
            self.state = PickerState::Done;
            return Accept::CreateNew(self.value.clone());
        };

        if item.kind.is_dir() {
            let chosen = item.absolute_path.to_string_lossy().into_owned();
            // idempotent at the root: no separator appended there
            self.value = if path::is_fs_root(&chosen) {
                chosen
            } else {
                path::ensure_trailing_sep(&chosen)
            };
            self.state = PickerState::Listing;
            self.seq += 1;
            return Accept::Descend(ListRequest {
                seq: self.seq,
                value: self.value.clone(),
            });
        }

        // File, SymlinkFile, and Unknown all take the open branch; opening
        // reports a precise error where descending could not
        let target = item.absolute_path.clone();
        self.state = PickerState::Done;
        Accept::OpenExisting(target)
    }

    /// The picker was hidden. No side effects; the value resets to the
    /// empty sentinel so a later session starts clean.
    pub fn hide(&mut self) {
        self.state = PickerState::Done;
        self.value.clear();
        self.items.clear();
        self.selected = None;
    }

    /// Move the selection down, clamped to the last item
    pub fn select_next(&mut self) {
        if let Some(idx) = self.selected {
            if idx + 1 < self.items.len() {
                self.selected = Some(idx + 1);
            }
        } else if !self.items.is_empty() {
            self.selected = Some(0);
        }
    }

    /// Move the selection up, clamped to the first item
    pub fn select_prev(&mut self) {
        if let Some(idx) = self.selected {
            self.selected = Some(idx.saturating_sub(1));
        } else if !self.items.is_empty() {
            self.selected = Some(self.items.len() - 1);
        }
    }
}
