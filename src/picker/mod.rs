//! The type-ahead path picker engine
//!
//! `path` and `matcher` are the pure pieces; `item` runs the listing
//! pipeline against a filesystem; `engine` is the session state machine;
//! `materialize` creates typed, not-yet-existing paths on finalization.

pub mod engine;
pub mod item;
pub mod matcher;
pub mod materialize;
pub mod path;

pub use engine::{Accept, ListRequest, Picker, PickerState};
pub use item::{build_file_items, FileItem};
