//! Filesystem access for the picker

pub mod backend;
pub mod local;

pub use backend::{DirEntry, FileKind, FsBackend};
pub use local::LocalFs;
