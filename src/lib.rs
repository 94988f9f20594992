//! quickopen: an incremental type-ahead path picker
//!
//! Type or edit a path; the picker resolves it against the filesystem as
//! you go, lets you descend into directories, and on accept either opens
//! the chosen file or creates the typed one (with any missing parent
//! directories) first.
//!
//! The engine lives in [`picker`], behind the [`services::fs::FsBackend`]
//! and [`host::DocumentHost`] seams; [`app`] and [`view`] are the reference
//! terminal host.

pub mod app;
pub mod config;
pub mod host;
pub mod picker;
pub mod services;
pub mod view;
