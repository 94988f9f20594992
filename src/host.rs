//! Host-editor seam: opening a finalized file, and the picker's fatal errors

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};

/// Errors fatal to a finalize attempt.
///
/// Listing failures never reach this type; they are downgraded to an empty
/// candidate list inside the listing pipeline.
#[derive(Debug)]
pub enum PickerError {
    /// Creating the typed path (or its ancestors) failed; nothing is opened
    CreateFailed { path: String, source: io::Error },
    /// The host could not load or focus the file
    OpenFailed { path: PathBuf, message: String },
}

impl std::fmt::Display for PickerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PickerError::CreateFailed { path, source } => {
                write!(f, "could not create {path}: {source}")
            }
            PickerError::OpenFailed { path, message } => {
                write!(f, "could not open {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for PickerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PickerError::CreateFailed { source, .. } => Some(source),
            PickerError::OpenFailed { .. } => None,
        }
    }
}

/// What the host environment does with a finalized, existing file
#[async_trait]
pub trait DocumentHost: Send + Sync {
    /// Load the file as an editable document and bring it to the
    /// foreground
    async fn open_document(&self, path: &Path) -> Result<(), PickerError>;
}

/// Opens files by launching `$VISUAL`/`$EDITOR` (falling back to `vi`).
///
/// Used by the binary after the terminal is restored; a non-zero editor
/// exit or spawn failure is an `OpenFailed`.
pub struct EditorLauncher {
    command: String,
}

impl EditorLauncher {
    pub fn from_env() -> Self {
        let command = std::env::var("VISUAL")
            .or_else(|_| std::env::var("EDITOR"))
            .unwrap_or_else(|_| String::from("vi"));
        Self { command }
    }
}

#[async_trait]
impl DocumentHost for EditorLauncher {
    async fn open_document(&self, path: &Path) -> Result<(), PickerError> {
        tracing::info!(editor = %self.command, path = %path.display(), "opening document");

        let status = tokio::process::Command::new(&self.command)
            .arg(path)
            .status()
            .await
            .map_err(|e| PickerError::OpenFailed {
                path: path.to_path_buf(),
                message: format!("failed to launch {}: {e}", self.command),
            })?;

        if !status.success() {
            return Err(PickerError::OpenFailed {
                path: path.to_path_buf(),
                message: format!("{} exited with {status}", self.command),
            });
        }

        Ok(())
    }
}
