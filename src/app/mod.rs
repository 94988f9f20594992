//! The interactive picker loop: terminal events in, engine events through,
//! one terminal outcome out.
//!
//! Listings run as spawned tasks so typing stays responsive while a large
//! directory is being read; the engine's sequence guard makes sure a
//! superseded listing never reaches the visible list.

use crate::config::Config;
use crate::host::PickerError;
use crate::picker::{build_file_items, materialize, Accept, FileItem, ListRequest, Picker};
use crate::services::fs::FsBackend;
use crate::view;
use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_stream::StreamExt;

/// How a picking session ended
#[derive(Debug)]
pub enum Outcome {
    /// An existing (or freshly created) file should be opened
    Open(PathBuf),
    /// The typed value named a directory; it was created, nothing to open
    CreatedDirectory(PathBuf),
    /// The user hid the picker
    Cancelled,
    /// Creating the typed path failed
    Failed(PickerError),
}

struct PendingListing {
    seq: u64,
    handle: JoinHandle<Vec<FileItem>>,
}

/// Run one picking session rooted at `initial_dir` until it reaches a
/// terminal outcome.
pub async fn run(
    terminal: &mut DefaultTerminal,
    fs: Arc<dyn FsBackend>,
    config: Config,
    initial_dir: &str,
) -> Result<Outcome> {
    let (mut picker, request) = Picker::start(initial_dir);
    let mut pending = Some(spawn_listing(&fs, &config, request));
    let mut events = EventStream::new();

    loop {
        let status = format!("{} candidates", picker.items().len());
        terminal.draw(|frame| view::render(frame, &picker, &status))?;

        tokio::select! {
            event = events.next() => {
                let Some(event) = event.transpose()? else {
                    // the terminal went away; treat it as a hide
                    picker.hide();
                    abort_pending(&mut pending);
                    return Ok(Outcome::Cancelled);
                };

                let Event::Key(key) = event else { continue };
                if key.kind == KeyEventKind::Release {
                    continue;
                }

                match key.code {
                    KeyCode::Esc => {
                        picker.hide();
                        abort_pending(&mut pending);
                        return Ok(Outcome::Cancelled);
                    }
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        picker.hide();
                        abort_pending(&mut pending);
                        return Ok(Outcome::Cancelled);
                    }
                    KeyCode::Up => picker.select_prev(),
                    KeyCode::Down => picker.select_next(),
                    KeyCode::Backspace => {
                        let mut value = picker.value().to_string();
                        if value.pop().is_some() {
                            if let Some(request) = picker.value_changed(value) {
                                abort_pending(&mut pending);
                                pending = Some(spawn_listing(&fs, &config, request));
                            }
                        }
                    }
                    KeyCode::Char(c) => {
                        let mut value = picker.value().to_string();
                        value.push(c);
                        if let Some(request) = picker.value_changed(value) {
                            abort_pending(&mut pending);
                            pending = Some(spawn_listing(&fs, &config, request));
                        }
                    }
                    KeyCode::Enter => match picker.accept() {
                        Accept::Descend(request) => {
                            abort_pending(&mut pending);
                            pending = Some(spawn_listing(&fs, &config, request));
                        }
                        Accept::OpenExisting(path) => {
                            abort_pending(&mut pending);
                            return Ok(Outcome::Open(path));
                        }
                        Accept::CreateNew(value) => {
                            abort_pending(&mut pending);
                            return Ok(finalize_create(fs.as_ref(), &value).await);
                        }
                        Accept::Ignored => {}
                    },
                    _ => {}
                }
            }
            items = join_pending(&mut pending), if pending.is_some() => {
                let seq = pending.take().map(|p| p.seq).unwrap_or_default();
                picker.listing_ready(seq, items);
            }
        }
    }
}

fn spawn_listing(fs: &Arc<dyn FsBackend>, config: &Config, request: ListRequest) -> PendingListing {
    let fs = Arc::clone(fs);
    let group_directories_first = config.group_directories_first;
    let ListRequest { seq, value } = request;
    let handle = tokio::spawn(async move {
        build_file_items(fs.as_ref(), &value, group_directories_first).await
    });
    PendingListing { seq, handle }
}

fn abort_pending(pending: &mut Option<PendingListing>) {
    if let Some(p) = pending.take() {
        p.handle.abort();
    }
}

async fn join_pending(pending: &mut Option<PendingListing>) -> Vec<FileItem> {
    match pending.as_mut() {
        // an aborted or panicked listing is just an empty one
        Some(p) => (&mut p.handle).await.unwrap_or_default(),
        None => std::future::pending().await,
    }
}

/// The create branch of finalization: materialize, then hand the file back
/// for opening. A creation failure is reported, nothing is opened.
async fn finalize_create(fs: &dyn FsBackend, value: &str) -> Outcome {
    match materialize::materialize(fs, value).await {
        Ok(Some(path)) => Outcome::Open(path),
        Ok(None) => Outcome::CreatedDirectory(PathBuf::from(value)),
        Err(source) => Outcome::Failed(PickerError::CreateFailed {
            path: value.to_string(),
            source,
        }),
    }
}
