// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! File watcher for hot re-import of an exported playlist.
//!
//! Watches the directory holding a transfer document and re-reads the
//! document once modifications have settled. Each successful read yields a
//! validated document ready to be imported; failures are reported without
//! touching the playlist.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, warn};

use crate::playlist::{load_document, ImportedDocument};

/// Events emitted by the playlist watcher
#[derive(Debug, Clone)]
pub enum PlaylistEvent {
    /// The document changed and parsed cleanly
    Reloaded(Box<ImportedDocument>),
    /// The document changed but could not be imported
    Error(String),
    /// The document was deleted
    Deleted(PathBuf),
}

/// Transfer document watcher with debouncing and validation
pub struct PlaylistWatcher {
    _watcher: RecommendedWatcher,
    event_receiver: Receiver<PlaylistEvent>,
    watched_path: PathBuf,
}

impl PlaylistWatcher {
    /// Create a watcher for a transfer document
    ///
    /// # Arguments
    /// * `path` - Document to watch; it need not exist yet
    /// * `debounce_ms` - Debounce duration in milliseconds (default: 500)
    pub fn new<P: AsRef<Path>>(path: P, debounce_ms: Option<u64>) -> Result<Self> {
        let watched_path = path.as_ref().to_path_buf();
        let debounce_duration = Duration::from_millis(debounce_ms.unwrap_or(500));

        // Watch the parent; the document may be replaced rather than rewritten
        let directory = match watched_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name = watched_path
            .file_name()
            .ok_or_else(|| anyhow!("Not a file path: {:?}", watched_path))?
            .to_os_string();

        let (event_tx, event_rx): (Sender<PlaylistEvent>, Receiver<PlaylistEvent>) =
            mpsc::channel();
        let (notify_tx, notify_rx): (Sender<Event>, Receiver<Event>) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    let _ = notify_tx.send(event);
                }
            },
            Config::default(),
        )
        .map_err(|e| anyhow!("Failed to create file watcher: {}", e))?;

        watcher
            .watch(&directory, RecursiveMode::NonRecursive)
            .map_err(|e| anyhow!("Failed to watch path {:?}: {}", directory, e))?;

        let target = watched_path.clone();
        std::thread::spawn(move || {
            let mut last_event_time: Option<Instant> = None;

            loop {
                match notify_rx.recv_timeout(Duration::from_millis(100)) {
                    Ok(event) => {
                        let touches_target = event
                            .paths
                            .iter()
                            .any(|p| p.file_name() == Some(file_name.as_os_str()));
                        if !touches_target {
                            continue;
                        }

                        match event.kind {
                            EventKind::Remove(_) if !target.exists() => {
                                last_event_time = None;
                                let _ = event_tx.send(PlaylistEvent::Deleted(target.clone()));
                            }
                            EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {
                                last_event_time = Some(Instant::now());
                            }
                            _ => {}
                        }
                    }
                    Err(mpsc::RecvTimeoutError::Timeout) => {
                        let Some(last_time) = last_event_time else {
                            continue;
                        };
                        if last_time.elapsed() < debounce_duration {
                            continue;
                        }
                        last_event_time = None;

                        if event_tx.send(reload_event(&target)).is_err() {
                            break;
                        }
                    }
                    Err(mpsc::RecvTimeoutError::Disconnected) => {
                        // Watcher was dropped, exit thread
                        break;
                    }
                }
            }
        });

        Ok(Self {
            _watcher: watcher,
            event_receiver: event_rx,
            watched_path,
        })
    }

    /// Try to receive the next event (non-blocking)
    pub fn try_recv(&self) -> Option<PlaylistEvent> {
        self.event_receiver.try_recv().ok()
    }

    /// Receive all pending events
    pub fn recv_all(&self) -> Vec<PlaylistEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.try_recv() {
            events.push(event);
        }
        events
    }

    /// Get the document being watched
    pub fn watched_path(&self) -> &Path {
        &self.watched_path
    }
}

/// Read and validate the document, turning the outcome into an event
fn reload_event(path: &Path) -> PlaylistEvent {
    match load_document(path) {
        Ok(document) => {
            debug!(path = ?path, clips = document.items.len(), "Playlist file reloaded");
            PlaylistEvent::Reloaded(Box::new(document))
        }
        Err(e) => {
            warn!(path = ?path, error = %e, "Playlist file rejected");
            PlaylistEvent::Error(format!("{:#}", e))
        }
    }
}
