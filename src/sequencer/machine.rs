// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Playback sequencing state machine.
//!
//! The sequencer holds a cursor into a [`PlaylistStore`] it does not own. It
//! reacts to user commands, player events and list changes, and answers each
//! one with the [`PlayerCommand`]s the player must execute.
//!
//! Every time the player has to reload (a new clip under the cursor, or the
//! current clip edited in place) the generation is bumped. Player events
//! carrying any other generation are stale and ignored.

use tracing::{debug, info};

use super::player::{Generation, PlayerCommand, PlayerEvent};
use crate::error::{MashupError, Result};
use crate::playlist::{Clip, ClipId, ListChange, PlaylistStore};

/// Sequencer state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequencerState {
    /// No clip under the cursor
    #[default]
    Idle,
    /// Cursor on a clip, player paused
    Loaded,
    /// Cursor on a clip, player commanded to play
    Playing,
}

/// Cursor-based playback sequencer
#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    state: SequencerState,
    index: usize,
    playing: bool,
    generation: Generation,
    /// Clip the player was last told to load
    loaded: Option<ClipId>,
    /// Generation a seek has already been issued for
    seeked: Option<Generation>,
}

impl Sequencer {
    /// Create an idle sequencer
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current state
    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Cursor position; 0 when idle
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Whether the player is meant to be advancing
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Current generation
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Clip under the cursor, re-checked against the store
    pub fn current_clip<'a>(&self, store: &'a PlaylistStore) -> Option<&'a Clip> {
        match self.state {
            SequencerState::Idle => None,
            SequencerState::Loaded | SequencerState::Playing => store.clip_at(self.index),
        }
    }

    /// Start playback from the first clip
    pub fn play(&mut self, store: &PlaylistStore) -> Result<Vec<PlayerCommand>> {
        if store.is_empty() {
            debug!("Play ignored, playlist is empty");
            return Err(MashupError::EmptyPlaylist);
        }

        self.index = 0;
        self.playing = true;
        self.state = SequencerState::Playing;
        info!(clips = store.len(), "Playback started");
        Ok(self.reload(store))
    }

    /// Stop playback, keeping the cursor where it is
    pub fn stop(&mut self) -> Vec<PlayerCommand> {
        if self.state != SequencerState::Playing {
            return Vec::new();
        }

        self.playing = false;
        self.state = SequencerState::Loaded;
        info!(index = self.index, "Playback stopped");
        vec![PlayerCommand::Pause]
    }

    /// Route a player event
    pub fn on_event(&mut self, event: PlayerEvent, store: &PlaylistStore) -> Vec<PlayerCommand> {
        match event {
            PlayerEvent::Ready { generation } => self.on_ready(generation, store),
            PlayerEvent::Progress {
                generation,
                elapsed,
            } => self.on_progress(generation, elapsed, store),
        }
    }

    /// The player has loaded a source; seek to the clip start once per generation
    pub fn on_ready(&mut self, generation: Generation, store: &PlaylistStore) -> Vec<PlayerCommand> {
        if generation != self.generation || self.seeked == Some(generation) {
            debug!(%generation, current = %self.generation, "Ignoring ready event");
            return Vec::new();
        }

        let Some(start) = self.current_clip(store).map(|c| c.start_time()) else {
            debug!(%generation, "Ignoring ready event, no clip under cursor");
            return Vec::new();
        };

        self.seeked = Some(generation);
        debug!(%generation, start, "Seeking to clip start");
        vec![PlayerCommand::SeekTo(start)]
    }

    /// Periodic position report; advances once the clip end is reached
    ///
    /// Only ticks of the current generation count, so each clip advances at
    /// most once no matter how many ticks arrive after its end.
    pub fn on_progress(
        &mut self,
        generation: Generation,
        elapsed: f64,
        store: &PlaylistStore,
    ) -> Vec<PlayerCommand> {
        if self.state != SequencerState::Playing || generation != self.generation {
            return Vec::new();
        }

        // an empty or inverted window is done on its first tick, wherever the player is
        match self.current_clip(store) {
            Some(clip) if elapsed >= clip.end_time() || clip.duration() <= 0.0 => {
                debug!(%generation, elapsed, end = clip.end_time(), "Clip finished");
                self.advance(store)
            }
            Some(_) => Vec::new(),
            None => self.go_idle("cursor past end of playlist"),
        }
    }

    /// Apply a list change from the store
    pub fn on_list_changed(
        &mut self,
        change: ListChange,
        store: &PlaylistStore,
    ) -> Vec<PlayerCommand> {
        if self.state == SequencerState::Idle {
            return Vec::new();
        }

        match change {
            ListChange::Replaced => self.go_idle("playlist replaced"),
            ListChange::Removed { index, .. } => {
                if index <= self.index {
                    self.index = self.index.saturating_sub(1);
                }
                self.resync(store)
            }
            ListChange::Updated { id, .. } if self.loaded == Some(id) => {
                match self.current_clip(store) {
                    Some(clip) if clip.id() == id => {
                        debug!(%id, "Current clip edited, reloading");
                        self.reload(store)
                    }
                    _ => self.resync(store),
                }
            }
            ListChange::Updated { .. } | ListChange::Added { .. } | ListChange::Moved { .. } => {
                self.resync(store)
            }
        }
    }

    fn advance(&mut self, store: &PlaylistStore) -> Vec<PlayerCommand> {
        self.index += 1;
        if self.index < store.len() {
            info!(index = self.index, "Advancing to next clip");
            self.reload(store)
        } else {
            self.go_idle("end of playlist")
        }
    }

    /// Reload if the clip under the cursor is not the one loaded
    fn resync(&mut self, store: &PlaylistStore) -> Vec<PlayerCommand> {
        match store.clip_at(self.index) {
            None => self.go_idle("cursor out of bounds"),
            Some(clip) if Some(clip.id()) != self.loaded => self.reload(store),
            Some(_) => Vec::new(),
        }
    }

    fn reload(&mut self, store: &PlaylistStore) -> Vec<PlayerCommand> {
        let Some(clip) = store.clip_at(self.index) else {
            return self.go_idle("cursor out of bounds");
        };

        self.generation = self.generation.next();
        self.loaded = Some(clip.id());
        self.seeked = None;
        debug!(
            generation = %self.generation,
            index = self.index,
            id = %clip.id(),
            url = clip.source_url(),
            "Loading clip"
        );

        let mut commands = vec![PlayerCommand::Load {
            url: clip.source_url().to_string(),
            start_hint: clip.start_time(),
            generation: self.generation,
        }];
        if self.playing {
            commands.push(PlayerCommand::Play);
        }
        commands
    }

    fn go_idle(&mut self, reason: &str) -> Vec<PlayerCommand> {
        info!(reason, "Sequencer idle");
        self.state = SequencerState::Idle;
        self.playing = false;
        self.index = 0;
        self.loaded = None;
        self.seeked = None;
        vec![PlayerCommand::Pause]
    }
}
