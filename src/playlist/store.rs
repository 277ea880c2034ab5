// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Playlist store: the ordered clip list and its edits.
//!
//! The store is the single source of truth for clip order. It does not know
//! about playback; every mutation is recorded as a [`ListChange`] that the
//! owner drains with [`PlaylistStore::take_changes`] and hands to the
//! sequencer.

use tracing::debug;

use super::clip::{Clip, ClipFields, ClipId, DEFAULT_COPY_SUFFIX};
use super::transfer::TransferDocument;
use crate::error::{MashupError, Result};

/// Default name for a fresh playlist
pub const DEFAULT_PLAYLIST_NAME: &str = "My Mashup";

/// A structural change to the clip list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListChange {
    /// A clip was appended at `index`
    Added { id: ClipId, index: usize },
    /// The fields of a clip were replaced in place
    Updated { id: ClipId, index: usize },
    /// The clip formerly at `index` was removed
    Removed { id: ClipId, index: usize },
    /// Clips at `from` and `to` swapped places
    Moved { from: usize, to: usize },
    /// The whole list was replaced
    Replaced,
}

/// Ordered, named collection of clips
#[derive(Debug, Clone)]
pub struct PlaylistStore {
    name: String,
    clips: Vec<Clip>,
    next_id: u64,
    copy_suffix: String,
    changes: Vec<ListChange>,
}

impl Default for PlaylistStore {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYLIST_NAME)
    }
}

impl PlaylistStore {
    /// Create an empty playlist
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clips: Vec::new(),
            next_id: 1,
            copy_suffix: DEFAULT_COPY_SUFFIX.to_string(),
            changes: Vec::new(),
        }
    }

    /// Set the marker appended to duplicated titles
    pub fn with_copy_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.copy_suffix = suffix.into();
        self
    }

    /// Get playlist name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the playlist
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Get all clips in playback order
    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    /// Get the clip at a position
    pub fn clip_at(&self, index: usize) -> Option<&Clip> {
        self.clips.get(index)
    }

    /// Get a clip by id
    pub fn get(&self, id: ClipId) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id() == id)
    }

    /// Get the position of a clip by id
    pub fn position(&self, id: ClipId) -> Option<usize> {
        self.clips.iter().position(|c| c.id() == id)
    }

    /// Number of clips
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// Check if the playlist has no clips
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Total running time of all clips, ignoring empty windows
    pub fn total_duration(&self) -> f64 {
        self.clips.iter().map(|c| c.duration().max(0.0)).sum()
    }

    fn allocate_id(&mut self) -> ClipId {
        let id = ClipId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a clip, returning its new id
    pub fn add(&mut self, fields: ClipFields) -> ClipId {
        let id = self.allocate_id();
        self.clips.push(Clip::new(id, fields));
        let index = self.clips.len() - 1;
        debug!(%id, index, "Clip added");
        self.changes.push(ListChange::Added { id, index });
        id
    }

    /// Replace every field of a clip
    pub fn update(&mut self, id: ClipId, fields: ClipFields) -> Result<()> {
        let index = self.position(id).ok_or(MashupError::NotFound { id })?;
        self.clips[index].set_fields(fields);
        debug!(%id, index, "Clip updated");
        self.changes.push(ListChange::Updated { id, index });
        Ok(())
    }

    /// Append a copy of a clip, returning the copy's id
    pub fn duplicate(&mut self, id: ClipId) -> Result<ClipId> {
        let index = self.position(id).ok_or(MashupError::NotFound { id })?;
        let new_id = self.allocate_id();
        let copy = self.clips[index].duplicate(new_id, &self.copy_suffix);
        self.clips.push(copy);
        let new_index = self.clips.len() - 1;
        debug!(source = %id, id = %new_id, index = new_index, "Clip duplicated");
        self.changes.push(ListChange::Added {
            id: new_id,
            index: new_index,
        });
        Ok(new_id)
    }

    /// Remove a clip
    pub fn remove(&mut self, id: ClipId) -> Result<()> {
        let index = self.position(id).ok_or(MashupError::NotFound { id })?;
        self.clips.remove(index);
        debug!(%id, index, "Clip removed");
        self.changes.push(ListChange::Removed { id, index });
        Ok(())
    }

    /// Swap a clip with the one before it; returns false at the top
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.clips.len() {
            return false;
        }
        self.swap(index, index - 1);
        true
    }

    /// Swap a clip with the one after it; returns false at the bottom
    pub fn move_down(&mut self, index: usize) -> bool {
        if index >= self.clips.len().saturating_sub(1) {
            return false;
        }
        self.swap(index, index + 1);
        true
    }

    fn swap(&mut self, from: usize, to: usize) {
        self.clips.swap(from, to);
        debug!(from, to, "Clips swapped");
        self.changes.push(ListChange::Moved { from, to });
    }

    /// Replace the name and every clip at once; all clips get fresh ids
    pub fn replace_all(&mut self, name: impl Into<String>, clips: Vec<ClipFields>) {
        self.name = name.into();
        let mut replaced = Vec::with_capacity(clips.len());
        for fields in clips {
            let id = self.allocate_id();
            replaced.push(Clip::new(id, fields));
        }
        self.clips = replaced;
        debug!(name = %self.name, clips = self.clips.len(), "Playlist replaced");
        self.changes.push(ListChange::Replaced);
    }

    /// Snapshot the playlist in its portable, id-free form
    pub fn export_snapshot(&self) -> TransferDocument {
        TransferDocument {
            name: self.name.clone(),
            items: self.clips.iter().map(|c| c.fields().clone()).collect(),
        }
    }

    /// Drain the changes recorded since the last call
    pub fn take_changes(&mut self) -> Vec<ListChange> {
        std::mem::take(&mut self.changes)
    }
}
