// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Editing and playback session.
//!
//! A session owns the playlist store, the sequencer and a media player, and
//! exposes every user-facing command. After each store edit the recorded list
//! changes are handed to the sequencer, and whatever it answers is executed
//! on the player, so the three never drift apart.

use std::path::Path;

use tracing::info;

use crate::config::Settings;
use crate::error::Result;
use crate::playlist::{
    load_document, Clip, ClipDraft, ClipId, ImportedDocument, PlaylistStore, TransferDocument,
};
use crate::sequencer::{MediaPlayer, PlayerCommand, PlayerEvent, Sequencer, SequencerState};

/// A playlist, its sequencer and the player they drive
pub struct Session<P: MediaPlayer> {
    store: PlaylistStore,
    sequencer: Sequencer,
    player: P,
}

impl<P: MediaPlayer> Session<P> {
    /// Create a session with an empty default playlist
    pub fn new(player: P) -> Self {
        Self::with_store(PlaylistStore::default(), player)
    }

    /// Create a session using configured playlist defaults
    pub fn from_settings(settings: &Settings, player: P) -> Self {
        let store = PlaylistStore::new(settings.playlist.default_name.clone())
            .with_copy_suffix(settings.playlist.copy_suffix.clone());
        Self::with_store(store, player)
    }

    /// Create a session around an existing store
    pub fn with_store(store: PlaylistStore, player: P) -> Self {
        Self {
            store,
            sequencer: Sequencer::new(),
            player,
        }
    }

    /// Get the playlist
    pub fn store(&self) -> &PlaylistStore {
        &self.store
    }

    /// Get the sequencer
    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    /// Get the player
    pub fn player(&self) -> &P {
        &self.player
    }

    /// Get the player mutably
    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    /// Clip under the playback cursor
    pub fn current_clip(&self) -> Option<&Clip> {
        self.sequencer.current_clip(&self.store)
    }

    /// Add a clip from user input
    pub fn add_clip(&mut self, draft: &ClipDraft) -> Result<ClipId> {
        let fields = draft.validate()?;
        let id = self.store.add(fields);
        self.sync();
        Ok(id)
    }

    /// Replace a clip's fields from user input
    pub fn edit_clip(&mut self, id: ClipId, draft: &ClipDraft) -> Result<()> {
        let fields = draft.validate()?;
        self.store.update(id, fields)?;
        self.sync();
        Ok(())
    }

    /// Append a copy of a clip
    pub fn duplicate_clip(&mut self, id: ClipId) -> Result<ClipId> {
        let copy = self.store.duplicate(id)?;
        self.sync();
        Ok(copy)
    }

    /// Remove a clip
    pub fn remove_clip(&mut self, id: ClipId) -> Result<()> {
        self.store.remove(id)?;
        self.sync();
        Ok(())
    }

    /// Move the clip at `index` one place earlier
    pub fn move_up(&mut self, index: usize) -> bool {
        let moved = self.store.move_up(index);
        self.sync();
        moved
    }

    /// Move the clip at `index` one place later
    pub fn move_down(&mut self, index: usize) -> bool {
        let moved = self.store.move_down(index);
        self.sync();
        moved
    }

    /// Rename the playlist
    pub fn rename(&mut self, name: impl Into<String>) {
        self.store.rename(name);
    }

    /// Play the mashup from the first clip
    pub fn play(&mut self) -> Result<()> {
        let commands = self.sequencer.play(&self.store)?;
        self.execute(commands);
        Ok(())
    }

    /// Stop playback
    pub fn stop(&mut self) {
        let commands = self.sequencer.stop();
        self.execute(commands);
    }

    /// Whether play is currently possible
    pub fn can_play(&self) -> bool {
        !self.store.is_empty()
    }

    /// Feed an event from the player
    pub fn handle_event(&mut self, event: PlayerEvent) {
        let commands = self.sequencer.on_event(event, &self.store);
        self.execute(commands);
    }

    /// Export the playlist as a transfer document
    pub fn export(&self) -> TransferDocument {
        self.store.export_snapshot()
    }

    /// Export the playlist as pretty-printed JSON
    pub fn export_json(&self) -> Result<String> {
        self.export().to_json()
    }

    /// Export the playlist to a file
    pub fn export_to_file<Q: AsRef<Path>>(&self, path: Q) -> anyhow::Result<()> {
        self.export().save(path)
    }

    /// Import a JSON document; on failure the playlist is untouched
    pub fn import_json(&mut self, json: &str) -> Result<()> {
        let document = TransferDocument::decode(json)?;
        self.import(document);
        Ok(())
    }

    /// Import from a file; on failure the playlist is untouched
    pub fn import_file<Q: AsRef<Path>>(&mut self, path: Q) -> anyhow::Result<()> {
        let document = load_document(path)?;
        self.import(document);
        Ok(())
    }

    /// Replace the playlist with an already validated document
    pub fn import(&mut self, document: ImportedDocument) {
        document.apply_to(&mut self.store);
        self.sync();
    }

    /// One-line playback status
    pub fn status_line(&self) -> String {
        match (self.sequencer.state(), self.current_clip()) {
            (SequencerState::Playing, Some(clip)) => format!(
                "Now playing: {} ({}s - {}s)",
                clip.display_title(self.sequencer.current_index()),
                clip.start_time(),
                clip.end_time()
            ),
            _ => "Ready to play".to_string(),
        }
    }

    fn sync(&mut self) {
        for change in self.store.take_changes() {
            let commands = self.sequencer.on_list_changed(change, &self.store);
            self.execute(commands);
        }
    }

    fn execute(&mut self, commands: Vec<PlayerCommand>) {
        for command in &commands {
            self.player.execute(command);
        }
        if !commands.is_empty() {
            info!(target: "mashup::status", "{}", self.status_line());
        }
    }
}
