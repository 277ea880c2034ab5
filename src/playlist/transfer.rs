// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Transfer documents: the portable export/import form of a playlist.
//!
//! A transfer document is JSON with a `name` and an ordered `items` array.
//! Items carry no ids; ids are assigned fresh on import.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::clip::{ClipDraft, ClipFields};
use super::store::PlaylistStore;
use crate::error::{MashupError, Result};

/// Portable playlist snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferDocument {
    /// Playlist name
    pub name: String,
    /// Clips in playback order
    pub items: Vec<ClipFields>,
}

/// Document as read from disk, before item validation
#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    name: Option<String>,
    items: Vec<ClipDraft>,
}

/// A validated document whose name may be absent
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedDocument {
    /// Name from the document, if it had a non-empty one
    pub name: Option<String>,
    /// Validated clips in order
    pub items: Vec<ClipFields>,
}

impl ImportedDocument {
    /// Replace the store's contents, keeping its name when the document has none
    pub fn apply_to(self, store: &mut PlaylistStore) {
        let name = self.name.unwrap_or_else(|| store.name().to_string());
        info!(name = %name, clips = self.items.len(), "Playlist imported");
        store.replace_all(name, self.items);
    }
}

impl TransferDocument {
    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        // Only non-finite times fail to encode, and validation rejects those
        serde_json::to_string_pretty(self)
            .map_err(|e| MashupError::import(format!("failed to encode playlist: {}", e)))
    }

    /// Parse and validate a document
    ///
    /// Every item must validate; a single bad item rejects the whole document.
    pub fn decode(json: &str) -> Result<ImportedDocument> {
        let raw: RawDocument = serde_json::from_str(json).map_err(|e| {
            warn!(error = %e, "Rejected transfer document");
            MashupError::import(e.to_string())
        })?;

        let mut items = Vec::with_capacity(raw.items.len());
        for (index, draft) in raw.items.iter().enumerate() {
            let fields = draft.validate().map_err(|e| {
                warn!(index, error = %e, "Rejected transfer document item");
                MashupError::import(format!("item {}: {}", index + 1, e))
            })?;
            items.push(fields);
        }

        let name = raw.name.filter(|n| !n.trim().is_empty());
        Ok(ImportedDocument { name, items })
    }

    /// Parse a document that must carry a name
    pub fn from_json(json: &str) -> Result<Self> {
        let imported = Self::decode(json)?;
        let name = imported
            .name
            .ok_or_else(|| MashupError::import("document has no name"))?;
        Ok(Self {
            name,
            items: imported.items,
        })
    }

    /// Default file name for exporting this playlist
    pub fn file_name(&self) -> String {
        export_file_name(&self.name)
    }

    /// Write the document to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json()?;
        fs::write(path.as_ref(), json)
            .with_context(|| format!("Failed to write playlist file: {:?}", path.as_ref()))
    }
}

/// Read and validate a document from a file
pub fn load_document<P: AsRef<Path>>(path: P) -> anyhow::Result<ImportedDocument> {
    let contents = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read playlist file: {:?}", path.as_ref()))?;
    let imported = TransferDocument::decode(&contents)
        .with_context(|| format!("Failed to import playlist file: {:?}", path.as_ref()))?;
    Ok(imported)
}

/// File name for an exported playlist: lowercased, whitespace runs as `-`
pub fn export_file_name(name: &str) -> String {
    let slug = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    format!("{}-mashup.json", slug)
}
