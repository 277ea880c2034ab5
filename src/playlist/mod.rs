// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Playlist data and editing.
//!
//! This module provides:
//! - Clips: a source URL with a start/end window
//! - The playlist store: ordered CRUD with change notifications
//! - Transfer documents: id-free JSON export and import

pub mod clip;
pub mod store;
pub mod transfer;

pub use clip::{Clip, ClipDraft, ClipFields, ClipId, TimeValue, DEFAULT_COPY_SUFFIX};
pub use store::{ListChange, PlaylistStore, DEFAULT_PLAYLIST_NAME};
pub use transfer::{export_file_name, load_document, ImportedDocument, TransferDocument};
