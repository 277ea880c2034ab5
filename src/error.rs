// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for playlist editing and playback.

use thiserror::Error;

use crate::playlist::ClipId;

/// Errors raised by playlist and sequencer operations.
///
/// None of these are fatal. Each one is reported at the call that caused it
/// and leaves the playlist and cursor exactly as they were.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MashupError {
    /// Clip input could not be turned into a valid clip
    #[error("Invalid clip: {reason}")]
    InvalidClip { reason: String },

    /// No clip with this id exists in the playlist
    #[error("Clip not found: {id}")]
    NotFound { id: ClipId },

    /// Play was requested on an empty playlist
    #[error("Playlist is empty")]
    EmptyPlaylist,

    /// A transfer document could not be imported
    #[error("Import failed: {reason}")]
    Import { reason: String },
}

impl MashupError {
    pub(crate) fn invalid_clip(reason: impl Into<String>) -> Self {
        MashupError::InvalidClip {
            reason: reason.into(),
        }
    }

    pub(crate) fn import(reason: impl Into<String>) -> Self {
        MashupError::Import {
            reason: reason.into(),
        }
    }
}

/// Result alias for playlist and sequencer operations
pub type Result<T> = std::result::Result<T, MashupError>;
