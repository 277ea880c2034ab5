// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! MASHUP - back-to-back playback of video clip windows.
//!
//! A mashup is an ordered playlist of clips, each a source URL with a start
//! and end time. The [`sequencer`] plays them one after another by driving an
//! external media player, staying consistent while the [`playlist`] is edited
//! mid-playback. A [`session::Session`] ties the two to a player.

pub mod config;
pub mod error;
pub mod playlist;
pub mod sequencer;
pub mod session;

pub use error::{MashupError, Result};
pub use session::Session;
