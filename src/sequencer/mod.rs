// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Playback sequencing for mashups.
//!
//! This module provides:
//! - The media player capability the sequencer drives
//! - The sequencer state machine itself
//! - A simulated player for running without a video backend

pub mod machine;
pub mod player;
pub mod simulated;

pub use machine::{Sequencer, SequencerState};
pub use player::{Generation, MediaPlayer, PlayerCommand, PlayerEvent, RecordingPlayer};
pub use simulated::SimulatedPlayer;
