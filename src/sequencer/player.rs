// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Media player capability.
//!
//! The sequencer never talks to a concrete player. It emits
//! [`PlayerCommand`]s and consumes [`PlayerEvent`]s; anything implementing
//! [`MediaPlayer`] can execute the commands.

use std::fmt;

/// Load token distinguishing current player events from stale ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Generation(u64);

impl Generation {
    /// Wrap a raw generation value
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw generation value
    pub fn raw(&self) -> u64 {
        self.0
    }

    /// The generation after this one
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// A command for the media player
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    /// Discard the current source and load a new one
    Load {
        /// Source URL
        url: String,
        /// Offset the player may start from before the explicit seek
        start_hint: f64,
        /// Generation every event for this source must carry
        generation: Generation,
    },
    /// Start or resume advancing
    Play,
    /// Stop advancing, keeping the source
    Pause,
    /// Jump to an offset in the current source
    SeekTo(f64),
}

/// An asynchronous notification from the media player
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerEvent {
    /// The source for `generation` is loaded and can accept a seek
    Ready { generation: Generation },
    /// Periodic elapsed position within the source, in seconds
    Progress { generation: Generation, elapsed: f64 },
}

impl PlayerEvent {
    /// Generation the event was issued under
    pub fn generation(&self) -> Generation {
        match self {
            PlayerEvent::Ready { generation } => *generation,
            PlayerEvent::Progress { generation, .. } => *generation,
        }
    }
}

/// Something that can render a source and report progress
pub trait MediaPlayer {
    /// Load a source; later events must be tagged with `generation`
    fn load(&mut self, url: &str, start_hint: f64, generation: Generation);

    /// Start advancing
    fn play(&mut self);

    /// Stop advancing
    fn pause(&mut self);

    /// Seek within the loaded source
    fn seek_to(&mut self, seconds: f64);

    /// Dispatch a command to the matching method
    fn execute(&mut self, command: &PlayerCommand) {
        match command {
            PlayerCommand::Load {
                url,
                start_hint,
                generation,
            } => self.load(url, *start_hint, *generation),
            PlayerCommand::Play => self.play(),
            PlayerCommand::Pause => self.pause(),
            PlayerCommand::SeekTo(seconds) => self.seek_to(*seconds),
        }
    }
}

/// Player that only records the commands it receives
#[derive(Debug, Clone, Default)]
pub struct RecordingPlayer {
    commands: Vec<PlayerCommand>,
}

impl RecordingPlayer {
    /// Create a new recording player
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands received so far
    pub fn commands(&self) -> &[PlayerCommand] {
        &self.commands
    }

    /// Take the commands received since the last call
    pub fn drain(&mut self) -> Vec<PlayerCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Generation of the most recent load, if any
    pub fn last_generation(&self) -> Option<Generation> {
        self.commands.iter().rev().find_map(|c| match c {
            PlayerCommand::Load { generation, .. } => Some(*generation),
            _ => None,
        })
    }
}

impl MediaPlayer for RecordingPlayer {
    fn load(&mut self, url: &str, start_hint: f64, generation: Generation) {
        self.commands.push(PlayerCommand::Load {
            url: url.to_string(),
            start_hint,
            generation,
        });
    }

    fn play(&mut self) {
        self.commands.push(PlayerCommand::Play);
    }

    fn pause(&mut self) {
        self.commands.push(PlayerCommand::Pause);
    }

    fn seek_to(&mut self, seconds: f64) {
        self.commands.push(PlayerCommand::SeekTo(seconds));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_ordering() {
        let g = Generation::default();
        assert_eq!(g.raw(), 0);
        assert!(g.next() > g);
        assert_eq!(g.next().next(), Generation::new(2));
        assert_eq!(Generation::new(3).to_string(), "g3");
    }

    #[test]
    fn test_execute_dispatch() {
        let mut player = RecordingPlayer::new();
        let commands = vec![
            PlayerCommand::Load {
                url: "A".to_string(),
                start_hint: 10.0,
                generation: Generation::new(1),
            },
            PlayerCommand::Play,
            PlayerCommand::SeekTo(10.0),
            PlayerCommand::Pause,
        ];
        for command in &commands {
            player.execute(command);
        }
        assert_eq!(player.commands(), commands.as_slice());
        assert_eq!(player.last_generation(), Some(Generation::new(1)));
        assert_eq!(player.drain().len(), 4);
        assert!(player.commands().is_empty());
    }

    #[test]
    fn test_event_generation() {
        let ready = PlayerEvent::Ready {
            generation: Generation::new(4),
        };
        let progress = PlayerEvent::Progress {
            generation: Generation::new(5),
            elapsed: 1.0,
        };
        assert_eq!(ready.generation(), Generation::new(4));
        assert_eq!(progress.generation(), Generation::new(5));
    }
}
