// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Headless media player driven by the tokio clock.
//!
//! Loading a source spawns a task that reports ready after a short delay and
//! then emits progress at a fixed interval while playing. Each load replaces
//! the previous task, and every event is tagged with the generation of the
//! load that produced it.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::player::{Generation, MediaPlayer, PlayerEvent};
use crate::config::PlayerSettings;

/// Playback position shared with the progress task
#[derive(Debug, Default)]
struct Transport {
    generation: Generation,
    position: f64,
    playing: bool,
}

/// Simulated player for running a mashup without a real video backend
pub struct SimulatedPlayer {
    events: UnboundedSender<PlayerEvent>,
    transport: Arc<Mutex<Transport>>,
    task: Option<JoinHandle<()>>,
    progress_interval: Duration,
    ready_delay: Duration,
    speed: f64,
}

impl SimulatedPlayer {
    /// Create a player and the receiver for its events
    pub fn new(settings: &PlayerSettings) -> (Self, UnboundedReceiver<PlayerEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let player = Self {
            events,
            transport: Arc::new(Mutex::new(Transport::default())),
            task: None,
            progress_interval: Duration::from_millis(settings.progress_interval_ms.max(1)),
            ready_delay: Duration::from_millis(settings.ready_delay_ms),
            speed: settings.speed.max(0.0),
        };
        (player, receiver)
    }

    /// Current position of the loaded source, in seconds
    pub fn position(&self) -> f64 {
        self.transport.lock().map(|t| t.position).unwrap_or(0.0)
    }

    /// Whether the player is advancing
    pub fn is_playing(&self) -> bool {
        self.transport.lock().map(|t| t.playing).unwrap_or(false)
    }

    fn with_transport(&self, f: impl FnOnce(&mut Transport)) {
        if let Ok(mut transport) = self.transport.lock() {
            f(&mut transport);
        }
    }
}

impl MediaPlayer for SimulatedPlayer {
    fn load(&mut self, url: &str, start_hint: f64, generation: Generation) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.with_transport(|t| {
            t.generation = generation;
            t.position = start_hint;
        });
        debug!(url, start_hint, %generation, "Simulated load");

        let events = self.events.clone();
        let transport = Arc::clone(&self.transport);
        let interval = self.progress_interval;
        let ready_delay = self.ready_delay;
        let step = interval.as_secs_f64() * self.speed;

        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep(ready_delay).await;
            if events.send(PlayerEvent::Ready { generation }).is_err() {
                return;
            }

            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let elapsed = {
                    let Ok(mut t) = transport.lock() else {
                        return;
                    };
                    if t.generation != generation {
                        return;
                    }
                    if !t.playing {
                        continue;
                    }
                    t.position += step;
                    t.position
                };
                if events.send(PlayerEvent::Progress { generation, elapsed }).is_err() {
                    return;
                }
            }
        }));
    }

    fn play(&mut self) {
        self.with_transport(|t| t.playing = true);
    }

    fn pause(&mut self) {
        self.with_transport(|t| t.playing = false);
    }

    fn seek_to(&mut self, seconds: f64) {
        self.with_transport(|t| t.position = seconds);
    }
}

impl Drop for SimulatedPlayer {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    fn fast_settings() -> PlayerSettings {
        PlayerSettings {
            progress_interval_ms: 10,
            ready_delay_ms: 5,
            speed: 1.0,
        }
    }

    async fn next_event(rx: &mut UnboundedReceiver<PlayerEvent>) -> PlayerEvent {
        timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("timed out waiting for player event")
            .expect("player channel closed")
    }

    #[tokio::test]
    async fn test_ready_then_progress() {
        let (mut player, mut rx) = SimulatedPlayer::new(&fast_settings());
        let generation = Generation::new(1);
        player.load("A", 10.0, generation);
        player.play();

        assert_eq!(next_event(&mut rx).await, PlayerEvent::Ready { generation });
        player.seek_to(20.0);

        match next_event(&mut rx).await {
            PlayerEvent::Progress {
                generation: g,
                elapsed,
            } => {
                assert_eq!(g, generation);
                assert!(elapsed > 20.0);
            }
            other => panic!("expected progress, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reload_replaces_generation() {
        let (mut player, mut rx) = SimulatedPlayer::new(&fast_settings());
        player.load("A", 0.0, Generation::new(1));
        player.load("B", 5.0, Generation::new(2));
        player.play();

        let event = next_event(&mut rx).await;
        assert_eq!(event.generation(), Generation::new(2));
        assert!(player.position() >= 5.0);
    }

    #[tokio::test]
    async fn test_paused_player_is_silent() {
        let (mut player, mut rx) = SimulatedPlayer::new(&fast_settings());
        player.load("A", 0.0, Generation::new(1));

        assert!(matches!(next_event(&mut rx).await, PlayerEvent::Ready { .. }));
        assert!(!player.is_playing());
        let quiet = timeout(Duration::from_millis(60), rx.recv()).await;
        assert!(quiet.is_err());
        assert_eq!(player.position(), 0.0);
    }
}
