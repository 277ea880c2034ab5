// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Result};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mashup::config::{PlaylistEvent, PlaylistWatcher, Settings};
use mashup::playlist::{load_document, PlaylistStore};
use mashup::sequencer::{PlayerEvent, SequencerState, SimulatedPlayer};
use mashup::Session;

fn print_usage() {
    println!("MASHUP - Back-to-back video clip player");
    println!();
    println!("Usage: mashup [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --show <FILE>           List the clips in an exported playlist");
    println!("  --play <FILE>           Play an exported playlist with the simulated player");
    println!("  --watch <FILE>          Play, and re-import the playlist whenever it changes");
    println!("  --speed <X>             Simulated playback speed (default 1.0)");
    println!("  --config <FILE>         Settings file (.yaml or .toml)");
    println!("  --help                  Show this help message");
}

enum Command {
    Show(PathBuf),
    Play(PathBuf),
    Watch(PathBuf),
    Help,
}

struct Options {
    command: Command,
    config: Option<PathBuf>,
    speed: Option<f64>,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut command = None;
    let mut config = None;
    let mut speed = None;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| anyhow!("{} requires a value", name))
        };
        match arg.as_str() {
            "--show" => command = Some(Command::Show(value("--show")?.into())),
            "--play" => command = Some(Command::Play(value("--play")?.into())),
            "--watch" => command = Some(Command::Watch(value("--watch")?.into())),
            "--config" => config = Some(PathBuf::from(value("--config")?)),
            "--speed" => {
                let raw = value("--speed")?;
                let parsed: f64 = raw
                    .parse()
                    .map_err(|_| anyhow!("Invalid speed: {}", raw))?;
                speed = Some(parsed);
            }
            "--help" | "-h" => command = Some(Command::Help),
            other => return Err(anyhow!("Unknown option: {}", other)),
        }
    }

    Ok(Options {
        command: command.unwrap_or(Command::Help),
        config,
        speed,
    })
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn show_playlist(path: &Path, settings: &Settings) -> Result<()> {
    let mut store = PlaylistStore::new(settings.playlist.default_name.clone());
    load_document(path)?.apply_to(&mut store);

    println!("{}", store.name());
    println!();
    if store.is_empty() {
        println!("No videos in playlist yet");
        return Ok(());
    }

    for (index, clip) in store.clips().iter().enumerate() {
        println!(
            "{:>3}. {:<32} {:<24} {}s - {}s ({:.1}s)",
            index + 1,
            clip.display_title(index),
            clip.host().unwrap_or("-"),
            clip.start_time(),
            clip.end_time(),
            clip.duration()
        );
    }
    println!();
    println!("{} clips, {:.1}s total", store.len(), store.total_duration());
    Ok(())
}

async fn run_playback(path: &Path, settings: &Settings, watch: bool) -> Result<()> {
    let (player, mut events) = SimulatedPlayer::new(&settings.player);
    let mut session = Session::from_settings(settings, player);
    session.import_file(path)?;

    let watcher = if watch {
        Some(PlaylistWatcher::new(path, Some(settings.watch.debounce_ms))?)
    } else {
        None
    };

    if session.can_play() {
        session.play()?;
    } else {
        warn!(path = ?path, "Playlist is empty, nothing to play");
        if watcher.is_none() {
            return Ok(());
        }
    }

    drive(&mut session, &mut events, watcher.as_ref()).await;
    info!("Done");
    Ok(())
}

async fn drive(
    session: &mut Session<SimulatedPlayer>,
    events: &mut UnboundedReceiver<PlayerEvent>,
    watcher: Option<&PlaylistWatcher>,
) {
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut poll = tokio::time::interval(Duration::from_millis(200));

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                session.handle_event(event);
                if session.sequencer().state() == SequencerState::Idle && watcher.is_none() {
                    break;
                }
            }
            _ = poll.tick(), if watcher.is_some() => {
                let pending = watcher.map(|w| w.recv_all()).unwrap_or_default();
                for event in pending {
                    match event {
                        PlaylistEvent::Reloaded(document) => {
                            session.import(*document);
                            if session.can_play() {
                                if let Err(e) = session.play() {
                                    warn!(error = %e, "Could not restart playback");
                                }
                            }
                        }
                        PlaylistEvent::Error(message) => warn!("{}", message),
                        PlaylistEvent::Deleted(path) => warn!(path = ?path, "Playlist file deleted"),
                    }
                }
            }
            _ = &mut ctrl_c => {
                session.stop();
                break;
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    let mut settings = match &options.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(speed) = options.speed {
        settings.player.speed = speed;
    }
    init_logging(&settings.log.level);

    match options.command {
        Command::Show(path) => show_playlist(&path, &settings)?,
        Command::Play(path) => run_playback(&path, &settings, false).await?,
        Command::Watch(path) => run_playback(&path, &settings, true).await?,
        Command::Help => print_usage(),
    }

    Ok(())
}
