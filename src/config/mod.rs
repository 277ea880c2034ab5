// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration system for MASHUP.
//!
//! Settings are read from a YAML or TOML file, chosen by extension. Every
//! field has a default, so an empty file (or no file) is a valid config.

pub mod watcher;

pub use watcher::{PlaylistEvent, PlaylistWatcher};

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::playlist::{DEFAULT_COPY_SUFFIX, DEFAULT_PLAYLIST_NAME};

/// Root settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Settings {
    /// Playlist defaults
    #[serde(default)]
    pub playlist: PlaylistSettings,
    /// Simulated player timing
    #[serde(default)]
    pub player: PlayerSettings,
    /// Export file watching
    #[serde(default)]
    pub watch: WatchSettings,
    /// Log output
    #[serde(default)]
    pub log: LogSettings,
}

impl Settings {
    /// Load settings from a `.yaml`/`.yml` or `.toml` file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {:?}", path))?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&contents),
            Some("toml") => Self::from_toml(&contents),
            _ => bail!("Unsupported settings file type: {:?}", path),
        }
    }

    /// Parse settings from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).context("Failed to parse YAML settings")
    }

    /// Parse settings from a TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML settings")
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize settings to YAML")
    }
}

/// Playlist defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaylistSettings {
    /// Name of a new playlist
    #[serde(default = "default_name")]
    pub default_name: String,
    /// Marker appended to duplicated titles
    #[serde(default = "default_copy_suffix")]
    pub copy_suffix: String,
}

fn default_name() -> String {
    DEFAULT_PLAYLIST_NAME.to_string()
}
fn default_copy_suffix() -> String {
    DEFAULT_COPY_SUFFIX.to_string()
}

impl Default for PlaylistSettings {
    fn default() -> Self {
        Self {
            default_name: default_name(),
            copy_suffix: default_copy_suffix(),
        }
    }
}

/// Simulated player timing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerSettings {
    /// Milliseconds between progress reports
    #[serde(default = "default_progress_interval")]
    pub progress_interval_ms: u64,
    /// Milliseconds from load to ready
    #[serde(default = "default_ready_delay")]
    pub ready_delay_ms: u64,
    /// Playback speed multiplier
    #[serde(default = "default_speed")]
    pub speed: f64,
}

fn default_progress_interval() -> u64 {
    500
}
fn default_ready_delay() -> u64 {
    250
}
fn default_speed() -> f64 {
    1.0
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            progress_interval_ms: default_progress_interval(),
            ready_delay_ms: default_ready_delay(),
            speed: default_speed(),
        }
    }
}

/// Export file watching
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchSettings {
    /// Debounce window for file modifications, in milliseconds
    #[serde(default = "default_debounce")]
    pub debounce_ms: u64,
}

fn default_debounce() -> u64 {
    500
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce(),
        }
    }
}

/// Log output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogSettings {
    /// Filter used when `RUST_LOG` is not set
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}
