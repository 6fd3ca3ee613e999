//! TOML-based application configuration.
//!
//! Holds the starting preferences of a session:
//! - Listener name, appearance and background
//! - Player volume and genre
//! - Track catalog
//!
//! Configuration is read from `~/.config/lofiroom/config.toml`. It is never
//! written back; session state lives only as long as the session.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, ValidationError};
use crate::playback::{Track, TrackList, DEFAULT_VOLUME};
use crate::selection::{Background, Genre};

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_true")]
    pub dark_mode: bool,
    #[serde(default)]
    pub background: Background,
}

/// Player configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    #[serde(default = "default_volume")]
    pub volume: f32,
    #[serde(default)]
    pub genre: Genre,
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    /// Track catalog. Empty means the bundled tracks.
    #[serde(default)]
    pub tracks: Vec<Track>,
}

fn default_username() -> String {
    "listener".into()
}
fn default_true() -> bool {
    true
}
fn default_volume() -> f32 {
    DEFAULT_VOLUME
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            dark_mode: true,
            background: Background::default(),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            genre: Genre::default(),
        }
    }
}

/// Returns `~/.config/lofiroom[-dev]/` based on LOFIROOM_ENV.
///
/// Set LOFIROOM_ENV=dev to use the development directory. The directory is
/// not created.
pub fn config_dir() -> PathBuf {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("LOFIROOM_ENV").unwrap_or_else(|_| "production".to_string());

    if env == "dev" {
        base_dir.join("lofiroom-dev")
    } else {
        base_dir.join("lofiroom")
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    pub fn path() -> PathBuf {
        config_dir().join("config.toml")
    }

    /// Load from the default location, or defaults if there is no file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path())
    }

    /// Load from `path`, or defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                debug!(path = %path.display(), "loading config");
                Ok(toml::from_str(&content)?)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Configured tracks, or the bundled ones when none are configured.
    pub fn track_list(&self) -> Result<TrackList, ValidationError> {
        if self.tracks.is_empty() {
            Ok(TrackList::builtin())
        } else {
            TrackList::new(self.tracks.clone())
        }
    }
}
