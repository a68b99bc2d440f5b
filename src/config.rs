//! Configuration: XDG-style directories and the optional settings file.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::state::SortOrder;

/// Configuration directory (`~/.config/waypost`), created on first use.
///
/// Honors `XDG_CONFIG_HOME` when set, falls back to `~/.config`, and as a
/// last resort uses the current directory so the app still runs in odd
/// environments.
#[must_use]
pub fn config_dir() -> PathBuf {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));
    let dir = base.join("waypost");
    if let Err(e) = fs::create_dir_all(&dir) {
        tracing::warn!(dir = %dir.display(), error = %e, "[Config] could not create config dir");
    }
    dir
}

/// Log directory under the config directory.
#[must_use]
pub fn logs_dir() -> PathBuf {
    let dir = config_dir().join("logs");
    if let Err(e) = fs::create_dir_all(&dir) {
        tracing::warn!(dir = %dir.display(), error = %e, "[Config] could not create logs dir");
    }
    dir
}

/// File name of the settings document under the config directory.
pub const SETTINGS_FILE: &str = "settings.toml";

/// User settings, loaded from `settings.toml`. Every field has a default so
/// a missing or partial file works.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the place/user API.
    pub server_url: String,
    /// Initial list ordering key (see [`SortOrder::from_config_key`]).
    pub sort_order: String,
    /// Coordinates file to watch for position fixes, when set.
    pub coords_file: Option<PathBuf>,
    /// Fixed latitude used when no coordinates file is configured.
    pub fixed_latitude: Option<f64>,
    /// Fixed longitude used when no coordinates file is configured.
    pub fixed_longitude: Option<f64>,
    /// Position sampling cadence in seconds.
    pub poll_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:3000/api".to_string(),
            sort_order: SortOrder::NearestFirst.as_config_key().to_string(),
            coords_file: None,
            fixed_latitude: None,
            fixed_longitude: None,
            poll_seconds: 5,
        }
    }
}

impl Settings {
    /// Load settings from the config directory. A missing file is the
    /// defaults; an unreadable or invalid file logs a warning and also
    /// falls back to the defaults rather than refusing to start.
    #[must_use]
    pub fn load() -> Self {
        let path = config_dir().join(SETTINGS_FILE);
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(&path) {
            Ok(body) => match toml::from_str::<Settings>(&body) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "[Config] settings invalid, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "[Config] settings unreadable, using defaults");
                Self::default()
            }
        }
    }

    /// The configured initial ordering, defaulting to nearest-first.
    #[must_use]
    pub fn initial_sort_order(&self) -> SortOrder {
        SortOrder::from_config_key(&self.sort_order).unwrap_or_default()
    }

    /// Position sampling cadence.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_seconds.max(1))
    }
}
