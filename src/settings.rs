//! Game settings
//!
//! Read once at startup from a JSON file next to the executable's working
//! directory (or the path in `ARCADE_SETTINGS`). Missing fields fall back to
//! defaults; a missing file means all defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::racer::{DEFAULT_LAPS, MIN_TRACK_SEGMENTS, TRACK_SEGMENTS};
use crate::error::ArcadeError;
use crate::persistence::read_json;
use crate::platform::Pacing;
use crate::sim::{CarClass, Driver, RaceConfig};

/// Environment variable overriding the settings file location
pub const SETTINGS_ENV: &str = "ARCADE_SETTINGS";
/// Settings file used when the environment variable is unset
pub const DEFAULT_SETTINGS_FILE: &str = "arcade_settings.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Target frames per second
    pub frame_rate: u32,
    /// Run one simulation step per frame without sleeping
    pub unthrottled: bool,
    /// Pipe game RNG seed (time-derived when absent)
    pub seed: Option<u64>,

    // === Racer ===
    pub laps: u32,
    pub track_segments: usize,
    pub player_class: CarClass,

    /// Directory for high scores
    pub data_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frame_rate: 60,
            unthrottled: false,
            seed: None,
            laps: DEFAULT_LAPS,
            track_segments: TRACK_SEGMENTS,
            player_class: CarClass::Sports,
            data_dir: PathBuf::from("arcade_data"),
        }
    }
}

impl Settings {
    /// Settings file location for this process
    pub fn default_path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
    }

    /// Load from the default location
    pub fn load() -> Result<Self, ArcadeError> {
        Self::load_from(&Self::default_path())
    }

    /// Load and validate; a missing file gives defaults
    pub fn load_from(path: &Path) -> Result<Self, ArcadeError> {
        let settings = match read_json::<Settings>(path)? {
            Some(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            None => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ArcadeError> {
        if self.frame_rate == 0 {
            return Err(ArcadeError::InvalidSettings("frame_rate must be positive".into()));
        }
        if self.laps == 0 {
            return Err(ArcadeError::InvalidSettings("laps must be positive".into()));
        }
        if self.track_segments < MIN_TRACK_SEGMENTS {
            return Err(ArcadeError::InvalidSettings(format!(
                "track_segments must be at least {MIN_TRACK_SEGMENTS}"
            )));
        }
        Ok(())
    }

    pub fn pacing(&self) -> Pacing {
        if self.unthrottled {
            Pacing::Unthrottled
        } else {
            Pacing::RealTime
        }
    }

    /// Race configuration with the given player driver
    pub fn race_config(&self, player_driver: Driver) -> RaceConfig {
        RaceConfig {
            laps: self.laps,
            track_segments: self.track_segments,
            player_class: self.player_class,
            player_driver,
        }
    }

    pub fn high_scores_path(&self) -> PathBuf {
        self.data_dir.join("flappy_scores.json")
    }
}
