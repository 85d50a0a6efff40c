//! Configuration settings for boxbreath.
//!
//! Settings are loaded from `~/.boxbreath/config.yaml`. Every field has a
//! default, so a partial file is fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::Paths;
use crate::error::BreathError;
use crate::features::breath::{DriverSettings, MusicTrack, SessionConfig, SquareGeometry};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Defaults for new sessions.
    pub session: SessionDefaults,
    /// Audio settings.
    pub audio: AudioConfig,
    /// Pacer layout and frame timing.
    pub display: DisplayConfig,
    /// Log output.
    pub logging: LoggingConfig,
}

/// Session defaults, overridable per run from the command line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SessionDefaults {
    #[serde(default = "default_duration_seconds")]
    pub duration_seconds: u32,
    #[serde(default = "default_pace_seconds")]
    pub pace_seconds: u32,
    #[serde(default)]
    pub music: MusicTrack,
    #[serde(default)]
    pub instructions: bool,
}

/// Audio settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AudioConfig {
    /// Play sound at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Directory holding the sound files. Defaults to `~/.boxbreath/sounds`.
    #[serde(default)]
    pub sounds_dir: Option<PathBuf>,
    /// Seconds background music keeps playing after a session ends.
    #[serde(default = "default_fade_out_seconds")]
    pub music_fade_out_seconds: u32,
}

/// Pacer layout and frame timing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Milliseconds between frames.
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
    /// Number of trail slots behind the pacer.
    #[serde(default = "default_trail_length")]
    pub trail_length: usize,
    /// Delay between trail slots in milliseconds.
    #[serde(default = "default_trail_stagger_ms")]
    pub trail_stagger_ms: u64,
    /// Side of the square in layout units.
    #[serde(default = "default_square_size")]
    pub square_size: f64,
    /// Pacer dot diameter in layout units.
    #[serde(default = "default_dot_size")]
    pub dot_size: f64,
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level filter used when `BOXBREATH_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Write logs to `~/.boxbreath/logs/`.
    #[serde(default = "default_true")]
    pub file: bool,
}

// Default value functions for serde
const fn default_duration_seconds() -> u32 {
    120
}

const fn default_pace_seconds() -> u32 {
    5
}

const fn default_true() -> bool {
    true
}

const fn default_fade_out_seconds() -> u32 {
    20
}

const fn default_frame_interval_ms() -> u64 {
    16
}

const fn default_trail_length() -> usize {
    15
}

const fn default_trail_stagger_ms() -> u64 {
    25
}

fn default_square_size() -> f64 {
    300.0
}

fn default_dot_size() -> f64 {
    20.0
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            duration_seconds: default_duration_seconds(),
            pace_seconds: default_pace_seconds(),
            music: MusicTrack::None,
            instructions: false,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            sounds_dir: None,
            music_fade_out_seconds: default_fade_out_seconds(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: default_frame_interval_ms(),
            trail_length: default_trail_length(),
            trail_stagger_ms: default_trail_stagger_ms(),
            square_size: default_square_size(),
            dot_size: default_dot_size(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_true(),
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &Path) -> Result<Self, BreathError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            BreathError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            BreathError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &Path) -> Result<(), BreathError> {
        let contents = self.to_yaml()?;

        std::fs::write(path, contents).map_err(|e| {
            BreathError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, BreathError> {
        serde_yaml::to_string(self)
            .map_err(|e| BreathError::Config(format!("Failed to serialize config: {e}")))
    }

    /// Session config from the stored defaults.
    #[must_use]
    pub const fn session_config(&self) -> SessionConfig {
        SessionConfig {
            total_duration_secs: self.session.duration_seconds,
            pace_secs: self.session.pace_seconds,
            music: self.session.music,
            instructions: self.session.instructions,
        }
    }

    /// Driver settings from the display and audio sections.
    #[must_use]
    pub fn driver_settings(&self) -> DriverSettings {
        DriverSettings {
            geometry: SquareGeometry {
                square_size: self.display.square_size,
                dot_size: self.display.dot_size,
            },
            trail_length: self.display.trail_length,
            trail_stagger_ms: self.display.trail_stagger_ms,
            music_fade_out_ms: u64::from(self.audio.music_fade_out_seconds) * 1000,
        }
    }

    /// Directory sound files are read from.
    #[must_use]
    pub fn sounds_dir(&self, paths: &Paths) -> PathBuf {
        self.audio
            .sounds_dir
            .clone()
            .unwrap_or_else(|| paths.sounds.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.session.duration_seconds, 120);
        assert_eq!(config.session.pace_seconds, 5);
        assert_eq!(config.session.music, MusicTrack::None);
        assert!(!config.session.instructions);
        assert_eq!(config.audio.music_fade_out_seconds, 20);
        assert_eq!(config.display.trail_length, 15);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_driver_settings_defaults_match_driver() {
        assert_eq!(Config::default().driver_settings(), DriverSettings::default());
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut config = Config::default();
        config.session.pace_seconds = 4;
        config.session.music = MusicTrack::AmbientChimes;
        config.audio.sounds_dir = Some(PathBuf::from("/opt/sounds"));

        config.save_to_path(&config_path).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let partial_yaml = r"
session:
  pace_seconds: 4
  music: river-sounds
";
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.session.pace_seconds, 4);
        assert_eq!(config.session.music, MusicTrack::RiverSounds);
        // Defaults should be used for missing fields
        assert_eq!(config.session.duration_seconds, 120);
        assert_eq!(config.display.frame_interval_ms, 16);
    }

    #[test]
    fn test_invalid_config_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "session:\n  pace_seconds: slow\n").unwrap();

        let err = Config::load_from_path(&config_path).unwrap_err();
        assert!(matches!(err, BreathError::Config(_)));
    }

    #[test]
    fn test_sounds_dir_override() {
        let paths = Paths::with_root(PathBuf::from("/tmp/bb"));
        let mut config = Config::default();
        assert_eq!(config.sounds_dir(&paths), PathBuf::from("/tmp/bb/sounds"));

        config.audio.sounds_dir = Some(PathBuf::from("/srv/sounds"));
        assert_eq!(config.sounds_dir(&paths), PathBuf::from("/srv/sounds"));
    }
}
