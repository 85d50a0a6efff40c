//! Path resolution for boxbreath configuration and data files.
//!
//! All boxbreath data lives in `~/.boxbreath/`:
//! - `config.yaml` - Main configuration file
//! - `sounds/` - Music, phase cue, and instruction audio files
//! - `logs/` - Rolling log files

use std::path::PathBuf;

use crate::error::BreathError;

/// Environment variable that overrides the root directory.
pub const HOME_ENV: &str = "BOXBREATH_HOME";

/// Paths to boxbreath configuration and data directories.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.boxbreath/`
    pub root: PathBuf,
    /// Config file: `~/.boxbreath/config.yaml`
    pub config_file: PathBuf,
    /// Sounds directory: `~/.boxbreath/sounds/`
    pub sounds: PathBuf,
    /// Logs directory: `~/.boxbreath/logs/`
    pub logs: PathBuf,
}

impl Paths {
    /// Create paths from `BOXBREATH_HOME`, or the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if neither is set.
    pub fn new() -> Result<Self, BreathError> {
        if let Ok(root) = std::env::var(HOME_ENV) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            BreathError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".boxbreath")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            sounds: root.join("sounds"),
            logs: root.join("logs"),
            root,
        }
    }

    /// Ensure all directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), BreathError> {
        for dir in [&self.root, &self.sounds, &self.logs] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    BreathError::Config(format!("Failed to create directory {}: {e}", dir.display()))
                })?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-boxbreath");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.sounds, root.join("sounds"));
        assert_eq!(paths.logs, root.join("logs"));
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested"));

        paths.ensure_dirs().unwrap();

        assert!(paths.root.exists());
        assert!(paths.sounds.exists());
        assert!(paths.logs.exists());
    }
}
