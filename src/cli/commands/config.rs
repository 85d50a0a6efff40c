//! Config command implementation.

use colored::Colorize;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::BreathError;
use crate::output::to_json;

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or written.
pub fn config(
    paths: &Paths,
    cmd: ConfigCommands,
    format: OutputFormat,
) -> Result<String, BreathError> {
    match cmd {
        ConfigCommands::Show => {
            let config = Config::load_from_path(&paths.config_file)?;
            match format {
                OutputFormat::Json => to_json(&config),
                OutputFormat::Pretty => Ok(config.to_yaml()?.trim_end().to_string()),
            }
        }

        ConfigCommands::Path => Ok(paths.config_file.display().to_string()),

        ConfigCommands::Init { force } => {
            if paths.config_file.exists() && !force {
                return Err(BreathError::Config(format!(
                    "{} already exists. Use --force to overwrite it.",
                    paths.config_file.display()
                )));
            }

            paths.ensure_dirs()?;
            Config::default().save_to_path(&paths.config_file)?;

            match format {
                OutputFormat::Json => to_json(&serde_json::json!({
                    "config_file": paths.config_file,
                    "sounds_dir": paths.sounds,
                })),
                OutputFormat::Pretty => Ok([
                    format!("✅ Wrote {}", paths.config_file.display()).green().to_string(),
                    format!("   Put sound files in {}", paths.sounds.display())
                        .dimmed()
                        .to_string(),
                ]
                .join("\n")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_then_refuse_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().to_path_buf());

        config(&paths, ConfigCommands::Init { force: false }, OutputFormat::Json).unwrap();
        assert!(paths.config_file.exists());
        assert!(paths.sounds.exists());

        let err = config(&paths, ConfigCommands::Init { force: false }, OutputFormat::Json)
            .unwrap_err();
        assert!(matches!(err, BreathError::Config(_)));

        config(&paths, ConfigCommands::Init { force: true }, OutputFormat::Json).unwrap();
    }

    #[test]
    fn test_show_defaults_as_json() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().to_path_buf());

        let json = config(&paths, ConfigCommands::Show, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["session"]["pace_seconds"], 5);
        assert_eq!(value["audio"]["music_fade_out_seconds"], 20);
    }
}
