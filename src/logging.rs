//! Logging initialization.
//!
//! Uses the tracing ecosystem. The TUI owns the terminal, so logs go to a
//! daily rolling file under `~/.boxbreath/logs/` rather than the console.
//!
//! `BOXBREATH_LOG` overrides the configured level (e.g. `boxbreath=debug`).

use std::path::Path;

use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;
use crate::error::BreathError;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "BOXBREATH_LOG";

/// Log file name prefix inside the log directory.
const LOG_FILE_NAME: &str = "boxbreath.log";

/// Install the global subscriber.
///
/// Does nothing when file logging is disabled. Calling it twice keeps the
/// first subscriber.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created.
pub fn init_logging(config: &LoggingConfig, log_dir: &Path) -> Result<(), BreathError> {
    if !config.file {
        return Ok(());
    }

    std::fs::create_dir_all(log_dir).map_err(|e| {
        BreathError::Config(format!(
            "Failed to create log directory {}: {e}",
            log_dir.display()
        ))
    })?;

    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "boxbreath={}",
            parse_level(&config.level).as_str().to_lowercase()
        ))
    });

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_NAME);
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .boxed();

    if tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .is_ok()
    {
        tracing::debug!(level = %config.level, dir = %log_dir.display(), "Logging initialized");
    }

    Ok(())
}

/// Parse a level name, defaulting to INFO.
#[must_use]
pub fn parse_level(s: &str) -> Level {
    match s.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
