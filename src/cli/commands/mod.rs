//! Command implementations for boxbreath.
//!
//! Each command returns the text to print on success.

mod config;
mod start;

pub use config::config;
pub use start::{resolve_session, run_plain, start};

use clap_complete::Shell;

use crate::cli::args::OutputFormat;
use crate::config::{Config, Paths};
use crate::error::BreathError;
use crate::features::shell::generate_completions;
use crate::output::{format_tracks, track_statuses};

/// Execute tracks command
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or output formatting fails.
pub fn tracks(paths: &Paths, format: OutputFormat) -> Result<String, BreathError> {
    let config = Config::load_from_path(&paths.config_file)?;
    let statuses = track_statuses(&config.sounds_dir(paths));
    format_tracks(&statuses, format)
}

/// Execute completions command
///
/// # Errors
///
/// Returns an error if the script cannot be generated.
pub fn completions(shell: Shell) -> Result<String, BreathError> {
    generate_completions(shell)
}
