//! Output formatting for boxbreath.
//!
//! Command results render either as colored text or as JSON.

mod json;
mod pretty;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::args::OutputFormat;
use crate::error::BreathError;
use crate::features::breath::audio::track_path;
use crate::features::breath::{SessionSummary, Track};

pub use json::*;
pub use pretty::*;

/// Whether a catalog track has a sound file on disk.
#[derive(Debug, Clone, Serialize)]
pub struct TrackStatus {
    pub id: &'static str,
    pub music: bool,
    pub path: PathBuf,
    pub present: bool,
}

/// Inspect every catalog track under `sounds_dir`.
#[must_use]
pub fn track_statuses(sounds_dir: &Path) -> Vec<TrackStatus> {
    Track::ALL
        .iter()
        .map(|&track| {
            let path = track_path(sounds_dir, track);
            TrackStatus {
                id: track.id(),
                music: track.is_music(),
                present: path.is_file(),
                path,
            }
        })
        .collect()
}

/// Format a session summary based on output format
///
/// # Errors
///
/// Returns `BreathError::Parse` if JSON serialization fails.
pub fn format_summary(summary: &SessionSummary, format: OutputFormat) -> Result<String, BreathError> {
    match format {
        OutputFormat::Pretty => Ok(format_summary_pretty(summary)),
        OutputFormat::Json => to_json(summary),
    }
}

/// Format the track catalog based on output format
///
/// # Errors
///
/// Returns `BreathError::Parse` if JSON serialization fails.
pub fn format_tracks(tracks: &[TrackStatus], format: OutputFormat) -> Result<String, BreathError> {
    match format {
        OutputFormat::Pretty => Ok(format_tracks_pretty(tracks)),
        OutputFormat::Json => to_json(&tracks),
    }
}
