//! Session configuration, timing state, and end-of-session summary.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use super::audio::MusicTrack;
use super::clock::Timestamp;
use super::phase::Phase;
use super::timing::{cycle_duration_ms, format_duration};
use crate::error::BreathError;

/// What a session should do. Fixed once the session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Total session length in seconds.
    pub total_duration_secs: u32,
    /// Seconds per phase (one side of the square).
    pub pace_secs: u32,
    /// Background music.
    pub music: MusicTrack,
    /// Play spoken instructions on each phase change.
    pub instructions: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            total_duration_secs: 120,
            pace_secs: 5,
            music: MusicTrack::None,
            instructions: false,
        }
    }
}

impl SessionConfig {
    /// Check that the config can drive a session.
    ///
    /// # Errors
    ///
    /// Returns `BreathError::InvalidConfig` for a zero duration or zero pace.
    pub fn validate(&self) -> Result<(), BreathError> {
        if self.total_duration_secs == 0 {
            return Err(BreathError::InvalidConfig(
                "duration must be at least 1 second".to_string(),
            ));
        }
        if self.pace_secs == 0 {
            return Err(BreathError::InvalidConfig(
                "pace must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }
}

/// Timing state of the running session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// When the session started.
    pub start: Timestamp,
    /// When the current pause began.
    pub pause_start: Option<Timestamp>,
    /// Total milliseconds spent paused before the current pause.
    pub paused_total_ms: u64,
    pub paused: bool,
    /// Last phase a transition was emitted for. `None` until the first tick.
    pub last_phase: Option<Phase>,
}

impl SessionState {
    #[must_use]
    pub const fn new(start: Timestamp) -> Self {
        Self {
            start,
            pause_start: None,
            paused_total_ms: 0,
            paused: false,
            last_phase: None,
        }
    }

    /// Pause-adjusted milliseconds since start.
    ///
    /// While paused, time is frozen at the moment the pause began.
    #[must_use]
    pub const fn elapsed_at(&self, now: Timestamp) -> u64 {
        let end = match self.pause_start {
            Some(paused_at) if self.paused => paused_at,
            _ => now,
        };
        end.saturating_since(self.start)
            .saturating_sub(self.paused_total_ms)
    }

    /// Paused milliseconds including any pause still in progress.
    #[must_use]
    pub const fn paused_at(&self, now: Timestamp) -> u64 {
        match self.pause_start {
            Some(paused_at) if self.paused => {
                self.paused_total_ms + now.saturating_since(paused_at)
            }
            _ => self.paused_total_ms,
        }
    }
}

/// Record of a finished session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub config: SessionConfig,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    /// Pause-adjusted breathing time in milliseconds.
    pub elapsed_ms: u64,
    pub paused_ms: u64,
    pub cycles_completed: u64,
    /// True if the timer ran out, false if the session was stopped early.
    pub completed: bool,
}

impl SessionSummary {
    #[must_use]
    pub(crate) fn new(
        config: SessionConfig,
        started_at: DateTime<Utc>,
        state: &SessionState,
        now: Timestamp,
        completed: bool,
    ) -> Self {
        let elapsed_ms = state.elapsed_at(now);
        Self {
            config,
            started_at,
            ended_at: Utc::now(),
            elapsed_ms,
            paused_ms: state.paused_at(now),
            cycles_completed: elapsed_ms / cycle_duration_ms(config.pace_secs).max(1),
            completed,
        }
    }

    /// One-line description for logs and plain output.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn format_status(&self) -> String {
        let breathed = format_duration(chrono::Duration::milliseconds(self.elapsed_ms as i64));
        let outcome = if self.completed { "completed" } else { "stopped" };
        let started = self.started_at.with_timezone(&Local).format("%H:%M");
        format!(
            "Session {outcome} - {breathed} of breathing, {} full cycle{} (started {started})",
            self.cycles_completed,
            if self.cycles_completed == 1 { "" } else { "s" }
        )
    }
}
