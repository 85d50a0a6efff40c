//! Cycle arithmetic and time formatting.
//!
//! Everything here is a pure function of the pace and the elapsed
//! (pause-adjusted) milliseconds, so phase alignment survives pauses.

use chrono::Duration;

use super::phase::Phase;

/// Milliseconds per second.
pub const MILLIS_PER_SECOND: u64 = 1000;

/// Where a given elapsed time falls within the breathing cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CyclePosition {
    /// Current phase.
    pub phase: Phase,
    /// Progress through the current phase, in `[0, 1)`.
    pub progress: f64,
    /// Milliseconds into the current cycle.
    pub cycle_progress_ms: u64,
    /// Whole seconds left in the current phase, rounded up.
    pub phase_countdown: u64,
    /// Completed cycles before this one.
    pub cycle: u64,
}

/// Duration of one side (one phase) in milliseconds.
#[must_use]
pub const fn side_duration_ms(pace_secs: u32) -> u64 {
    pace_secs as u64 * MILLIS_PER_SECOND
}

/// Duration of a full four-phase cycle in milliseconds.
#[must_use]
pub const fn cycle_duration_ms(pace_secs: u32) -> u64 {
    4 * side_duration_ms(pace_secs)
}

/// Locate `elapsed_ms` within the cycle for the given pace.
///
/// `pace_secs` must be non-zero; session configs are validated before a
/// driver ever calls this.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn cycle_position(elapsed_ms: u64, pace_secs: u32) -> CyclePosition {
    let side = side_duration_ms(pace_secs).max(1);
    let cycle = 4 * side;

    let cycle_progress_ms = elapsed_ms % cycle;
    let into_side = cycle_progress_ms % side;

    CyclePosition {
        phase: Phase::from_index(cycle_progress_ms / side),
        progress: into_side as f64 / side as f64,
        cycle_progress_ms,
        phase_countdown: (side - into_side).div_ceil(MILLIS_PER_SECOND),
        cycle: elapsed_ms / cycle,
    }
}

/// Whole seconds left in a session. Never negative.
#[must_use]
pub const fn remaining_seconds(total_secs: u32, elapsed_ms: u64) -> u64 {
    (total_secs as u64).saturating_sub(elapsed_ms / MILLIS_PER_SECOND)
}

/// Format a second count as MM:SS.
#[must_use]
pub fn format_mmss(total_seconds: u64) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Format a duration as a human-readable string.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let total_minutes = d.num_minutes();

    if total_minutes < 1 {
        let seconds = d.num_seconds();
        return format!("{} second{}", seconds, if seconds == 1 { "" } else { "s" });
    }

    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    let seconds = d.num_seconds() % 60;

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{} hour{}", hours, if hours == 1 { "" } else { "s" }));
    }
    if minutes > 0 {
        parts.push(format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" }));
    }
    if seconds > 0 {
        parts.push(format!("{} second{}", seconds, if seconds == 1 { "" } else { "s" }));
    }
    parts.join(", ")
}

/// Parse a duration string like "2m", "1m30s", "90s".
///
/// A bare number is read as minutes, matching how sessions are usually
/// described ("a 5 minute session"). Zero and out-of-range values are
/// rejected.
#[must_use]
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim().to_lowercase();

    if let Ok(minutes) = s.parse::<i64>() {
        return if minutes > 0 {
            Duration::try_minutes(minutes)
        } else {
            None
        };
    }

    let mut total_seconds: i64 = 0;
    let mut current_num = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            current_num.push(c);
        } else if !current_num.is_empty() {
            let num: i64 = current_num.parse().ok()?;
            current_num.clear();

            let unit = match c {
                'h' => 3600,
                'm' => 60,
                's' => 1,
                _ => return None,
            };
            total_seconds = total_seconds.checked_add(num.checked_mul(unit)?)?;
        } else {
            return None;
        }
    }

    if !current_num.is_empty() {
        let num: i64 = current_num.parse().ok()?;
        total_seconds = total_seconds.checked_add(num.checked_mul(60)?)?;
    }

    if total_seconds > 0 {
        Duration::try_seconds(total_seconds)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhale_example() {
        let pos = cycle_position(12_000, 5);
        assert_eq!(pos.cycle_progress_ms, 12_000);
        assert_eq!(pos.phase, Phase::Exhale);
        assert!((pos.progress - 0.4).abs() < 1e-9);
        assert_eq!(pos.phase_countdown, 3);
    }

    #[test]
    fn test_phase_sequence_is_periodic() {
        let pace = 2;
        let side = side_duration_ms(pace);
        let expected = [Phase::Inhale, Phase::HoldIn, Phase::Exhale, Phase::HoldOut];

        for step in 0..16u64 {
            let elapsed = step * side + side / 2;
            let pos = cycle_position(elapsed, pace);
            assert_eq!(pos.phase, expected[(step % 4) as usize]);
            assert_eq!(pos.cycle, step / 4);
        }
    }

    #[test]
    fn test_progress_in_unit_interval() {
        for elapsed in (0..25_000).step_by(137) {
            let pos = cycle_position(elapsed, 3);
            assert!(pos.progress >= 0.0 && pos.progress < 1.0, "{elapsed}: {}", pos.progress);
        }
    }

    #[test]
    fn test_progress_resets_on_side_boundary() {
        assert_eq!(cycle_position(5_000, 5).progress, 0.0);
        assert_eq!(cycle_position(20_000, 5).progress, 0.0);
        assert!(cycle_position(4_999, 5).progress > 0.99);
    }

    #[test]
    fn test_phase_countdown_rounds_up() {
        assert_eq!(cycle_position(0, 4).phase_countdown, 4);
        assert_eq!(cycle_position(1, 4).phase_countdown, 4);
        assert_eq!(cycle_position(1_000, 4).phase_countdown, 3);
        assert_eq!(cycle_position(3_999, 4).phase_countdown, 1);
    }

    #[test]
    fn test_remaining_seconds_saturates() {
        assert_eq!(remaining_seconds(120, 0), 120);
        assert_eq!(remaining_seconds(120, 999), 120);
        assert_eq!(remaining_seconds(120, 1_000), 119);
        assert_eq!(remaining_seconds(120, 120_000), 0);
        assert_eq!(remaining_seconds(120, 500_000), 0);
    }

    #[test]
    fn test_format_mmss() {
        assert_eq!(format_mmss(120), "02:00");
        assert_eq!(format_mmss(59), "00:59");
        assert_eq!(format_mmss(600), "10:00");
        assert_eq!(format_mmss(0), "00:00");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::seconds(45)), "45 seconds");
        assert_eq!(format_duration(Duration::minutes(1)), "1 minute");
        assert_eq!(format_duration(Duration::seconds(90)), "1 minute, 30 seconds");
        assert_eq!(format_duration(Duration::minutes(90)), "1 hour, 30 minutes");
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("2"), Some(Duration::minutes(2)));
        assert_eq!(parse_duration("5m"), Some(Duration::minutes(5)));
        assert_eq!(parse_duration("90s"), Some(Duration::seconds(90)));
        assert_eq!(parse_duration("1m30s"), Some(Duration::seconds(90)));
        assert_eq!(parse_duration("0"), None);
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("abc"), None);
    }

    #[test]
    fn test_parse_duration_out_of_range() {
        assert_eq!(parse_duration("9223372036854775807"), None);
        assert_eq!(parse_duration("9999999999999999h"), None);
        assert_eq!(parse_duration("4611686018427387904s4611686018427387904s"), None);
        assert_eq!(parse_duration("99999999999999999999m"), None);
    }
}
