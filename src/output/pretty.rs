use colored::Colorize;

use super::TrackStatus;
use crate::features::breath::{format_mmss, SessionSummary};

/// Format a finished session as pretty output
pub fn format_summary_pretty(summary: &SessionSummary) -> String {
    let (icon, headline) = if summary.completed {
        ("✅", "Session complete".green().bold())
    } else {
        ("⏹️", "Session stopped".yellow().bold())
    };

    let config = &summary.config;
    let mut lines = vec![
        format!("{icon} {headline}"),
        format!("   Breathed:  {}", format_mmss(summary.elapsed_ms / 1000)),
        format!("   Cycles:    {}", summary.cycles_completed),
        format!(
            "   Pattern:   {s}-{s}-{s}-{s}",
            s = config.pace_secs
        ),
    ];

    if summary.paused_ms >= 1000 {
        lines.push(format!("   Paused:    {}", format_mmss(summary.paused_ms / 1000)));
    }

    lines.push(format!("   Music:     {}", config.music));
    lines.push(format!(
        "   Started:   {}",
        summary
            .started_at
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .dimmed()
    ));

    lines.join("\n")
}

/// Format the audio catalog as pretty output
pub fn format_tracks_pretty(tracks: &[TrackStatus]) -> String {
    let mut output = format!("Audio tracks ({} total)\n", tracks.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for track in tracks {
        let marker = if track.present {
            "[x]".green()
        } else {
            "[ ]".red()
        };
        let kind = if track.music { "music" } else { "cue" };
        output.push_str(&format!(
            "{marker} {:<20} {:<6} {}\n",
            track.id.bold(),
            kind,
            track.path.display().to_string().dimmed()
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::breath::{SessionConfig, SessionState, Timestamp};

    #[test]
    fn test_summary_pretty_contains_pattern() {
        colored::control::set_override(false);
        let config = SessionConfig {
            pace_secs: 4,
            ..SessionConfig::default()
        };
        let state = SessionState::new(Timestamp(0));
        let summary = SessionSummary::new(config, chrono::Utc::now(), &state, Timestamp(65_000), true);

        let text = format_summary_pretty(&summary);
        assert!(text.contains("Session complete"));
        assert!(text.contains("4-4-4-4"));
        assert!(text.contains("01:05"));
        assert!(!text.contains("Paused"));
    }

    #[test]
    fn test_tracks_pretty_lists_each_track() {
        colored::control::set_override(false);
        let tracks = super::super::track_statuses(std::path::Path::new("/nonexistent"));
        let text = format_tracks_pretty(&tracks);

        assert!(text.starts_with("Audio tracks (9 total)"));
        assert!(text.contains("gentle-piano"));
        assert!(text.contains("instruction-exhale"));
        assert!(text.contains("[ ]"));
    }
}
