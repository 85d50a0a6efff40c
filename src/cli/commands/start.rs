//! Start command implementation.
//!
//! Resolves the session config, wires the driver to real audio and a
//! monotonic clock, and hands it to the TUI or the plain runner.

use std::io::Write;
use std::time::Duration;

use colored::Colorize;

use crate::cli::args::{OutputFormat, StartArgs};
use crate::config::{Config, Paths};
use crate::error::BreathError;
use crate::features::breath::{
    format_mmss, open_audio, parse_duration, AudioSink, Clock, MonotonicClock, SessionConfig,
    SessionDriver, SessionSummary, TickOutcome,
};
use crate::logging::init_logging;
use crate::output::format_summary;
use crate::tui;

/// Execute the start command.
///
/// # Errors
///
/// Returns an error if the config is invalid or the terminal fails.
pub fn start(paths: &Paths, args: &StartArgs, format: OutputFormat) -> Result<String, BreathError> {
    let config = Config::load_from_path(&paths.config_file)?;
    init_logging(&config.logging, &paths.logs)?;

    let session = resolve_session(&config, args)?;
    let audio = open_audio(config.audio.enabled && !args.no_audio, &config.sounds_dir(paths));
    let mut driver = SessionDriver::new(audio, MonotonicClock::new(), config.driver_settings());
    let frame_interval = Duration::from_millis(config.display.frame_interval_ms.max(1));

    let summary = if args.plain {
        let mut stdout = std::io::stdout();
        let echo = (format == OutputFormat::Pretty).then_some(&mut stdout as &mut dyn Write);
        Some(run_plain(&mut driver, session, frame_interval, echo)?)
    } else {
        tui::run(driver, session, frame_interval)?
    };

    match summary {
        Some(summary) => format_summary(&summary, format),
        None => Ok(String::new()),
    }
}

/// Merge command-line overrides onto the configured session defaults.
///
/// # Errors
///
/// Returns `BreathError::Parse` for an unreadable duration and
/// `BreathError::InvalidConfig` if the result cannot drive a session.
pub fn resolve_session(config: &Config, args: &StartArgs) -> Result<SessionConfig, BreathError> {
    let mut session = config.session_config();

    if let Some(ref raw) = args.duration {
        let duration = parse_duration(raw)
            .ok_or_else(|| BreathError::Parse(format!("Invalid duration: '{raw}'")))?;
        session.total_duration_secs = u32::try_from(duration.num_seconds())
            .map_err(|_| BreathError::Parse(format!("Duration too long: '{raw}'")))?;
    }
    if let Some(pace) = args.pace {
        session.pace_secs = pace;
    }
    if let Some(music) = args.music {
        session.music = music;
    }
    if args.instructions {
        session.instructions = true;
    }

    session.validate()?;
    Ok(session)
}

/// Run a session without drawing, echoing each phase change to `echo`.
///
/// Keeps polling after the session ends until background music has faded
/// out, so trailing ambience is not cut short.
///
/// # Errors
///
/// Returns an error if the session cannot start or `echo` fails.
pub fn run_plain<A: AudioSink, C: Clock>(
    driver: &mut SessionDriver<A, C>,
    session: SessionConfig,
    frame_interval: Duration,
    mut echo: Option<&mut dyn Write>,
) -> Result<SessionSummary, BreathError> {
    driver.start(session)?;

    if let Some(out) = echo.as_deref_mut() {
        writeln!(
            out,
            "{} {} at {}s per side",
            "Breathing for".bold(),
            format_mmss(u64::from(session.total_duration_secs)),
            session.pace_secs
        )?;
    }

    let mut summary = None;
    loop {
        match driver.poll_now() {
            TickOutcome::Frame(update) => {
                if let (Some(phase), Some(out)) = (update.transition, echo.as_deref_mut()) {
                    writeln!(
                        out,
                        "{}  {:<6} {}s",
                        update.timer.dimmed(),
                        phase.label().cyan(),
                        update.countdown
                    )?;
                }
            }
            TickOutcome::Completed(done) => summary = Some(done),
            TickOutcome::Idle => {}
        }

        if driver.is_idle() {
            break;
        }
        std::thread::sleep(idle_wait(driver, frame_interval));
    }

    summary.ok_or_else(|| BreathError::Config("Session ended without completing".to_string()))
}

/// How long the plain runner sleeps before polling again.
///
/// Frames are needed only while a session runs. After it ends, the only
/// remaining work is the music fade-out, so sleep straight to it.
fn idle_wait<A: AudioSink, C: Clock>(
    driver: &SessionDriver<A, C>,
    frame_interval: Duration,
) -> Duration {
    match driver.next_deadline() {
        Some(due) if !driver.is_active() => {
            Duration::from_millis(due.saturating_since(driver.now()))
        }
        _ => frame_interval,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::breath::{DriverSettings, ManualClock, MusicTrack, NullAudio};

    #[test]
    fn test_resolve_session_overrides() {
        let config = Config::default();
        let args = StartArgs {
            duration: Some("5m".to_string()),
            pace: Some(4),
            music: Some(MusicTrack::RiverSounds),
            instructions: true,
            ..StartArgs::default()
        };

        let session = resolve_session(&config, &args).unwrap();
        assert_eq!(session.total_duration_secs, 300);
        assert_eq!(session.pace_secs, 4);
        assert_eq!(session.music, MusicTrack::RiverSounds);
        assert!(session.instructions);
    }

    #[test]
    fn test_resolve_session_uses_config_defaults() {
        let mut config = Config::default();
        config.session.instructions = true;
        config.session.duration_seconds = 60;

        let session = resolve_session(&config, &StartArgs::default()).unwrap();
        assert_eq!(session.total_duration_secs, 60);
        assert_eq!(session.pace_secs, 5);
        assert!(session.instructions);
    }

    #[test]
    fn test_resolve_session_rejects_bad_duration() {
        let args = StartArgs {
            duration: Some("soon".to_string()),
            ..StartArgs::default()
        };
        let err = resolve_session(&Config::default(), &args).unwrap_err();
        assert!(matches!(err, BreathError::Parse(_)));
    }

    #[test]
    fn test_plain_run_echoes_phases() {
        colored::control::set_override(false);
        let mut driver =
            SessionDriver::new(NullAudio, MonotonicClock::new(), DriverSettings::default());
        let session = SessionConfig {
            total_duration_secs: 2,
            pace_secs: 1,
            music: MusicTrack::None,
            instructions: false,
        };

        let mut out = Vec::new();
        let summary = run_plain(
            &mut driver,
            session,
            Duration::from_millis(5),
            Some(&mut out as &mut dyn Write),
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(summary.completed);
        assert!(text.contains("Inhale"));
        assert!(text.contains("Hold"));
    }

    #[test]
    fn test_idle_wait_sleeps_until_fade_out() {
        let clock = ManualClock::new();
        let mut driver = SessionDriver::new(NullAudio, clock.clone(), DriverSettings::default());
        let frame_interval = Duration::from_millis(16);
        let session = SessionConfig {
            total_duration_secs: 60,
            pace_secs: 4,
            music: MusicTrack::RiverSounds,
            instructions: false,
        };

        driver.start(session).unwrap();
        assert_eq!(idle_wait(&driver, frame_interval), frame_interval);

        clock.set(1_000);
        driver.stop();
        assert_eq!(idle_wait(&driver, frame_interval), Duration::from_millis(20_000));

        clock.set(6_000);
        assert_eq!(idle_wait(&driver, frame_interval), Duration::from_millis(15_000));
    }
}
