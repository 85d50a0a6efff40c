//! Application state for the TUI.

use crate::error::BreathError;
use crate::features::breath::{
    AudioSink, Clock, SessionConfig, SessionDriver, SessionSummary, TickOutcome,
};

/// Which screen is showing.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    /// A session is running or paused.
    Breathing,
    /// The last session ended; its summary is shown.
    Finished(SessionSummary),
}

/// Application state.
pub struct App<A, C> {
    /// The session driver.
    pub driver: SessionDriver<A, C>,
    /// Config used for the current session and for repeats.
    pub config: SessionConfig,
    /// Current screen.
    pub screen: Screen,
    /// Status message to display.
    pub status: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl<A: AudioSink, C: Clock> App<A, C> {
    /// Create the app and start the first session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session config is invalid.
    pub fn new(mut driver: SessionDriver<A, C>, config: SessionConfig) -> Result<Self, BreathError> {
        driver.start(config)?;
        Ok(Self {
            driver,
            config,
            screen: Screen::Breathing,
            status: None,
            should_quit: false,
        })
    }

    /// Advance the driver by one loop iteration.
    pub fn on_frame(&mut self) {
        if let TickOutcome::Completed(summary) = self.driver.poll_now() {
            self.status = Some("Well done".to_string());
            self.screen = Screen::Finished(summary);
        }
    }

    /// Pause or resume.
    pub fn toggle_pause(&mut self) {
        if let Some(paused) = self.driver.toggle_pause() {
            self.status = Some(if paused { "Paused" } else { "Resumed" }.to_string());
        }
    }

    /// Mute or unmute spoken instructions.
    pub fn toggle_instructions(&mut self) {
        if let Some(enabled) = self.driver.toggle_instructions() {
            self.status = Some(
                if enabled {
                    "Instructions on"
                } else {
                    "Instructions muted"
                }
                .to_string(),
            );
        }
    }

    /// End the session early and show its summary.
    pub fn stop(&mut self) {
        if let Some(summary) = self.driver.stop() {
            self.status = Some("Stopped".to_string());
            self.screen = Screen::Finished(summary);
        }
    }

    /// Start the same session again from the finished screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot start.
    pub fn repeat(&mut self) -> Result<(), BreathError> {
        if matches!(self.screen, Screen::Finished(_)) {
            self.driver.start(self.config)?;
            self.screen = Screen::Breathing;
            self.status = None;
        }
        Ok(())
    }

    /// Stop any running session and leave.
    pub fn quit(&mut self) {
        self.stop();
        self.should_quit = true;
    }

    /// Summary of the last finished session, if any.
    #[must_use]
    pub fn summary(&self) -> Option<&SessionSummary> {
        match &self.screen {
            Screen::Finished(summary) => Some(summary),
            Screen::Breathing => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::breath::{DriverSettings, ManualClock, MusicTrack, NullAudio};

    fn app(duration: u32) -> (App<NullAudio, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let driver = SessionDriver::new(NullAudio, clock.clone(), DriverSettings::default());
        let config = SessionConfig {
            total_duration_secs: duration,
            pace_secs: 2,
            music: MusicTrack::None,
            instructions: false,
        };
        (App::new(driver, config).unwrap(), clock)
    }

    #[test]
    fn test_completion_switches_screen() {
        let (mut app, clock) = app(3);
        app.on_frame();
        assert_eq!(app.screen, Screen::Breathing);

        clock.set(3_000);
        app.on_frame();
        assert!(app.summary().is_some_and(|s| s.completed));
        assert_eq!(app.status.as_deref(), Some("Well done"));
    }

    #[test]
    fn test_stop_then_repeat() {
        let (mut app, clock) = app(60);
        app.on_frame();
        clock.set(4_000);
        app.stop();
        assert!(app.summary().is_some_and(|s| !s.completed));

        app.repeat().unwrap();
        assert_eq!(app.screen, Screen::Breathing);
        assert!(app.driver.is_active());
    }

    #[test]
    fn test_repeat_ignored_while_breathing() {
        let (mut app, _clock) = app(60);
        app.repeat().unwrap();
        assert_eq!(app.screen, Screen::Breathing);
    }

    #[test]
    fn test_pause_status() {
        let (mut app, _clock) = app(60);
        app.toggle_pause();
        assert_eq!(app.status.as_deref(), Some("Paused"));
        assert!(app.driver.is_paused());
        app.toggle_pause();
        assert_eq!(app.status.as_deref(), Some("Resumed"));
    }

    #[test]
    fn test_quit_stops_session() {
        let (mut app, _clock) = app(60);
        app.quit();
        assert!(app.should_quit);
        assert!(!app.driver.is_active());
    }
}
