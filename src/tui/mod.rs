//! Terminal User Interface (TUI) for boxbreath.
//!
//! Draws the breathing square, the pacer and its trail, and the session
//! timer. Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::{App, Screen};

use std::io;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::error::BreathError;
use crate::features::breath::{AudioSink, Clock, SessionConfig, SessionDriver, SessionSummary};

/// Run a session in the TUI.
///
/// Returns the summary of the last session that finished. Quitting stops
/// a running session first, so a summary is always present after a clean
/// exit. Background music ends with the process.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run<A: AudioSink, C: Clock>(
    driver: SessionDriver<A, C>,
    session: SessionConfig,
    frame_interval: Duration,
) -> Result<Option<SessionSummary>, BreathError> {
    let mut app = App::new(driver, session)?;

    // Setup terminal
    enable_raw_mode()
        .map_err(|e| BreathError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| BreathError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| BreathError::Terminal(format!("Failed to create terminal: {e}")))?;

    let result = run_app(&mut terminal, &mut app, frame_interval);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result.map(|()| app.summary().cloned())
}

/// Run the main application loop.
fn run_app<B: Backend, A: AudioSink, C: Clock>(
    terminal: &mut Terminal<B>,
    app: &mut App<A, C>,
    frame_interval: Duration,
) -> Result<(), BreathError> {
    while !app.should_quit {
        app.on_frame();

        // Draw UI
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| BreathError::Terminal(format!("Failed to draw: {e}")))?;

        // Handle events
        if let Some(action) = event::handle_events(frame_interval)? {
            match action {
                event::Action::Quit => app.quit(),
                event::Action::TogglePause => app.toggle_pause(),
                event::Action::ToggleInstructions => app.toggle_instructions(),
                event::Action::Stop => app.stop(),
                event::Action::Repeat => app.repeat()?,
            }
        }
    }

    Ok(())
}
