//! The session driver.
//!
//! Owns the one running session, samples the clock on every frame, and
//! turns elapsed time into presentation state and audio commands. The host
//! calls [`SessionDriver::poll`] once per loop iteration.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::audio::{AudioSink, Track};
use super::clock::{Clock, Timestamp};
use super::pacer::{
    Offset, SquareGeometry, Trail, TrailSlot, TrailWrite, DEFAULT_TRAIL_LENGTH,
    DEFAULT_TRAIL_STAGGER_MS,
};
use super::phase::{Border, Phase};
use super::scheduler::{Scheduler, TaskId};
use super::session::{SessionConfig, SessionState, SessionSummary};
use super::timing::{cycle_position, format_mmss, remaining_seconds};
use crate::error::BreathError;

/// Default delay before background music stops once a session ends.
pub const DEFAULT_MUSIC_FADE_OUT_MS: u64 = 20_000;

/// Layout and timing knobs that do not change the breathing rhythm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverSettings {
    pub geometry: SquareGeometry,
    pub trail_length: usize,
    pub trail_stagger_ms: u64,
    pub music_fade_out_ms: u64,
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            geometry: SquareGeometry::default(),
            trail_length: DEFAULT_TRAIL_LENGTH,
            trail_stagger_ms: DEFAULT_TRAIL_STAGGER_MS,
            music_fade_out_ms: DEFAULT_MUSIC_FADE_OUT_MS,
        }
    }
}

/// Work the driver defers through the scheduler.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Deferred {
    /// Staggered trail update, valid only for the session that scheduled it.
    Trail { generation: u64, write: TrailWrite },
    /// Stop background music after a session ended.
    FadeOutMusic { track: Track },
}

/// What the presentation surface shows right now.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Presentation {
    pub pacer: Offset,
    pub trail: Vec<TrailSlot>,
    pub timer: String,
    pub countdown: u64,
    pub phase: Phase,
    pub border: Border,
    pub paused: bool,
    pub instructions: bool,
}

/// Values emitted by one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameUpdate {
    pub elapsed_ms: u64,
    pub remaining_secs: u64,
    pub phase: Phase,
    pub progress: f64,
    pub pacer: Offset,
    pub timer: String,
    pub countdown: u64,
    /// Set when this tick entered a new phase.
    pub transition: Option<Phase>,
    /// Full cycles completed before this frame.
    pub cycle: u64,
}

/// Result of a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Nothing to do: no session, paused, or no frame pending.
    Idle,
    /// The session advanced.
    Frame(FrameUpdate),
    /// The timer ran out on this tick. Reported once per session.
    Completed(SessionSummary),
}

struct ActiveSession {
    config: SessionConfig,
    state: SessionState,
    generation: u64,
    started_at: DateTime<Utc>,
    instructions: bool,
    pacer: Offset,
    trail: Trail,
    timer: String,
    countdown: u64,
    phase: Phase,
}

/// Drives breathing sessions against an audio sink and a clock.
pub struct SessionDriver<A, C> {
    audio: A,
    clock: C,
    settings: DriverSettings,
    scheduler: Scheduler<Deferred>,
    session: Option<ActiveSession>,
    generation: u64,
    fade_out: Option<TaskId>,
}

impl<A: AudioSink, C: Clock> SessionDriver<A, C> {
    #[must_use]
    pub fn new(audio: A, clock: C, settings: DriverSettings) -> Self {
        Self {
            audio,
            clock,
            settings,
            scheduler: Scheduler::new(),
            session: None,
            generation: 0,
            fade_out: None,
        }
    }

    /// Start a session, replacing any session already running.
    ///
    /// # Errors
    ///
    /// Returns `BreathError::InvalidConfig` if the config cannot drive a
    /// session. A running session is left untouched in that case.
    pub fn start(&mut self, config: SessionConfig) -> Result<(), BreathError> {
        config.validate()?;

        let now = self.clock.now();
        if let Some(previous) = self.finish(now, false) {
            tracing::info!(elapsed_ms = previous.elapsed_ms, "Superseded running session");
        }
        self.cancel_fade_out(config.music.track());

        self.generation += 1;
        let (phase, countdown) = (Phase::Inhale, u64::from(config.pace_secs));
        self.session = Some(ActiveSession {
            config,
            state: SessionState::new(now),
            generation: self.generation,
            started_at: Utc::now(),
            instructions: config.instructions,
            pacer: self.settings.geometry.pacer_offset(phase, 0.0),
            trail: Trail::new(self.settings.trail_length, self.settings.trail_stagger_ms),
            timer: format_mmss(u64::from(config.total_duration_secs)),
            countdown,
            phase,
        });

        if let Some(track) = config.music.track() {
            self.audio.set_looping(track, true);
            self.audio.rewind(track);
            self.audio.play(track);
        }

        tracing::info!(
            duration_secs = config.total_duration_secs,
            pace_secs = config.pace_secs,
            music = %config.music,
            instructions = config.instructions,
            "Session started"
        );

        self.scheduler.request_frame();
        Ok(())
    }

    /// Advance the session to `now`.
    ///
    /// Re-arms the next frame unless the session completed on this tick.
    pub fn tick(&mut self, now: Timestamp) -> TickOutcome {
        let geometry = self.settings.geometry;
        let Some(session) = self.session.as_mut() else {
            return TickOutcome::Idle;
        };
        if session.state.paused {
            return TickOutcome::Idle;
        }

        let elapsed_ms = session.state.elapsed_at(now);
        let remaining_secs = remaining_seconds(session.config.total_duration_secs, elapsed_ms);
        if remaining_secs == 0 {
            return match self.finish(now, true) {
                Some(summary) => {
                    tracing::info!("{}", summary.format_status());
                    TickOutcome::Completed(summary)
                }
                None => TickOutcome::Idle,
            };
        }

        let position = cycle_position(elapsed_ms, session.config.pace_secs);
        let pacer = geometry.pacer_offset(position.phase, position.progress);
        let timer = format_mmss(remaining_secs);

        for (delay, write) in session.trail.writes_for(pacer) {
            let task = Deferred::Trail {
                generation: session.generation,
                write,
            };
            self.scheduler.schedule(now, delay, task);
        }

        session.pacer = pacer;
        session.timer.clone_from(&timer);
        session.countdown = position.phase_countdown;
        session.phase = position.phase;

        let transition = if session.state.last_phase == Some(position.phase) {
            None
        } else {
            session.state.last_phase = Some(position.phase);
            Some(position.phase)
        };

        if let Some(phase) = transition {
            let cue = phase.cue();
            self.audio.play(Track::cue(cue));
            if session.instructions {
                self.audio.play(Track::instruction(cue));
            }
            tracing::debug!(phase = %phase, cycle = position.cycle, "Phase transition");
        }

        self.scheduler.request_frame();

        TickOutcome::Frame(FrameUpdate {
            elapsed_ms,
            remaining_secs,
            phase: position.phase,
            progress: position.progress,
            pacer,
            timer,
            countdown: position.phase_countdown,
            transition,
            cycle: position.cycle,
        })
    }

    /// Run due deferred work, then tick if a frame is pending.
    pub fn poll(&mut self, now: Timestamp) -> TickOutcome {
        for task in self.scheduler.drain_due(now) {
            self.apply(task);
        }
        if self.scheduler.take_frame() {
            self.tick(now)
        } else {
            TickOutcome::Idle
        }
    }

    /// Poll against the driver's own clock.
    pub fn poll_now(&mut self) -> TickOutcome {
        let now = self.clock.now();
        self.poll(now)
    }

    /// Freeze the session. Returns false if there was nothing to pause.
    pub fn pause(&mut self) -> bool {
        let now = self.clock.now();
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.state.paused {
            return false;
        }

        session.state.paused = true;
        session.state.pause_start = Some(now);
        self.scheduler.cancel_frame();
        if let Some(track) = session.config.music.track() {
            self.audio.pause(track);
        }

        tracing::info!(at_ms = now.as_millis(), "Session paused");
        true
    }

    /// Continue a paused session. Returns false if it was not paused.
    pub fn resume(&mut self) -> bool {
        let now = self.clock.now();
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if !session.state.paused {
            return false;
        }

        let paused_for = session
            .state
            .pause_start
            .map_or(0, |paused_at| now.saturating_since(paused_at));
        session.state.paused_total_ms += paused_for;
        session.state.pause_start = None;
        session.state.paused = false;

        if let Some(track) = session.config.music.track() {
            self.audio.play(track);
        }
        self.scheduler.request_frame();

        tracing::info!(paused_for_ms = paused_for, "Session resumed");
        true
    }

    /// Pause if running, resume if paused. Returns the new paused state.
    pub fn toggle_pause(&mut self) -> Option<bool> {
        let paused = self.session.as_ref()?.state.paused;
        if paused {
            self.resume();
        } else {
            self.pause();
        }
        Some(!paused)
    }

    /// Mute or unmute spoken instructions for the running session.
    ///
    /// Returns the new setting, or `None` without a session.
    pub fn toggle_instructions(&mut self) -> Option<bool> {
        let session = self.session.as_mut()?;
        session.instructions = !session.instructions;
        tracing::info!(instructions = session.instructions, "Instructions toggled");
        Some(session.instructions)
    }

    /// End the session early.
    ///
    /// Idempotent: returns the summary the first time, `None` afterwards.
    pub fn stop(&mut self) -> Option<SessionSummary> {
        let now = self.clock.now();
        let summary = self.finish(now, false)?;
        tracing::info!("{}", summary.format_status());
        Some(summary)
    }

    /// Whether a session is running or paused.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.state.paused)
    }

    /// True when there is no session and no deferred work left.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.session.is_none() && self.scheduler.is_idle()
    }

    /// When the next deferred task falls due.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.scheduler.next_deadline()
    }

    #[must_use]
    pub const fn settings(&self) -> &DriverSettings {
        &self.settings
    }

    /// Current time on the driver's clock.
    #[must_use]
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Snapshot of what the presentation surface should show.
    #[must_use]
    pub fn presentation(&self) -> Option<Presentation> {
        self.session.as_ref().map(|s| Presentation {
            pacer: s.pacer,
            trail: s.trail.slots().to_vec(),
            timer: s.timer.clone(),
            countdown: s.countdown,
            phase: s.phase,
            border: s.phase.border(),
            paused: s.state.paused,
            instructions: s.instructions,
        })
    }

    #[cfg(test)]
    pub(crate) fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    /// Tear the current session down. Shared by stop, completion, and restart.
    fn finish(&mut self, now: Timestamp, completed: bool) -> Option<SessionSummary> {
        let session = self.session.take()?;

        self.scheduler.cancel_frame();
        self.scheduler
            .cancel_where(|task| matches!(task, Deferred::Trail { .. }));

        let music = session.config.music.track();
        for track in Track::ALL {
            if Some(track) != music {
                self.audio.pause(track);
                self.audio.rewind(track);
            }
        }

        if let Some(track) = music {
            let id = self.scheduler.schedule(
                now,
                self.settings.music_fade_out_ms,
                Deferred::FadeOutMusic { track },
            );
            self.fade_out = Some(id);
        }

        Some(SessionSummary::new(
            session.config,
            session.started_at,
            &session.state,
            now,
            completed,
        ))
    }

    /// Withdraw a pending fade-out so it cannot silence the next session.
    ///
    /// The faded track is paused right away unless the next session reuses it.
    fn cancel_fade_out(&mut self, next_music: Option<Track>) {
        let Some(id) = self.fade_out.take() else {
            return;
        };
        if let Some(Deferred::FadeOutMusic { track }) = self.scheduler.cancel(id) {
            if Some(track) != next_music {
                self.audio.pause(track);
            }
        }
    }

    fn apply(&mut self, task: Deferred) {
        match task {
            Deferred::Trail { generation, write } => {
                if let Some(session) = self.session.as_mut() {
                    if session.generation == generation {
                        session.trail.apply(write);
                    }
                }
            }
            Deferred::FadeOutMusic { track } => {
                self.fade_out = None;
                self.audio.pause(track);
                tracing::debug!(track = %track, "Background music faded out");
            }
        }
    }
}
