//! Guided box breathing.
//!
//! A session walks the user around a square, one side per phase:
//! - Cycle arithmetic derived from pause-adjusted elapsed time
//! - Pacer motion and a staggered, fading trail
//! - Phase cues, spoken instructions, and background music
//! - Frame scheduling with cancellable deferred work

pub mod audio;
pub mod clock;
pub mod driver;
pub mod pacer;
pub mod phase;
pub mod scheduler;
pub mod session;
pub mod timing;

pub use audio::{open_audio, AudioSink, MusicTrack, NullAudio, RodioAudio, Track};
pub use clock::{Clock, ManualClock, MonotonicClock, Timestamp};
pub use driver::{DriverSettings, FrameUpdate, Presentation, SessionDriver, TickOutcome};
pub use pacer::{Offset, SquareGeometry, Trail, TrailSlot};
pub use phase::{Border, Cue, Phase};
pub use scheduler::{Scheduler, TaskId};
pub use session::{SessionConfig, SessionState, SessionSummary};
pub use timing::{cycle_position, format_duration, format_mmss, parse_duration, CyclePosition};
