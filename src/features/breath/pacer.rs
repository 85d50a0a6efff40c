//! Pacer motion around the breathing square, and its fading trail.

use serde::Serialize;

use super::phase::Phase;

/// Default number of trail slots behind the pacer.
pub const DEFAULT_TRAIL_LENGTH: usize = 15;

/// Default delay between consecutive trail slots, in milliseconds.
pub const DEFAULT_TRAIL_STAGGER_MS: u64 = 25;

/// A 2D offset in presentation units, measured from the square's top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Square and dot sizes the pacer is laid out against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquareGeometry {
    /// Side length of the breathing square.
    pub square_size: f64,
    /// Diameter of the pacer dot.
    pub dot_size: f64,
}

impl Default for SquareGeometry {
    fn default() -> Self {
        Self {
            square_size: 300.0,
            dot_size: 20.0,
        }
    }
}

impl SquareGeometry {
    /// Point on the square's perimeter for a phase and progress.
    ///
    /// The pacer travels one side per phase at constant speed: up the left
    /// edge, across the top, down the right edge, back along the bottom.
    #[must_use]
    pub fn perimeter_point(&self, phase: Phase, progress: f64) -> Offset {
        let s = self.square_size;
        match phase {
            Phase::Inhale => Offset::new(0.0, s - s * progress),
            Phase::HoldIn => Offset::new(s * progress, 0.0),
            Phase::Exhale => Offset::new(s, s * progress),
            Phase::HoldOut => Offset::new(s - s * progress, s),
        }
    }

    /// Offset that centres the dot on the perimeter point.
    #[must_use]
    pub fn pacer_offset(&self, phase: Phase, progress: f64) -> Offset {
        let point = self.perimeter_point(phase, progress);
        let half = self.dot_size / 2.0;
        Offset::new(point.x - half, point.y - half)
    }
}

/// One slot of the trail as currently presented.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TrailSlot {
    pub offset: Offset,
    pub opacity: f64,
}

/// A pending write into one trail slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailWrite {
    pub slot: usize,
    pub offset: Offset,
    pub opacity: f64,
}

/// Fixed-length history of recent pacer positions.
///
/// Slot `i` lags the pacer by `i * stagger_ms` and fades linearly with
/// its index. Writes arrive through the scheduler, so the trail only holds
/// what has already been applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    slots: Vec<TrailSlot>,
    stagger_ms: u64,
}

impl Trail {
    #[must_use]
    pub fn new(length: usize, stagger_ms: u64) -> Self {
        Self {
            slots: vec![TrailSlot::default(); length],
            stagger_ms,
        }
    }

    #[must_use]
    pub fn slots(&self) -> &[TrailSlot] {
        &self.slots
    }

    /// Opacity assigned to a slot: `1 - index / length`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn opacity_for(&self, slot: usize) -> f64 {
        if self.slots.is_empty() {
            return 0.0;
        }
        1.0 - (slot as f64 / self.slots.len() as f64)
    }

    /// Delay before a slot picks up a new pacer position.
    #[must_use]
    pub const fn delay_for(&self, slot: usize) -> u64 {
        slot as u64 * self.stagger_ms
    }

    /// One staggered write per slot for a freshly emitted pacer offset.
    #[must_use]
    pub fn writes_for(&self, offset: Offset) -> Vec<(u64, TrailWrite)> {
        (0..self.slots.len())
            .map(|slot| {
                (
                    self.delay_for(slot),
                    TrailWrite {
                        slot,
                        offset,
                        opacity: self.opacity_for(slot),
                    },
                )
            })
            .collect()
    }

    /// Apply a write. Out-of-range slots are ignored.
    pub fn apply(&mut self, write: TrailWrite) {
        if let Some(slot) = self.slots.get_mut(write.slot) {
            slot.offset = write.offset;
            slot.opacity = write.opacity;
        }
    }
}
