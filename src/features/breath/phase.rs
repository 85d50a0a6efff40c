//! Breathing phases and the presentation/audio facts attached to each.

use serde::{Deserialize, Serialize};

/// One quarter of a box-breathing cycle.
///
/// Phases run in a fixed cyclic order and each lasts one pace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// Breathe in.
    Inhale,
    /// Hold with full lungs.
    HoldIn,
    /// Breathe out.
    Exhale,
    /// Hold with empty lungs.
    HoldOut,
}

/// Side of the breathing square the pacer travels along during a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Border {
    Left,
    Top,
    Right,
    Bottom,
}

/// Audio cue family played on entering a phase.
///
/// Both holds share one cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cue {
    Inhale,
    Hold,
    Exhale,
}

impl Phase {
    /// All phases in cycle order.
    pub const ALL: [Self; 4] = [Self::Inhale, Self::HoldIn, Self::Exhale, Self::HoldOut];

    /// Phase for a cycle index. Indices wrap modulo 4.
    #[must_use]
    pub const fn from_index(index: u64) -> Self {
        match index % 4 {
            0 => Self::Inhale,
            1 => Self::HoldIn,
            2 => Self::Exhale,
            _ => Self::HoldOut,
        }
    }

    /// Label shown to the user.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Inhale => "Inhale",
            Self::HoldIn | Self::HoldOut => "Hold",
            Self::Exhale => "Exhale",
        }
    }

    /// Border highlighted while this phase is current.
    #[must_use]
    pub const fn border(self) -> Border {
        match self {
            Self::Inhale => Border::Left,
            Self::HoldIn => Border::Top,
            Self::Exhale => Border::Right,
            Self::HoldOut => Border::Bottom,
        }
    }

    /// Cue played when the phase begins.
    #[must_use]
    pub const fn cue(self) -> Cue {
        match self {
            Self::Inhale => Cue::Inhale,
            Self::HoldIn | Self::HoldOut => Cue::Hold,
            Self::Exhale => Cue::Exhale,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
