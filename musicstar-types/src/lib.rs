//! # musicstar-types
//!
//! Shared type definitions for the Music Star step sequencer.
//! Pure data and pure reducers: no I/O, no logging, no clock.
//!
//! The sequencer owns two [`Lane`]s of [`STEPS`] steps each. UI code mutates
//! it through [`StarAction`] values passed to [`reduce::reduce_action`]; a
//! host loop advances it with [`StarSequencer::tick`].

pub mod action;
pub mod range;
pub mod reduce;
pub mod state;

pub use action::*;
pub use range::{Curve, ParamRange};
pub use state::*;

/// Number of steps in a lane's pattern.
pub const STEPS: usize = 12;

/// Index of the last step. A playhead parked here lands on step 0 next.
pub const LAST_STEP: usize = STEPS - 1;

/// One of the two independent sequencer lanes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Lane {
    Top,
    Bottom,
}

impl Lane {
    pub const ALL: [Lane; 2] = [Lane::Top, Lane::Bottom];

    pub fn index(self) -> usize {
        match self {
            Lane::Top => 0,
            Lane::Bottom => 1,
        }
    }

    /// Lane for a raw index (0 = top, anything else = bottom).
    pub fn from_index(idx: usize) -> Self {
        debug_assert!(idx < 2, "lane index {} out of range", idx);
        if idx == 0 {
            Lane::Top
        } else {
            Lane::Bottom
        }
    }

    /// The lane that mirrored parameters are copied to.
    pub fn other(self) -> Self {
        match self {
            Lane::Top => Lane::Bottom,
            Lane::Bottom => Lane::Top,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Lane::Top => "top",
            Lane::Bottom => "bottom",
        }
    }
}

impl std::fmt::Display for Lane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

/// Clamp a step index into the pattern, flagging out-of-range input in debug builds.
pub(crate) fn checked_step(step: usize) -> usize {
    debug_assert!(step < STEPS, "step {} out of range 0..{}", step, STEPS);
    step.min(LAST_STEP)
}

/// Clamp a normalized control position into [0, 1], flagging bad input in debug builds.
pub(crate) fn checked_percent(percent: f32) -> f32 {
    debug_assert!(
        (0.0..=1.0).contains(&percent),
        "percent {} out of range 0..=1",
        percent
    );
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 1.0)
    }
}
