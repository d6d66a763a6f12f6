//! Action types for the dispatch system.
//!
//! Actions are user intents coming from the UI (step buttons, mode buttons,
//! knobs, match stars). Reducing an action yields a [`DispatchResult`] that
//! lists every control whose value changed, including values mirrored onto
//! the other lane, so the UI can keep its widgets in sync without reaching
//! into the sequencer.

use serde::{Deserialize, Serialize};

use crate::{Lane, ModeFlag, STEPS};

/// A parameter that can be mirrored between lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchKind {
    Tempo,
    Freq,
    Flag(ModeFlag),
}

impl MatchKind {
    pub fn name(self) -> &'static str {
        match self {
            MatchKind::Tempo => "tempo",
            MatchKind::Freq => "freq",
            MatchKind::Flag(flag) => flag.name(),
        }
    }
}

/// A step came due on a lane and that step is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepFired {
    pub lane: Lane,
    pub step: usize,
}

/// A visible value changed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LaneUpdate {
    Step { lane: Lane, step: usize, active: bool },
    Cleared { lane: Lane },
    Tempo { lane: Lane, tempo: f32, percent: f32 },
    Freq { lane: Lane, freq: f32, percent: f32 },
    Flag { lane: Lane, flag: ModeFlag, value: bool },
    Match { kind: MatchKind, enabled: bool },
    PlayheadsReset,
}

impl LaneUpdate {
    /// Lane the update belongs to, if it is lane-specific.
    pub fn lane(&self) -> Option<Lane> {
        match *self {
            LaneUpdate::Step { lane, .. }
            | LaneUpdate::Cleared { lane }
            | LaneUpdate::Tempo { lane, .. }
            | LaneUpdate::Freq { lane, .. }
            | LaneUpdate::Flag { lane, .. } => Some(lane),
            LaneUpdate::Match { .. } | LaneUpdate::PlayheadsReset => None,
        }
    }
}

/// Sequencer actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StarAction {
    /// Flip one step on or off
    ToggleStep(Lane, usize),
    /// Switch every step of a lane off
    ClearLane(Lane),
    /// Tempo knob position, 0.0-1.0
    SetTempo(Lane, f32),
    /// Freq knob position, 0.0-1.0
    SetFreq(Lane, f32),
    SetModeFlag(Lane, ModeFlag, bool),
    ToggleModeFlag(Lane, ModeFlag),
    ToggleMatch(MatchKind),
    /// Scene (re)entered: playheads go back to the start
    EnterScene,
}

impl StarAction {
    /// Lane named by the action, if any.
    pub fn lane(&self) -> Option<Lane> {
        match *self {
            StarAction::ToggleStep(lane, _)
            | StarAction::ClearLane(lane)
            | StarAction::SetTempo(lane, _)
            | StarAction::SetFreq(lane, _)
            | StarAction::SetModeFlag(lane, _, _)
            | StarAction::ToggleModeFlag(lane, _) => Some(lane),
            StarAction::ToggleMatch(_) | StarAction::EnterScene => None,
        }
    }

    /// Whether the arguments are in range: steps below [`STEPS`], knob
    /// positions within `0.0..=1.0`. Input read from files is checked with
    /// this before it reaches the sequencer.
    pub fn is_valid(&self) -> bool {
        match *self {
            StarAction::ToggleStep(_, step) => step < STEPS,
            StarAction::SetTempo(_, percent) | StarAction::SetFreq(_, percent) => {
                (0.0..=1.0).contains(&percent)
            }
            _ => true,
        }
    }
}

/// Outcome of reducing an action.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchResult {
    pub updates: Vec<LaneUpdate>,
}

impl DispatchResult {
    pub fn with_updates(updates: Vec<LaneUpdate>) -> Self {
        Self { updates }
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    /// Updates that landed on a lane other than `origin`: the mirrored writes.
    pub fn mirrored(&self, origin: Lane) -> impl Iterator<Item = &LaneUpdate> + '_ {
        self.updates
            .iter()
            .filter(move |u| u.lane().is_some_and(|lane| lane != origin))
    }
}
