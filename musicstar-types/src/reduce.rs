//! Pure state-mutation reducer for sequencer actions.
//!
//! `reduce_action` is the single source of truth for action → state mutations.
//! It does not log and does not touch the clock beyond what an action names;
//! the core crate's dispatch wraps it with logging.

use crate::{DispatchResult, StarAction, StarSequencer};

/// Apply an action and report every value that changed.
pub fn reduce_action(action: &StarAction, seq: &mut StarSequencer) -> DispatchResult {
    match *action {
        StarAction::ToggleStep(lane, step) => {
            DispatchResult::with_updates(vec![seq.toggle_step(lane, step)])
        }
        StarAction::ClearLane(lane) => DispatchResult::with_updates(vec![seq.clear_lane(lane)]),
        StarAction::SetTempo(lane, percent) => {
            DispatchResult::with_updates(seq.set_tempo(lane, percent))
        }
        StarAction::SetFreq(lane, percent) => {
            DispatchResult::with_updates(seq.set_freq(lane, percent))
        }
        StarAction::SetModeFlag(lane, flag, value) => {
            DispatchResult::with_updates(seq.set_mode_flag(lane, flag, value))
        }
        StarAction::ToggleModeFlag(lane, flag) => {
            let value = !seq.mode_flag(lane, flag);
            DispatchResult::with_updates(seq.set_mode_flag(lane, flag, value))
        }
        StarAction::ToggleMatch(kind) => DispatchResult::with_updates(seq.toggle_match(kind)),
        StarAction::EnterScene => DispatchResult::with_updates(vec![seq.enter_scene()]),
    }
}
