//! Single entry point for UI-originated sequencer mutations.

use musicstar_types::reduce::reduce_action;
use musicstar_types::{DispatchResult, StarAction, StarSequencer};

/// Dispatch an action. Returns every value that changed, mirrored writes included,
/// so the caller can refresh the matching controls.
pub fn dispatch_action(action: &StarAction, seq: &mut StarSequencer) -> DispatchResult {
    let result = reduce_action(action, seq);
    log::debug!(target: "dispatch", "{:?}: {} update(s)", action, result.updates.len());
    if let Some(origin) = action.lane() {
        for update in result.mirrored(origin) {
            log::debug!(target: "dispatch", "mirrored onto {}: {:?}", origin.other(), update);
        }
    }
    result
}
