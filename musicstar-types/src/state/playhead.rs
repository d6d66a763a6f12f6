//! Playhead traversal: where a lane's cursor goes on each due interval.
//!
//! Two traversal shapes:
//! - **wrap**: step by `direction` modulo [`STEPS`], direction taken from `reverse`
//! - **bounce** (arpeggio): the cursor keeps its own direction and turns around
//!   when it reaches step 0 or the last step
//!
//! Either shape can skip inactive steps. A wrap search needs at least one
//! active step and a bounce search at least two, so both always terminate.
//! With a lone active step the bounce sweeps through the silent steps.

use super::Pattern;
use crate::{LAST_STEP, STEPS};

/// Upper bound on moves in one bounce search. A sweep out to a boundary and
/// back covers every step, which takes fewer than `2 * STEPS` moves.
const MAX_BOUNCE_SEARCH: usize = 2 * STEPS;

/// Mode flags that shape a single advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Traversal {
    pub reverse: bool,
    pub skip: bool,
    pub arp: bool,
    /// One-shot: jump back to the start of the lane on this advance.
    pub restart: bool,
}

/// Runtime position of a lane. Not part of the lane's settings: reset on scene entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playhead {
    /// Step the playhead currently sits on.
    pub cursor: usize,
    /// +1 or -1.
    pub direction: i8,
    /// Seconds accumulated since the last due interval.
    pub elapsed: f64,
    /// `reverse` as of the last advance, used to notice flips while bouncing.
    synced_reverse: bool,
}

pub fn direction_for(reverse: bool) -> i8 {
    if reverse {
        -1
    } else {
        1
    }
}

fn step_by(cursor: usize, direction: i8) -> usize {
    (cursor as isize + direction as isize).rem_euclid(STEPS as isize) as usize
}

impl Playhead {
    /// Parked on the last step so the first forward advance lands on step 0.
    pub fn new(reverse: bool) -> Self {
        Self {
            cursor: LAST_STEP,
            direction: direction_for(reverse),
            elapsed: 0.0,
            synced_reverse: reverse,
        }
    }

    /// Move the cursor one due interval and return the new position.
    pub fn advance(&mut self, pattern: &Pattern, mode: Traversal) -> usize {
        let reverse_changed = mode.reverse != self.synced_reverse;
        self.synced_reverse = mode.reverse;

        if mode.restart {
            // Restart always re-enters through the normal forward wrap.
            self.cursor = LAST_STEP;
            self.direction = 1;
            self.cursor = self.wrap(pattern, mode.skip);
        } else if mode.arp {
            if reverse_changed {
                self.direction = direction_for(mode.reverse);
            }
            self.cursor = self.bounce(pattern, mode.skip);
        } else {
            self.direction = direction_for(mode.reverse);
            self.cursor = self.wrap(pattern, mode.skip);
        }
        self.cursor
    }

    fn wrap(&self, pattern: &Pattern, skip: bool) -> usize {
        let mut cursor = step_by(self.cursor, self.direction);
        if skip && pattern.active_count() > 0 {
            while !pattern.is_active(cursor) {
                cursor = step_by(cursor, self.direction);
            }
        }
        cursor
    }

    fn bounce(&mut self, pattern: &Pattern, skip: bool) -> usize {
        let search = skip && pattern.active_count() > 1;
        let start = self.cursor;
        let mut cursor = start;

        for _ in 0..MAX_BOUNCE_SEARCH {
            if cursor == LAST_STEP {
                self.direction = -1;
            } else if cursor == 0 {
                self.direction = 1;
            }
            cursor = step_by(cursor, self.direction);
            if !search || (pattern.is_active(cursor) && cursor != start) {
                break;
            }
        }
        cursor
    }
}

impl Default for Playhead {
    fn default() -> Self {
        Self::new(false)
    }
}
