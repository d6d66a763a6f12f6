//! Per-lane step pattern.

use serde::{Deserialize, Serialize};

use crate::{checked_step, STEPS};

/// Fixed-length on/off pattern. Keeps a running count of active steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[bool; STEPS]", into = "[bool; STEPS]")]
pub struct Pattern {
    steps: [bool; STEPS],
    active: usize, // always equals the number of `true` entries in `steps`
}

impl Pattern {
    pub fn new() -> Self {
        Self { steps: [false; STEPS], active: 0 }
    }

    /// Pattern with the given steps switched on. Out-of-range steps are ignored.
    pub fn with_steps(active_steps: &[usize]) -> Self {
        let mut pattern = Self::new();
        for &step in active_steps {
            if step < STEPS {
                pattern.set(step, true);
            }
        }
        pattern
    }

    pub fn toggle(&mut self, step: usize) -> bool {
        let step = checked_step(step);
        let now = !self.steps[step];
        self.steps[step] = now;
        if now {
            self.active += 1;
        } else {
            self.active -= 1;
        }
        now
    }

    pub fn set(&mut self, step: usize, active: bool) {
        let step = checked_step(step);
        if self.steps[step] != active {
            self.toggle(step);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn is_active(&self, step: usize) -> bool {
        self.steps.get(step).copied().unwrap_or(false)
    }

    pub fn active_count(&self) -> usize {
        self.active
    }

    pub fn steps(&self) -> &[bool; STEPS] {
        &self.steps
    }

    /// Indices of active steps, ascending.
    pub fn active_steps(&self) -> impl Iterator<Item = usize> + '_ {
        self.steps
            .iter()
            .enumerate()
            .filter_map(|(i, &on)| on.then_some(i))
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[bool; STEPS]> for Pattern {
    fn from(steps: [bool; STEPS]) -> Self {
        let active = steps.iter().filter(|&&on| on).count();
        Self { steps, active }
    }
}

impl From<Pattern> for [bool; STEPS] {
    fn from(pattern: Pattern) -> Self {
        pattern.steps
    }
}
