//! Per-lane settings: pattern, tempo, freq and mode flags.

use serde::{Deserialize, Serialize};

use super::{Pattern, Playhead, Traversal};

/// Lowest tempo the clock will honor, whatever the configured range says.
/// Keeps the step interval finite.
pub const MIN_TEMPO: f32 = 1.0;

/// Per-lane traversal mode flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModeFlag {
    Reverse,
    Skip,
    /// One-shot: armed by the UI, cleared by the next due interval.
    Restart,
    Arp,
}

impl ModeFlag {
    pub fn name(self) -> &'static str {
        match self {
            ModeFlag::Reverse => "reverse",
            ModeFlag::Skip => "skip",
            ModeFlag::Restart => "restart",
            ModeFlag::Arp => "arp",
        }
    }
}

/// One sequencer lane.
#[derive(Debug, Clone, Serialize)]
pub struct LaneState {
    pattern: Pattern,
    /// Beats per minute; one step per beat.
    tempo: f32,
    /// Filter cutoff in Hz.
    freq: f32,
    reverse: bool,
    skip: bool,
    restart: bool,
    arp: bool,
    #[serde(skip)]
    playhead: Playhead,
}

impl LaneState {
    pub fn new(pattern: Pattern, tempo: f32, freq: f32) -> Self {
        Self {
            pattern,
            tempo,
            freq,
            reverse: false,
            skip: false,
            restart: false,
            arp: false,
            playhead: Playhead::new(false),
        }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub(crate) fn pattern_mut(&mut self) -> &mut Pattern {
        &mut self.pattern
    }

    pub fn tempo(&self) -> f32 {
        self.tempo
    }

    pub(crate) fn set_tempo(&mut self, tempo: f32) {
        self.tempo = tempo;
    }

    pub fn freq(&self) -> f32 {
        self.freq
    }

    pub(crate) fn set_freq(&mut self, freq: f32) {
        self.freq = freq;
    }

    pub fn flag(&self, flag: ModeFlag) -> bool {
        match flag {
            ModeFlag::Reverse => self.reverse,
            ModeFlag::Skip => self.skip,
            ModeFlag::Restart => self.restart,
            ModeFlag::Arp => self.arp,
        }
    }

    pub(crate) fn set_flag(&mut self, flag: ModeFlag, value: bool) {
        match flag {
            ModeFlag::Reverse => self.reverse = value,
            ModeFlag::Skip => self.skip = value,
            ModeFlag::Restart => self.restart = value,
            ModeFlag::Arp => self.arp = value,
        }
    }

    pub fn playhead(&self) -> &Playhead {
        &self.playhead
    }

    pub(crate) fn playhead_mut(&mut self) -> &mut Playhead {
        &mut self.playhead
    }

    pub(crate) fn reset_playhead(&mut self) {
        self.playhead = Playhead::new(self.reverse);
    }

    /// Seconds between due intervals.
    pub fn interval_secs(&self) -> f64 {
        60.0 / f64::from(self.tempo.max(MIN_TEMPO))
    }

    /// Advance the playhead one due interval, consuming an armed restart.
    pub(crate) fn advance(&mut self) -> usize {
        let mode = Traversal {
            reverse: self.reverse,
            skip: self.skip,
            arp: self.arp,
            restart: std::mem::take(&mut self.restart),
        };
        self.playhead.advance(&self.pattern, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_consumes_restart() {
        let mut lane = LaneState::new(Pattern::new(), 120.0, 1000.0);
        lane.playhead_mut().cursor = 7;
        lane.set_flag(ModeFlag::Restart, true);
        assert_eq!(lane.advance(), 0);
        assert!(!lane.flag(ModeFlag::Restart));
        assert_eq!(lane.advance(), 1);
    }

    #[test]
    fn interval_follows_tempo() {
        let lane = LaneState::new(Pattern::new(), 40.0, 1000.0);
        assert_eq!(lane.interval_secs(), 1.5);
        let lane = LaneState::new(Pattern::new(), 0.0, 1000.0);
        assert_eq!(lane.interval_secs(), 60.0);
    }

    #[test]
    fn reset_playhead_follows_reverse() {
        let mut lane = LaneState::new(Pattern::new(), 120.0, 1000.0);
        lane.set_flag(ModeFlag::Reverse, true);
        lane.playhead_mut().cursor = 3;
        lane.playhead_mut().elapsed = 0.25;
        lane.reset_playhead();
        assert_eq!(lane.playhead().cursor, crate::LAST_STEP);
        assert_eq!(lane.playhead().direction, -1);
        assert_eq!(lane.playhead().elapsed, 0.0);
    }
}
