//! The two-lane Music Star sequencer.

use serde::{Deserialize, Serialize};

use super::{LaneState, ModeFlag, Pattern};
use crate::{checked_percent, checked_step, Lane, LaneUpdate, MatchKind, ParamRange, StepFired};

/// Construction-time settings. Built from config by the core crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequencerSettings {
    pub tempo_range: ParamRange,
    pub default_tempo: f32,
    pub freq_range: ParamRange,
    pub default_freq_percent: f32,
    pub top_seed: Vec<usize>,
    pub bottom_seed: Vec<usize>,
}

impl Default for SequencerSettings {
    fn default() -> Self {
        Self {
            tempo_range: ParamRange::linear(40.0, 1000.0),
            default_tempo: 120.0,
            freq_range: ParamRange::exponential(300.0, 12000.0),
            default_freq_percent: 1.0,
            top_seed: vec![0],
            bottom_seed: vec![5],
        }
    }
}

/// Which parameters are mirrored between lanes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matches {
    pub tempo: bool,
    pub freq: bool,
    pub reverse: bool,
    pub skip: bool,
    pub restart: bool,
    pub arp: bool,
}

impl Matches {
    pub fn get(&self, kind: MatchKind) -> bool {
        match kind {
            MatchKind::Tempo => self.tempo,
            MatchKind::Freq => self.freq,
            MatchKind::Flag(ModeFlag::Reverse) => self.reverse,
            MatchKind::Flag(ModeFlag::Skip) => self.skip,
            MatchKind::Flag(ModeFlag::Restart) => self.restart,
            MatchKind::Flag(ModeFlag::Arp) => self.arp,
        }
    }

    fn slot(&mut self, kind: MatchKind) -> &mut bool {
        match kind {
            MatchKind::Tempo => &mut self.tempo,
            MatchKind::Freq => &mut self.freq,
            MatchKind::Flag(ModeFlag::Reverse) => &mut self.reverse,
            MatchKind::Flag(ModeFlag::Skip) => &mut self.skip,
            MatchKind::Flag(ModeFlag::Restart) => &mut self.restart,
            MatchKind::Flag(ModeFlag::Arp) => &mut self.arp,
        }
    }

    /// Flip a match and return its new value.
    pub fn toggle(&mut self, kind: MatchKind) -> bool {
        let slot = self.slot(kind);
        *slot = !*slot;
        *slot
    }
}

/// Dual-lane step sequencer.
///
/// Settings (patterns, tempos, freqs, flags, matches) live as long as the
/// sequencer. Playheads are runtime state and go back to the start on
/// [`StarSequencer::enter_scene`].
#[derive(Debug, Clone, Serialize)]
pub struct StarSequencer {
    lanes: [LaneState; 2],
    matches: Matches,
    tempo_range: ParamRange,
    freq_range: ParamRange,
}

impl StarSequencer {
    pub fn new(settings: &SequencerSettings) -> Self {
        let tempo = settings.tempo_range.clamp(settings.default_tempo);
        let freq = settings
            .freq_range
            .value_at(settings.default_freq_percent);
        Self {
            lanes: [
                LaneState::new(Pattern::with_steps(&settings.top_seed), tempo, freq),
                LaneState::new(Pattern::with_steps(&settings.bottom_seed), tempo, freq),
            ],
            matches: Matches::default(),
            tempo_range: settings.tempo_range,
            freq_range: settings.freq_range,
        }
    }

    pub fn lane(&self, lane: Lane) -> &LaneState {
        &self.lanes[lane.index()]
    }

    fn lane_mut(&mut self, lane: Lane) -> &mut LaneState {
        &mut self.lanes[lane.index()]
    }

    pub fn is_matched(&self, kind: MatchKind) -> bool {
        self.matches.get(kind)
    }

    // --- steps ---

    pub fn toggle_step(&mut self, lane: Lane, step: usize) -> LaneUpdate {
        let step = checked_step(step);
        let active = self.lane_mut(lane).pattern_mut().toggle(step);
        LaneUpdate::Step { lane, step, active }
    }

    pub fn clear_lane(&mut self, lane: Lane) -> LaneUpdate {
        self.lane_mut(lane).pattern_mut().clear();
        LaneUpdate::Cleared { lane }
    }

    pub fn is_step_active(&self, lane: Lane, step: usize) -> bool {
        self.lane(lane).pattern().is_active(checked_step(step))
    }

    pub fn active_count(&self, lane: Lane) -> usize {
        self.lane(lane).pattern().active_count()
    }

    // --- tempo ---

    /// Set a lane's tempo from a knob position. With tempo matching on, the
    /// other lane takes the same tempo and this lane's phase.
    pub fn set_tempo(&mut self, lane: Lane, percent: f32) -> Vec<LaneUpdate> {
        let percent = checked_percent(percent);
        let tempo = self.tempo_range.value_at(percent);
        self.lane_mut(lane).set_tempo(tempo);
        let mut updates = vec![self.tempo_update(lane)];
        if self.matches.tempo {
            updates.push(self.mirror_tempo(lane));
        }
        updates
    }

    pub fn tempo(&self, lane: Lane) -> f32 {
        self.lane(lane).tempo()
    }

    pub fn tempo_percent(&self, lane: Lane) -> f32 {
        self.tempo_range.percent_of(self.tempo(lane))
    }

    fn tempo_update(&self, lane: Lane) -> LaneUpdate {
        LaneUpdate::Tempo {
            lane,
            tempo: self.tempo(lane),
            percent: self.tempo_percent(lane),
        }
    }

    /// Copy `from`'s tempo and elapsed time onto the other lane.
    fn mirror_tempo(&mut self, from: Lane) -> LaneUpdate {
        let to = from.other();
        let tempo = self.tempo(from);
        let elapsed = self.lane(from).playhead().elapsed;
        let target = self.lane_mut(to);
        target.set_tempo(tempo);
        target.playhead_mut().elapsed = elapsed;
        self.tempo_update(to)
    }

    // --- freq ---

    /// Set a lane's filter cutoff from a knob position, mirroring when freq matching is on.
    pub fn set_freq(&mut self, lane: Lane, percent: f32) -> Vec<LaneUpdate> {
        let percent = checked_percent(percent);
        let freq = self.freq_range.value_at(percent);
        self.lane_mut(lane).set_freq(freq);
        let mut updates = vec![self.freq_update(lane)];
        if self.matches.freq {
            updates.push(self.mirror_freq(lane));
        }
        updates
    }

    pub fn freq(&self, lane: Lane) -> f32 {
        self.lane(lane).freq()
    }

    pub fn freq_percent(&self, lane: Lane) -> f32 {
        self.freq_range.percent_of(self.freq(lane))
    }

    fn freq_update(&self, lane: Lane) -> LaneUpdate {
        LaneUpdate::Freq {
            lane,
            freq: self.freq(lane),
            percent: self.freq_percent(lane),
        }
    }

    fn mirror_freq(&mut self, from: Lane) -> LaneUpdate {
        let to = from.other();
        let freq = self.freq(from);
        self.lane_mut(to).set_freq(freq);
        self.freq_update(to)
    }

    // --- mode flags ---

    /// Set a mode flag. Setting `Restart` arms it; the next due interval consumes it.
    pub fn set_mode_flag(&mut self, lane: Lane, flag: ModeFlag, value: bool) -> Vec<LaneUpdate> {
        self.lane_mut(lane).set_flag(flag, value);
        let mut updates = vec![LaneUpdate::Flag { lane, flag, value }];
        if self.matches.get(MatchKind::Flag(flag)) {
            updates.extend(self.mirror_flag(lane, flag));
        }
        updates
    }

    pub fn mode_flag(&self, lane: Lane, flag: ModeFlag) -> bool {
        self.lane(lane).flag(flag)
    }

    fn mirror_flag(&mut self, from: Lane, flag: ModeFlag) -> Option<LaneUpdate> {
        let to = from.other();
        let value = self.mode_flag(from, flag);
        if self.mode_flag(to, flag) == value {
            return None;
        }
        self.lane_mut(to).set_flag(flag, value);
        Some(LaneUpdate::Flag { lane: to, flag, value })
    }

    // --- matching ---

    /// Flip a match. Switching one on copies the top lane's value onto the bottom lane.
    pub fn toggle_match(&mut self, kind: MatchKind) -> Vec<LaneUpdate> {
        let enabled = self.matches.toggle(kind);
        let mut updates = vec![LaneUpdate::Match { kind, enabled }];
        if enabled {
            match kind {
                MatchKind::Tempo => updates.push(self.mirror_tempo(Lane::Top)),
                MatchKind::Freq => updates.push(self.mirror_freq(Lane::Top)),
                MatchKind::Flag(flag) => updates.extend(self.mirror_flag(Lane::Top, flag)),
            }
        }
        updates
    }

    // --- clock ---

    /// Reset both playheads; settings are kept.
    pub fn enter_scene(&mut self) -> LaneUpdate {
        for lane in &mut self.lanes {
            lane.reset_playhead();
        }
        LaneUpdate::PlayheadsReset
    }

    pub fn cursor(&self, lane: Lane) -> usize {
        self.lane(lane).playhead().cursor
    }

    /// Feed `dt` seconds to a lane's clock. Every due interval advances the
    /// playhead once; each landing on an active step is reported, in order.
    /// A large `dt` yields one advance per missed interval.
    pub fn tick(&mut self, lane: Lane, dt: f64) -> Vec<StepFired> {
        let mut fired = Vec::new();
        self.tick_into(lane, dt, &mut fired);
        fired
    }

    /// Like [`tick`](Self::tick), appending to a caller-owned buffer.
    /// Returns the number of due intervals consumed.
    pub fn tick_into(&mut self, lane: Lane, dt: f64, fired: &mut Vec<StepFired>) -> usize {
        debug_assert!(dt >= 0.0, "negative frame delta {}", dt);
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        let state = self.lane_mut(lane);
        let interval = state.interval_secs();
        state.playhead_mut().elapsed += dt;

        let mut due = 0;
        while state.playhead().elapsed >= interval {
            state.playhead_mut().elapsed -= interval;
            due += 1;
            let step = state.advance();
            if state.pattern().is_active(step) {
                fired.push(StepFired { lane, step });
            }
        }
        due
    }
}

impl Default for StarSequencer {
    fn default() -> Self {
        Self::new(&SequencerSettings::default())
    }
}
