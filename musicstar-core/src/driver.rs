//! Frame driver: feeds the host loop's frame delta to both lanes and hands
//! fired steps to a sound emitter.

use std::time::Duration;

use musicstar_types::{DispatchResult, Lane, StarAction, StarSequencer, StepFired};

use crate::dispatch::dispatch_action;

/// Receives every fired step, in lane order within a frame.
pub trait NoteSink {
    fn play(&mut self, fired: &StepFired);
}

impl<F: FnMut(&StepFired)> NoteSink for F {
    fn play(&mut self, fired: &StepFired) {
        self(fired)
    }
}

/// What happened during one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    /// Due intervals consumed, per lane (index = `Lane::index`).
    pub advanced: [usize; 2],
    /// Steps fired this frame across both lanes.
    pub fired: usize,
    /// Cursor positions after the frame, for drawing the playheads.
    pub cursors: [usize; 2],
}

pub struct Driver {
    seq: StarSequencer,
    fired: Vec<StepFired>,
    clock: Duration,
}

impl Driver {
    pub fn new(seq: StarSequencer) -> Self {
        Self {
            seq,
            fired: Vec::new(),
            clock: Duration::ZERO,
        }
    }

    pub fn sequencer(&self) -> &StarSequencer {
        &self.seq
    }

    /// Total time fed to the driver so far.
    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn dispatch(&mut self, action: &StarAction) -> DispatchResult {
        dispatch_action(action, &mut self.seq)
    }

    /// Advance both lanes by `dt`.
    pub fn frame(&mut self, dt: Duration, sink: &mut impl NoteSink) -> FrameReport {
        self.clock += dt;
        let dt = dt.as_secs_f64();
        let mut report = FrameReport::default();

        self.fired.clear();
        for lane in Lane::ALL {
            let due = self.seq.tick_into(lane, dt, &mut self.fired);
            if due > 1 {
                log::debug!(target: "driver", "{} lane caught up {} intervals in one frame", lane, due);
            }
            report.advanced[lane.index()] = due;
            report.cursors[lane.index()] = self.seq.cursor(lane);
        }

        for fired in &self.fired {
            log::trace!(target: "driver", "{} step {}", fired.lane, fired.step);
            sink.play(fired);
        }
        report.fired = self.fired.len();
        report
    }
}
