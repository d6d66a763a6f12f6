use std::io::Write;

use serde::Serialize;

use musicstar_core::driver::NoteSink;
use musicstar_core::pitch::note_for;
use musicstar_types::{Lane, StepFired};

#[derive(Serialize)]
struct NoteEvent<'a> {
    t: f64,
    lane: Lane,
    step: usize,
    note: &'a str,
    freq: f32,
}

/// Sound emitter for headless runs: writes one line per fired step.
pub struct PrintSink<W: Write> {
    out: W,
    tuning_a4: f32,
    json: bool,
    /// Timestamp stamped on notes fired during the current frame.
    pub now: f64,
    failed: bool,
}

impl<W: Write> PrintSink<W> {
    pub fn new(out: W, tuning_a4: f32, json: bool) -> Self {
        Self {
            out,
            tuning_a4,
            json,
            now: 0.0,
            failed: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_event(&mut self, fired: &StepFired) -> std::io::Result<()> {
        let note = note_for(fired.lane, fired.step, self.tuning_a4);
        if self.json {
            let event = NoteEvent {
                t: self.now,
                lane: fired.lane,
                step: fired.step,
                note: note.name,
                freq: note.freq,
            };
            let line = serde_json::to_string(&event).map_err(std::io::Error::other)?;
            writeln!(self.out, "{}", line)
        } else {
            writeln!(
                self.out,
                "{:>8.3}s  {:<6} step {:>2}  {:<3} {:>8.2} Hz",
                self.now, fired.lane, fired.step, note.name, note.freq
            )
        }
    }
}

impl<W: Write> NoteSink for PrintSink<W> {
    fn play(&mut self, fired: &StepFired) {
        if let Err(e) = self.write_event(fired) {
            if !self.failed {
                log::warn!("could not write note event: {}", e);
                self.failed = true;
            }
        }
    }
}
