//! Pitch tables: which note each step of each lane plays.

use musicstar_types::{Lane, STEPS};

const TOP_PITCHES: [&str; STEPS] = [
    "F4", "G4", "Ab4", "Bb4", "C5", "D5", "Eb5", "F5", "G5", "Bb5", "Ab5", "C6",
];

const BOTTOM_PITCHES: [&str; STEPS] = [
    "F2", "Bb2", "C3", "Eb3", "F3", "Bb3", "C4", "D4", "Eb4", "D4", "C4", "G3",
];

/// A resolved note ready for a synth.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Note {
    pub name: &'static str,
    pub freq: f32,
}

pub fn note_name(lane: Lane, step: usize) -> &'static str {
    let table = match lane {
        Lane::Top => &TOP_PITCHES,
        Lane::Bottom => &BOTTOM_PITCHES,
    };
    table[step.min(STEPS - 1)]
}

pub fn note_for(lane: Lane, step: usize, tuning_a4: f32) -> Note {
    let name = note_name(lane, step);
    Note {
        name,
        // table entries are well-formed
        freq: note_frequency(name, tuning_a4).unwrap_or(tuning_a4),
    }
}

/// MIDI note number of a scientific-pitch name such as `"Ab4"` or `"F#5"`.
pub fn midi_note(name: &str) -> Option<i32> {
    let mut chars = name.chars();
    let semitone = match chars.next()?.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };
    let rest = chars.as_str();
    let (accidental, octave) = match rest.as_bytes().first()? {
        b'#' => (1, &rest[1..]),
        b'b' => (-1, &rest[1..]),
        _ => (0, rest),
    };
    let octave: i32 = octave.parse().ok()?;
    Some((octave + 1) * 12 + semitone + accidental)
}

/// Equal-tempered frequency of a note name.
pub fn note_frequency(name: &str, tuning_a4: f32) -> Option<f32> {
    let midi = midi_note(name)?;
    Some(tuning_a4 * 2.0_f32.powf((midi - 69) as f32 / 12.0))
}
