//! Note sequences, continuous and quantized.
//!
//! A [`Sequence`] holds timed notes in seconds. A [`QuantizedSequence`] is
//! the same material snapped onto a step grid and is never mutated after
//! quantization.

use serde::{Deserialize, Serialize};

/// A single timed note event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// MIDI pitch (0-127).
    pub pitch: u8,

    /// MIDI velocity (0-127).
    pub velocity: u8,

    /// Onset in seconds.
    pub start_time: f64,

    /// Release in seconds.
    pub end_time: f64,

    /// Instrument tag. 0 is the main melody, 1 the accompaniment.
    pub instrument: u32,
}

impl Note {
    /// Creates a note with the default velocity.
    pub fn new(pitch: u8, start_time: f64, end_time: f64, instrument: u32) -> Self {
        Self {
            pitch,
            velocity: DEFAULT_VELOCITY,
            start_time,
            end_time,
            instrument,
        }
    }
}

/// Velocity used for notes created from melodies.
pub const DEFAULT_VELOCITY: u8 = 100;

/// A tempo marking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tempo {
    /// Time in seconds at which the tempo takes effect.
    pub time: f64,
    /// Quarter notes per minute.
    pub qpm: f64,
}

/// Time signature used to compute bar lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSignature {
    pub numerator: u32,
    pub denominator: u32,
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self {
            numerator: 4,
            denominator: 4,
        }
    }
}

/// An ordered collection of timed notes from any number of instruments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    /// Notes in insertion order.
    pub notes: Vec<Note>,

    /// Tempo markings. Only the first one is used for step conversion.
    #[serde(default)]
    pub tempos: Vec<Tempo>,

    /// Time signature; 4/4 when absent.
    #[serde(default)]
    pub time_signature: TimeSignature,

    /// End time of the last note, in seconds.
    #[serde(default)]
    pub total_time: f64,
}

impl Sequence {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty sequence with a single tempo marking at time 0.
    pub fn with_qpm(qpm: f64) -> Self {
        Self {
            tempos: vec![Tempo { time: 0.0, qpm }],
            ..Self::default()
        }
    }

    /// Returns the tempo of the first tempo marking, if any.
    pub fn qpm(&self) -> Option<f64> {
        self.tempos.first().map(|t| t.qpm)
    }

    /// Appends a note, extending `total_time` as needed.
    pub fn push_note(&mut self, note: Note) {
        if note.end_time > self.total_time {
            self.total_time = note.end_time;
        }
        self.notes.push(note);
    }

    /// Appends all notes from an iterator.
    pub fn add_notes(&mut self, notes: impl IntoIterator<Item = Note>) {
        for note in notes {
            self.push_note(note);
        }
    }

    /// Returns the notes tagged with the given instrument.
    pub fn instrument_notes(&self, instrument: u32) -> impl Iterator<Item = &Note> {
        self.notes.iter().filter(move |n| n.instrument == instrument)
    }

    /// Returns the latest end time among notes of an instrument, or 0.0.
    pub fn instrument_end_time(&self, instrument: u32) -> f64 {
        self.instrument_notes(instrument)
            .map(|n| n.end_time)
            .fold(0.0, f64::max)
    }
}

/// A note snapped onto the step grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantizedNote {
    pub pitch: u8,
    pub velocity: u8,
    pub start_step: usize,
    /// Exclusive end step; always greater than `start_step`.
    pub end_step: usize,
    pub instrument: u32,
}

/// A sequence discretized at a fixed number of steps per quarter note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantizedSequence {
    pub notes: Vec<QuantizedNote>,
    pub qpm: f64,
    pub steps_per_quarter: u32,
    pub time_signature: TimeSignature,
}

impl QuantizedSequence {
    /// Returns the number of steps in one bar.
    pub fn steps_per_bar(&self) -> usize {
        let quarters_per_bar =
            self.time_signature.numerator as f64 * 4.0 / self.time_signature.denominator as f64;
        ((quarters_per_bar * self.steps_per_quarter as f64) as usize).max(1)
    }

    /// Returns the distinct instrument tags in ascending order.
    pub fn instruments(&self) -> Vec<u32> {
        let mut instruments: Vec<u32> = self.notes.iter().map(|n| n.instrument).collect();
        instruments.sort_unstable();
        instruments.dedup();
        instruments
    }
}
