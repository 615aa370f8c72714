//! Music sequence operations used by the generation pipeline.
//!
//! The pipeline talks to these operations through the
//! [`MusicSequenceLibrary`] trait so tests can count or fake calls.
//! [`DefaultMusicLibrary`] is the stock implementation:
//! - [`quantize`](quantize::quantize): Snap note times onto a step grid
//! - [`extract_melodies`](extract::extract_melodies): Per-instrument monophonic lines
//! - [`extract_subsequence`](convert::extract_subsequence): Time-bounded view
//! - [`melody_to_sequence`](convert::melody_to_sequence): Steps back to timed notes

pub mod convert;
pub mod extract;
pub mod quantize;

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_QUARTERS_PER_MINUTE;
use crate::error::Result;
use crate::types::{Melody, QuantizedSequence, Sequence};

pub use convert::{extract_subsequence, melody_to_sequence};
pub use extract::extract_melodies;
pub use quantize::quantize;

/// Policy for melody extraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtractionOptions {
    /// Melodies shorter than this many bars are discarded.
    pub min_bars: usize,
    /// Melodies with fewer distinct pitches are discarded.
    pub min_unique_pitches: usize,
    /// Silence (in bars) that ends a melody. None never splits.
    pub gap_bars: Option<f64>,
    /// Keep the highest note at simultaneous onsets instead of rejecting the track.
    pub ignore_polyphonic_notes: bool,
}

impl ExtractionOptions {
    /// Policy for priming the accompaniment model: the whole input is
    /// one contiguous span per instrument and chords collapse to their top note.
    pub fn accompaniment() -> Self {
        Self {
            min_bars: 0,
            min_unique_pitches: 1,
            gap_bars: None,
            ignore_polyphonic_notes: true,
        }
    }
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self::accompaniment()
    }
}

/// Counters describing what extraction kept and dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    pub melodies_extracted: usize,
    pub polyphonic_notes_discarded: usize,
    pub polyphonic_tracks_discarded: usize,
    pub melodies_discarded_too_short: usize,
    pub melodies_discarded_too_few_pitches: usize,
}

/// Sequence operations the generator depends on.
pub trait MusicSequenceLibrary {
    /// Quantizes a sequence at the given resolution.
    fn quantize(&self, sequence: &Sequence, steps_per_quarter: u32) -> Result<QuantizedSequence>;

    /// Extracts monophonic melodies, returning them with diagnostics.
    fn extract_melodies(
        &self,
        quantized: &QuantizedSequence,
        options: &ExtractionOptions,
    ) -> Result<(Vec<Melody>, ExtractionStats)>;

    /// Restricts a sequence to notes starting inside `[start_time, end_time)`.
    fn extract_subsequence(&self, sequence: &Sequence, start_time: f64, end_time: f64) -> Sequence;

    /// Renders a melody as timed notes on one instrument.
    fn melody_to_sequence(
        &self,
        melody: &Melody,
        instrument: u32,
        qpm: f64,
        steps_per_quarter: u32,
    ) -> Sequence;
}

/// Stock implementation backed by the functions in this module.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultMusicLibrary {
    default_qpm: f64,
}

impl DefaultMusicLibrary {
    pub fn new() -> Self {
        Self::with_default_qpm(DEFAULT_QUARTERS_PER_MINUTE)
    }

    /// Uses `default_qpm` for sequences without a tempo marking.
    pub fn with_default_qpm(default_qpm: f64) -> Self {
        Self { default_qpm }
    }
}

impl Default for DefaultMusicLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl MusicSequenceLibrary for DefaultMusicLibrary {
    fn quantize(&self, sequence: &Sequence, steps_per_quarter: u32) -> Result<QuantizedSequence> {
        quantize(sequence, steps_per_quarter, self.default_qpm)
    }

    fn extract_melodies(
        &self,
        quantized: &QuantizedSequence,
        options: &ExtractionOptions,
    ) -> Result<(Vec<Melody>, ExtractionStats)> {
        Ok(extract_melodies(quantized, options))
    }

    fn extract_subsequence(&self, sequence: &Sequence, start_time: f64, end_time: f64) -> Sequence {
        extract_subsequence(sequence, start_time, end_time)
    }

    fn melody_to_sequence(
        &self,
        melody: &Melody,
        instrument: u32,
        qpm: f64,
        steps_per_quarter: u32,
    ) -> Sequence {
        melody_to_sequence(melody, instrument, qpm, steps_per_quarter)
    }
}
