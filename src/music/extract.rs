//! Monophonic melody extraction from quantized sequences.
//!
//! Each instrument is scanned on its own, in ascending instrument order.
//! Notes are visited by onset, highest pitch first, so a chord collapses to
//! its top note when polyphony is ignored.

use std::cmp::Reverse;

use crate::types::{Melody, MelodyEvent, QuantizedNote, QuantizedSequence};

use super::{ExtractionOptions, ExtractionStats};

/// Accumulates one melody from notes with strictly increasing onsets.
struct MelodyBuilder {
    start_step: usize,
    events: Vec<MelodyEvent>,
    last_onset: usize,
    last_end: usize,
}

impl MelodyBuilder {
    fn new(start_step: usize) -> Self {
        Self {
            start_step,
            events: Vec::new(),
            last_onset: start_step,
            last_end: start_step,
        }
    }

    fn add(&mut self, note: &QuantizedNote) {
        // A note still sounding at this onset is cut by the new note.
        if !self.events.is_empty() && self.last_end < note.start_step {
            let off = self.last_end - self.start_step;
            self.events.resize(off + 1, MelodyEvent::NoEvent);
            self.events[off] = MelodyEvent::NoteOff;
        }

        let offset = note.start_step - self.start_step;
        self.events.resize(offset + 1, MelodyEvent::NoEvent);
        self.events[offset] = MelodyEvent::Note(note.pitch);
        self.last_onset = note.start_step;
        self.last_end = note.end_step;
    }

    fn finish(mut self) -> Melody {
        let len = self.last_end.saturating_sub(self.start_step).max(self.events.len());
        self.events.resize(len, MelodyEvent::NoEvent);
        Melody::new(self.events, self.start_step)
    }
}

/// Extracts monophonic melodies from every instrument in `quantized`.
///
/// Melodies are returned in ascending instrument order, and in time order
/// within an instrument when `gap_bars` splits a track.
pub fn extract_melodies(
    quantized: &QuantizedSequence,
    options: &ExtractionOptions,
) -> (Vec<Melody>, ExtractionStats) {
    let mut stats = ExtractionStats::default();
    let mut melodies = Vec::new();

    let steps_per_bar = quantized.steps_per_bar();
    let gap_steps = options
        .gap_bars
        .map(|bars| (bars * steps_per_bar as f64).ceil().max(1.0) as usize);

    for instrument in quantized.instruments() {
        let mut notes: Vec<&QuantizedNote> = quantized
            .notes
            .iter()
            .filter(|n| n.instrument == instrument)
            .collect();
        notes.sort_by_key(|n| (n.start_step, Reverse(n.pitch)));

        let mut candidates = Vec::new();
        let mut builder: Option<MelodyBuilder> = None;
        let mut polyphonic = false;

        for note in notes {
            if let Some(current) = builder.as_ref() {
                if !current.events.is_empty() && note.start_step == current.last_onset {
                    if options.ignore_polyphonic_notes {
                        stats.polyphonic_notes_discarded += 1;
                        continue;
                    }
                    polyphonic = true;
                    break;
                }
            }

            let gap_reached = match (builder.as_ref(), gap_steps) {
                (Some(current), Some(gap)) => note.start_step >= current.last_end + gap,
                _ => false,
            };
            if gap_reached {
                candidates.extend(builder.take().map(MelodyBuilder::finish));
            }

            builder
                .get_or_insert_with(|| {
                    MelodyBuilder::new(note.start_step - note.start_step % steps_per_bar)
                })
                .add(note);
        }

        if polyphonic {
            stats.polyphonic_tracks_discarded += 1;
            continue;
        }

        candidates.extend(builder.map(MelodyBuilder::finish));

        for melody in candidates {
            if melody.len() < options.min_bars * steps_per_bar {
                stats.melodies_discarded_too_short += 1;
            } else if melody.unique_pitches().len() < options.min_unique_pitches {
                stats.melodies_discarded_too_few_pitches += 1;
            } else {
                melodies.push(melody);
            }
        }
    }

    stats.melodies_extracted = melodies.len();
    (melodies, stats)
}
