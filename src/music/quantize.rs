//! Quantization of timed notes onto a step grid.

use crate::error::{GenerationError, Result};
use crate::types::{QuantizedNote, QuantizedSequence, Sequence};

/// Tempo changes closer than this are treated as the same tempo.
const TEMPO_TOLERANCE: f64 = 1e-6;

/// Quantizes `sequence` at `steps_per_quarter`, rounding to the nearest step.
///
/// Notes that would collapse to zero length keep one step. Sequences
/// without a tempo use `default_qpm`; sequences whose tempo changes are
/// rejected because a single step length must cover the whole input.
pub fn quantize(
    sequence: &Sequence,
    steps_per_quarter: u32,
    default_qpm: f64,
) -> Result<QuantizedSequence> {
    if steps_per_quarter == 0 {
        return Err(GenerationError::sequence_processing(
            "steps_per_quarter must be > 0",
        ));
    }

    let qpm = sequence.qpm().unwrap_or(default_qpm);
    if !(qpm > 0.0) {
        return Err(GenerationError::sequence_processing(format!(
            "tempo must be > 0 qpm, got {}",
            qpm
        )));
    }

    if let Some(tempo) = sequence
        .tempos
        .iter()
        .find(|t| (t.qpm - qpm).abs() > TEMPO_TOLERANCE)
    {
        return Err(GenerationError::sequence_processing(format!(
            "multiple tempos are not supported: {} qpm at {}s after {} qpm",
            tempo.qpm, tempo.time, qpm
        )));
    }

    let steps_per_second = qpm / 60.0 * steps_per_quarter as f64;
    let to_step = |seconds: f64| (seconds.max(0.0) * steps_per_second).round() as usize;

    let notes = sequence
        .notes
        .iter()
        .map(|note| {
            let start_step = to_step(note.start_time);
            let end_step = to_step(note.end_time).max(start_step + 1);
            QuantizedNote {
                pitch: note.pitch,
                velocity: note.velocity,
                start_step,
                end_step,
                instrument: note.instrument,
            }
        })
        .collect();

    Ok(QuantizedSequence {
        notes,
        qpm,
        steps_per_quarter,
        time_signature: sequence.time_signature,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Note, Tempo};

    #[test]
    fn rounds_to_nearest_step() {
        let mut seq = Sequence::with_qpm(60.0);
        // One step is 0.25s at 60 qpm
        seq.push_note(Note::new(60, 0.12, 0.63, 0));
        let quantized = quantize(&seq, 4, 120.0).unwrap();
        assert_eq!(quantized.notes[0].start_step, 0);
        assert_eq!(quantized.notes[0].end_step, 3);
        assert_eq!(quantized.qpm, 60.0);
    }

    #[test]
    fn zero_length_notes_keep_one_step() {
        let mut seq = Sequence::with_qpm(120.0);
        seq.push_note(Note::new(60, 1.0, 1.01, 1));
        let quantized = quantize(&seq, 4, 120.0).unwrap();
        assert_eq!(quantized.notes[0].start_step, 8);
        assert_eq!(quantized.notes[0].end_step, 9);
    }

    #[test]
    fn missing_tempo_uses_default() {
        let mut seq = Sequence::new();
        seq.push_note(Note::new(60, 0.5, 1.0, 0));
        let quantized = quantize(&seq, 4, 120.0).unwrap();
        assert_eq!(quantized.qpm, 120.0);
        assert_eq!(quantized.notes[0].start_step, 4);
    }

    #[test]
    fn rejects_tempo_changes_and_bad_resolution() {
        let mut seq = Sequence::with_qpm(120.0);
        seq.tempos.push(Tempo { time: 4.0, qpm: 90.0 });
        assert!(quantize(&seq, 4, 120.0).is_err());

        assert!(quantize(&Sequence::new(), 0, 120.0).is_err());
        assert!(quantize(&Sequence::with_qpm(0.0), 4, 120.0).is_err());
    }
}
