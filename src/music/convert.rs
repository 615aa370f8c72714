//! Conversions between sequences, subsequences, and melodies.

use crate::types::{Melody, MelodyEvent, Note, Sequence};

/// Restricts `sequence` to notes whose onset lies in `[start_time, end_time)`.
///
/// Kept notes are clipped to `end_time`. Times are not re-based, so the
/// result stays on the caller's timeline.
pub fn extract_subsequence(sequence: &Sequence, start_time: f64, end_time: f64) -> Sequence {
    let mut subsequence = Sequence {
        notes: Vec::new(),
        tempos: sequence.tempos.clone(),
        time_signature: sequence.time_signature,
        total_time: 0.0,
    };

    subsequence.add_notes(
        sequence
            .notes
            .iter()
            .filter(|n| n.start_time >= start_time && n.start_time < end_time)
            .map(|n| Note {
                end_time: n.end_time.min(end_time),
                ..n.clone()
            }),
    );

    subsequence
}

/// Renders `melody` as notes on `instrument`, stamped with `qpm`.
///
/// A note runs from its `Note` step to the next `Note` or `NoteOff`, or to
/// the end of the melody.
pub fn melody_to_sequence(
    melody: &Melody,
    instrument: u32,
    qpm: f64,
    steps_per_quarter: u32,
) -> Sequence {
    let seconds_per_step = 60.0 / qpm / steps_per_quarter as f64;
    let mut sequence = Sequence::with_qpm(qpm);
    let mut sounding: Option<(u8, usize)> = None;

    let close = |sounding: &mut Option<(u8, usize)>, step: usize, sequence: &mut Sequence| {
        if let Some((pitch, start)) = sounding.take() {
            sequence.push_note(Note::new(
                pitch,
                start as f64 * seconds_per_step,
                step as f64 * seconds_per_step,
                instrument,
            ));
        }
    };

    for (i, event) in melody.events().iter().enumerate() {
        let step = melody.start_step() + i;
        match event {
            MelodyEvent::Note(pitch) => {
                close(&mut sounding, step, &mut sequence);
                sounding = Some((*pitch, step));
            }
            MelodyEvent::NoteOff => close(&mut sounding, step, &mut sequence),
            MelodyEvent::NoEvent => {}
        }
    }
    close(&mut sounding, melody.end_step(), &mut sequence);

    sequence
}
