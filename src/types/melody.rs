//! Monophonic melodies and melody pairs.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One step of a monophonic melody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MelodyEvent {
    /// Start a note at this pitch, ending any sounding note.
    Note(u8),
    /// End the sounding note.
    NoteOff,
    /// Keep the previous state: sustain a sounding note, or stay silent.
    NoEvent,
}

/// A monophonic per-step event sequence anchored at `start_step`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Melody {
    events: Vec<MelodyEvent>,
    start_step: usize,
}

impl Melody {
    /// Creates a melody from events beginning at `start_step`.
    pub fn new(events: Vec<MelodyEvent>, start_step: usize) -> Self {
        Self { events, start_step }
    }

    pub fn events(&self) -> &[MelodyEvent] {
        &self.events
    }

    pub fn start_step(&self) -> usize {
        self.start_step
    }

    /// Number of steps covered.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Exclusive absolute end step.
    pub fn end_step(&self) -> usize {
        self.start_step + self.events.len()
    }

    /// Truncates or pads with `NoEvent` so the melody covers exactly `steps`.
    pub fn set_length(&mut self, steps: usize) {
        self.events.resize(steps, MelodyEvent::NoEvent);
    }

    /// Returns the distinct pitches started in this melody.
    pub fn unique_pitches(&self) -> BTreeSet<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                MelodyEvent::Note(pitch) => Some(*pitch),
                _ => None,
            })
            .collect()
    }
}

/// A main melody and its accompaniment sharing one step timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MelodyPair {
    main_melody: Melody,
    accompaniment: Melody,
}

impl MelodyPair {
    pub fn new(main_melody: Melody, accompaniment: Melody) -> Self {
        Self {
            main_melody,
            accompaniment,
        }
    }

    pub fn main_melody(&self) -> &Melody {
        &self.main_melody
    }

    pub fn accompaniment(&self) -> &Melody {
        &self.accompaniment
    }

    /// Splits the pair back into `(main_melody, accompaniment)`.
    pub fn into_parts(self) -> (Melody, Melody) {
        (self.main_melody, self.accompaniment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use MelodyEvent::*;

    #[test]
    fn set_length_pads_and_truncates() {
        let mut melody = Melody::new(vec![Note(60), NoEvent, NoteOff], 4);
        melody.set_length(5);
        assert_eq!(melody.events(), &[Note(60), NoEvent, NoteOff, NoEvent, NoEvent]);
        assert_eq!(melody.end_step(), 9);

        melody.set_length(1);
        assert_eq!(melody.events(), &[Note(60)]);
        assert_eq!(melody.start_step(), 4);
    }

    #[test]
    fn unique_pitches_ignores_markers() {
        let melody = Melody::new(vec![Note(60), NoEvent, Note(62), NoteOff, Note(60)], 0);
        let pitches: Vec<u8> = melody.unique_pitches().into_iter().collect();
        assert_eq!(pitches, vec![60, 62]);
    }

    #[test]
    fn pair_into_parts_preserves_order() {
        let main = Melody::new(vec![Note(72)], 0);
        let accompaniment = Melody::new(vec![Note(40)], 0);
        let pair = MelodyPair::new(main.clone(), accompaniment.clone());
        assert_eq!(pair.into_parts(), (main, accompaniment));
    }
}
