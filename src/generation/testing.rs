//! Test doubles for the generation pipeline.

use std::cell::Cell;

use crate::error::{GenerationError, Result};
use crate::models::PairedSequenceModel;
use crate::music::{DefaultMusicLibrary, ExtractionOptions, ExtractionStats, MusicSequenceLibrary};
use crate::types::{Melody, MelodyEvent, MelodyPair, QuantizedSequence, Sequence};

/// Wraps the stock library, counting calls and optionally faking extraction.
pub struct RecordingLibrary {
    inner: DefaultMusicLibrary,
    melodies: Option<Vec<Melody>>,
    quantize_calls: Cell<usize>,
    extract_calls: Cell<usize>,
    subsequence_calls: Cell<usize>,
}

impl RecordingLibrary {
    pub fn new() -> Self {
        Self {
            inner: DefaultMusicLibrary::new(),
            melodies: None,
            quantize_calls: Cell::new(0),
            extract_calls: Cell::new(0),
            subsequence_calls: Cell::new(0),
        }
    }

    /// Returns `melodies` from every extraction instead of extracting.
    pub fn with_melodies(melodies: Vec<Melody>) -> Self {
        Self {
            melodies: Some(melodies),
            ..Self::new()
        }
    }

    pub fn quantize_calls(&self) -> usize {
        self.quantize_calls.get()
    }

    pub fn extract_calls(&self) -> usize {
        self.extract_calls.get()
    }

    pub fn subsequence_calls(&self) -> usize {
        self.subsequence_calls.get()
    }
}

impl MusicSequenceLibrary for RecordingLibrary {
    fn quantize(&self, sequence: &Sequence, steps_per_quarter: u32) -> Result<QuantizedSequence> {
        self.quantize_calls.set(self.quantize_calls.get() + 1);
        self.inner.quantize(sequence, steps_per_quarter)
    }

    fn extract_melodies(
        &self,
        quantized: &QuantizedSequence,
        options: &ExtractionOptions,
    ) -> Result<(Vec<Melody>, ExtractionStats)> {
        self.extract_calls.set(self.extract_calls.get() + 1);
        match &self.melodies {
            Some(melodies) => Ok((melodies.clone(), ExtractionStats::default())),
            None => self.inner.extract_melodies(quantized, options),
        }
    }

    fn extract_subsequence(&self, sequence: &Sequence, start_time: f64, end_time: f64) -> Sequence {
        self.subsequence_calls.set(self.subsequence_calls.get() + 1);
        self.inner.extract_subsequence(sequence, start_time, end_time)
    }

    fn melody_to_sequence(
        &self,
        melody: &Melody,
        instrument: u32,
        qpm: f64,
        steps_per_quarter: u32,
    ) -> Sequence {
        self.inner
            .melody_to_sequence(melody, instrument, qpm, steps_per_quarter)
    }
}

/// Deterministic model that writes a fixed arpeggio after the primer.
///
/// Both lines are extended to `accompaniment end + num_steps`; generated
/// steps start where the primer accompaniment ends.
pub struct ExtendingModel {
    pub predictahead_steps: usize,
    pub calls: usize,
    pub last_num_steps: Option<usize>,
    pub last_temperature: Option<f64>,
    pub last_primer: Option<MelodyPair>,
    pub fail_with: Option<String>,
}

impl ExtendingModel {
    pub fn new(predictahead_steps: usize) -> Self {
        Self {
            predictahead_steps,
            calls: 0,
            last_num_steps: None,
            last_temperature: None,
            last_primer: None,
            fail_with: None,
        }
    }

    fn extend(melody: &Melody, generate_from: usize, generate_to: usize, base: u8) -> Melody {
        let mut events = melody.events().to_vec();
        events.resize(
            generate_to.saturating_sub(melody.start_step()),
            MelodyEvent::NoEvent,
        );
        for step in generate_from.max(melody.start_step())..generate_to {
            let k = step - generate_from;
            events[step - melody.start_step()] = if k % 4 == 0 {
                MelodyEvent::Note(base + (k / 4 % 5) as u8)
            } else {
                MelodyEvent::NoEvent
            };
        }
        Melody::new(events, melody.start_step())
    }
}

impl PairedSequenceModel for ExtendingModel {
    fn predictahead_steps(&self) -> usize {
        self.predictahead_steps
    }

    fn generate_pair(
        &mut self,
        num_steps: usize,
        primer: &MelodyPair,
        temperature: f64,
    ) -> Result<(Melody, Melody)> {
        self.calls += 1;
        self.last_num_steps = Some(num_steps);
        self.last_temperature = Some(temperature);
        self.last_primer = Some(primer.clone());

        if let Some(reason) = &self.fail_with {
            return Err(GenerationError::model_inference(reason.clone()));
        }

        let generate_from = primer.accompaniment().end_step();
        let generate_to = generate_from + num_steps;
        Ok((
            Self::extend(primer.main_melody(), generate_from, generate_to, 72),
            Self::extend(primer.accompaniment(), generate_from, generate_to, 36),
        ))
    }
}
