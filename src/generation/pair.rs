//! Melody pair extraction and primer alignment.
//!
//! Extraction yields a [`MelodyExtraction`] whose three shapes are handled
//! explicitly. The single-melody shape synthesizes an accompaniment seed
//! note from an injected RNG so results are reproducible under a fixed seed.

use std::ops::RangeInclusive;

use log::{debug, warn};
use rand::Rng;

use crate::config::GeneratorSettings;
use crate::error::{GenerationError, Result};
use crate::music::{ExtractionOptions, MusicSequenceLibrary};
use crate::types::{Melody, MelodyEvent, MelodyPair, QuantizedSequence};

/// The shapes extraction can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MelodyExtraction {
    /// Two melodies, taken in extraction order.
    ///
    /// Extraction order follows instrument order, so the first melody is
    /// assumed to be the main part. Instrument identity is not checked.
    ExactlyTwo {
        main_melody: Melody,
        accompaniment: Melody,
    },
    /// A single melody; the accompaniment must be synthesized.
    OneMelodyFallback(Melody),
    /// Any other count.
    Unsupported(usize),
}

impl MelodyExtraction {
    pub fn from_melodies(melodies: Vec<Melody>) -> Self {
        let count = melodies.len();
        let mut melodies = melodies.into_iter();
        match (melodies.next(), melodies.next(), count) {
            (Some(main_melody), Some(accompaniment), 2) => MelodyExtraction::ExactlyTwo {
                main_melody,
                accompaniment,
            },
            (Some(main_melody), None, 1) => MelodyExtraction::OneMelodyFallback(main_melody),
            _ => MelodyExtraction::Unsupported(count),
        }
    }
}

/// A primer pair ready for the model, with the step generation starts at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimedPair {
    pub pair: MelodyPair,
    /// Generation start step; one past the seed note on the fallback path.
    pub start_step: usize,
}

/// Derives a main melody and an accompaniment from a quantized sequence.
#[derive(Debug, Clone)]
pub struct MelodyPairExtractor {
    fallback_pitches: RangeInclusive<u8>,
}

impl MelodyPairExtractor {
    /// Creates an extractor seeding fallback accompaniments from `fallback_pitches`.
    pub fn new(fallback_pitches: RangeInclusive<u8>) -> Self {
        Self { fallback_pitches }
    }

    pub fn from_settings(settings: &GeneratorSettings) -> Self {
        Self::new(settings.fallback_min_pitch..=settings.fallback_max_pitch)
    }

    /// Runs melody extraction with the accompaniment policy.
    pub fn extract<L>(&self, library: &L, quantized: &QuantizedSequence) -> Result<MelodyExtraction>
    where
        L: MusicSequenceLibrary + ?Sized,
    {
        let (melodies, stats) =
            library.extract_melodies(quantized, &ExtractionOptions::accompaniment())?;
        debug!("Melody extraction: {:?}", stats);
        Ok(MelodyExtraction::from_melodies(melodies))
    }

    /// Builds the primer pair and aligns the accompaniment to the start step.
    ///
    /// The accompaniment always ends exactly at the returned start step.
    pub fn build_pair<R>(
        &self,
        extraction: MelodyExtraction,
        start_step: usize,
        rng: &mut R,
    ) -> Result<PrimedPair>
    where
        R: Rng + ?Sized,
    {
        let (main_melody, mut accompaniment, start_step) = match extraction {
            MelodyExtraction::ExactlyTwo {
                main_melody,
                accompaniment,
            } => (main_melody, accompaniment, start_step),
            MelodyExtraction::OneMelodyFallback(main_melody) => {
                warn!(
                    "No accompaniment was extracted from the priming sequence. \
                     Priming will be generated from scratch."
                );
                let accompaniment = self.seed_accompaniment(&main_melody, start_step, rng);
                (main_melody, accompaniment, start_step + 1)
            }
            MelodyExtraction::Unsupported(count) => {
                return Err(GenerationError::unsupported_melody_count(count));
            }
        };

        accompaniment.set_length(start_step.saturating_sub(accompaniment.start_step()));

        Ok(PrimedPair {
            pair: MelodyPair::new(main_melody, accompaniment),
            start_step,
        })
    }

    /// Silence from the main melody's start, then one random note at
    /// `start_step`.
    ///
    /// A main melody starting after `start_step` does not move the seed; the
    /// accompaniment then begins at the seed note itself.
    fn seed_accompaniment<R>(&self, main_melody: &Melody, start_step: usize, rng: &mut R) -> Melody
    where
        R: Rng + ?Sized,
    {
        let anchor = main_melody.start_step().min(start_step);
        let mut events = vec![MelodyEvent::NoEvent; start_step - anchor];
        events.push(MelodyEvent::Note(rng.gen_range(self.fallback_pitches.clone())));
        Melody::new(events, anchor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use MelodyEvent::*;

    fn extractor() -> MelodyPairExtractor {
        MelodyPairExtractor::new(16..=54)
    }

    #[test]
    fn classifies_melody_counts() {
        let melody = Melody::new(vec![Note(60)], 0);
        assert_eq!(
            MelodyExtraction::from_melodies(vec![]),
            MelodyExtraction::Unsupported(0)
        );
        assert_eq!(
            MelodyExtraction::from_melodies(vec![melody.clone()]),
            MelodyExtraction::OneMelodyFallback(melody.clone())
        );
        assert!(matches!(
            MelodyExtraction::from_melodies(vec![melody.clone(), melody.clone()]),
            MelodyExtraction::ExactlyTwo { .. }
        ));
        assert_eq!(
            MelodyExtraction::from_melodies(vec![melody.clone(), melody.clone(), melody]),
            MelodyExtraction::Unsupported(3)
        );
    }

    #[test]
    fn two_melodies_keep_order_and_align_accompaniment() {
        let extraction = MelodyExtraction::ExactlyTwo {
            main_melody: Melody::new(vec![Note(72); 20], 0),
            accompaniment: Melody::new(vec![Note(40), NoEvent], 0),
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let primed = extractor().build_pair(extraction, 8, &mut rng).unwrap();

        assert_eq!(primed.start_step, 8);
        assert_eq!(primed.pair.main_melody().len(), 20);
        assert_eq!(primed.pair.accompaniment().end_step(), 8);
        assert_eq!(primed.pair.accompaniment().events()[0], Note(40));
    }

    #[test]
    fn long_accompaniment_is_truncated() {
        let extraction = MelodyExtraction::ExactlyTwo {
            main_melody: Melody::new(vec![Note(72)], 0),
            accompaniment: Melody::new(vec![Note(40); 12], 0),
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let primed = extractor().build_pair(extraction, 4, &mut rng).unwrap();
        assert_eq!(primed.pair.accompaniment().len(), 4);
    }

    #[test]
    fn fallback_seeds_note_before_start() {
        let main = Melody::new(vec![Note(72), NoEvent, Note(74)], 16);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let primed = extractor()
            .build_pair(MelodyExtraction::OneMelodyFallback(main.clone()), 20, &mut rng)
            .unwrap();

        assert_eq!(primed.start_step, 21);
        assert_eq!(primed.pair.main_melody(), &main);

        let accompaniment = primed.pair.accompaniment();
        assert_eq!(accompaniment.start_step(), 16);
        assert_eq!(accompaniment.len(), 5);
        assert!(accompaniment.events()[..4].iter().all(|e| *e == NoEvent));
        match accompaniment.events()[4] {
            Note(pitch) => assert!((16..=54).contains(&pitch)),
            other => panic!("expected seed note, got {:?}", other),
        }
    }

    #[test]
    fn fallback_seed_precedes_late_main_melody() {
        let main = Melody::new(vec![Note(72), NoEvent, Note(74)], 16);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let primed = extractor()
            .build_pair(MelodyExtraction::OneMelodyFallback(main.clone()), 10, &mut rng)
            .unwrap();

        assert_eq!(primed.start_step, 11);
        assert_eq!(primed.pair.main_melody(), &main);

        let accompaniment = primed.pair.accompaniment();
        assert_eq!(accompaniment.start_step(), 10);
        assert_eq!(accompaniment.end_step(), 11);
        assert!(matches!(accompaniment.events()[0], Note(pitch) if (16..=54).contains(&pitch)));
    }

    #[test]
    fn fallback_is_reproducible_under_seed() {
        let main = Melody::new(vec![Note(72)], 0);
        let build = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            extractor()
                .build_pair(MelodyExtraction::OneMelodyFallback(main.clone()), 8, &mut rng)
                .unwrap()
        };
        assert_eq!(build(9), build(9));
    }

    #[test]
    fn unsupported_count_fails() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = extractor()
            .build_pair(MelodyExtraction::Unsupported(3), 8, &mut rng)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UnsupportedMelodyCount);
        assert!(err.message.contains("got 3"));
    }
}
