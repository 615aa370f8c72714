//! Generation pipeline for the accompaniment RNN.
//!
//! Validates a request, primes the paired model with the main melody and
//! accompaniment found in the input, and splices the generated lines back
//! into one sequence tagged with instruments 0 and 1.

use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::GeneratorSettings;
use crate::error::{GenerationError, Result};
use crate::models::{PairedSequenceModel, SharedModel};
use crate::music::{DefaultMusicLibrary, MusicSequenceLibrary};
use crate::types::{GenerationRequest, GeneratorDetails, Sequence};

use super::pair::MelodyPairExtractor;
use super::steps::TimeStepConverter;
use super::validate::GenerationRequestValidator;
use super::{ACCOMPANIMENT_INSTRUMENT, MAIN_MELODY_INSTRUMENT};

/// Sequence generator extending instrument 1 conditioned on instrument 0.
pub struct AccompanimentRnnGenerator<M, L = DefaultMusicLibrary> {
    model: SharedModel<M>,
    details: GeneratorDetails,
    settings: GeneratorSettings,
    library: L,
    rng: ChaCha8Rng,
}

impl<M: PairedSequenceModel> AccompanimentRnnGenerator<M> {
    /// Creates a generator using the stock music library.
    pub fn new(
        model: SharedModel<M>,
        details: GeneratorDetails,
        settings: GeneratorSettings,
    ) -> Result<Self> {
        let library = DefaultMusicLibrary::with_default_qpm(settings.default_qpm);
        Self::with_library(model, details, settings, library)
    }
}

impl<M, L> AccompanimentRnnGenerator<M, L>
where
    M: PairedSequenceModel,
    L: MusicSequenceLibrary,
{
    /// Creates a generator with a custom music library.
    ///
    /// The RNG is seeded from `settings.seed`, or from entropy when unset.
    /// Fails with INVALID_CONFIG if `settings` do not validate.
    pub fn with_library(
        model: SharedModel<M>,
        details: GeneratorDetails,
        settings: GeneratorSettings,
        library: L,
    ) -> Result<Self> {
        if let Some(reason) = settings.validate() {
            return Err(GenerationError::invalid_config(reason));
        }

        let rng = match settings.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Ok(Self {
            model,
            details,
            settings,
            library,
            rng,
        })
    }

    pub fn details(&self) -> &GeneratorDetails {
        &self.details
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    pub fn library(&self) -> &L {
        &self.library
    }

    pub fn model(&self) -> &SharedModel<M> {
        &self.model
    }

    /// Returns the model's required priming steps.
    pub fn predictahead_steps(&self) -> Result<usize> {
        Ok(self.model.lock()?.predictahead_steps())
    }

    fn converter(&self) -> TimeStepConverter {
        TimeStepConverter::new(self.settings.steps_per_quarter)
    }

    /// Converts seconds to steps at this generator's resolution.
    pub fn seconds_to_steps(&self, seconds: f64, qpm: f64) -> usize {
        self.converter().seconds_to_steps(seconds, qpm)
    }

    /// Generates using the generator's own RNG.
    ///
    /// Successive calls advance the RNG, so only the fallback path can
    /// differ between otherwise identical calls.
    pub fn generate(&mut self, input: &Sequence, request: &GenerationRequest) -> Result<Sequence> {
        let mut rng = self.rng.clone();
        let result = self.generate_with_rng(input, request, &mut rng);
        self.rng = rng;
        result
    }

    /// Generates using a caller-provided RNG.
    pub fn generate_with_rng<R>(
        &self,
        input: &Sequence,
        request: &GenerationRequest,
        rng: &mut R,
    ) -> Result<Sequence>
    where
        R: Rng + ?Sized,
    {
        // Window counts first, before touching the input at all.
        GenerationRequestValidator::validate_sections(request)?;

        let windowed;
        let sequence = match request.input_windows.first() {
            Some(window) => {
                debug!(
                    "Restricting input to {:.3}s-{:.3}s",
                    window.start_time, window.end_time
                );
                windowed = self
                    .library
                    .extract_subsequence(input, window.start_time, window.end_time);
                &windowed
            }
            None => input,
        };

        let qpm = sequence.qpm().unwrap_or(self.settings.default_qpm);
        let converter = self.converter();
        let validator = GenerationRequestValidator::new(converter, self.predictahead_steps()?);
        let output = validator.validate(request, sequence, qpm)?;
        let temperature = request.temperature(self.settings.default_temperature)?;

        let steps_per_quarter = converter.steps_per_quarter();
        let quantized = self.library.quantize(sequence, steps_per_quarter)?;
        let extractor = MelodyPairExtractor::from_settings(&self.settings);
        let extraction = extractor.extract(&self.library, &quantized)?;

        let start_step = converter.seconds_to_steps(output.start_time, qpm);
        let end_step = converter.seconds_to_steps(output.end_time, qpm);
        validator.check_predictahead(start_step)?;

        let primed = extractor.build_pair(extraction, start_step, rng)?;
        let num_steps = end_step.saturating_sub(primed.start_step);

        debug!(
            "Generating {} steps from step {} at {} qpm (temperature {})",
            num_steps, primed.start_step, qpm, temperature
        );

        let (main_melody, accompaniment) =
            self.model
                .lock()?
                .generate_pair(num_steps, &primed.pair, temperature)?;

        let mut result = self.library.melody_to_sequence(
            &main_melody,
            MAIN_MELODY_INSTRUMENT,
            qpm,
            steps_per_quarter,
        );
        let accompaniment = self.library.melody_to_sequence(
            &accompaniment,
            ACCOMPANIMENT_INSTRUMENT,
            qpm,
            steps_per_quarter,
        );
        result.add_notes(accompaniment.notes);

        debug!("Generated {} notes", result.notes.len());

        Ok(result)
    }
}
