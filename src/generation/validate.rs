//! Request preconditions checked before any generation work.
//!
//! Checks run in a fixed order and the first violation is reported:
//! 1. at most one input window
//! 2. exactly one output window
//! 3. the output window starts at or after the end of the accompaniment
//! 4. the output start step leaves room for the model's predict-ahead steps

use crate::error::{GenerationError, Result};
use crate::types::{GenerationRequest, Sequence, TimeWindow};

use super::steps::TimeStepConverter;
use super::ACCOMPANIMENT_INSTRUMENT;

/// Stateless validator bound to a step resolution and a model's lookahead.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequestValidator {
    converter: TimeStepConverter,
    predictahead_steps: usize,
}

impl GenerationRequestValidator {
    pub fn new(converter: TimeStepConverter, predictahead_steps: usize) -> Self {
        Self {
            converter,
            predictahead_steps,
        }
    }

    /// Checks the window counts and returns the output window.
    pub fn validate_sections(request: &GenerationRequest) -> Result<TimeWindow> {
        if request.input_windows.len() > 1 {
            return Err(GenerationError::too_many_input_windows(
                request.input_windows.len(),
            ));
        }

        match request.output_windows.as_slice() {
            [output] => Ok(*output),
            windows => Err(GenerationError::wrong_output_window_count(windows.len())),
        }
    }

    /// Rejects output windows starting before the last accompaniment note ends.
    pub fn check_accompaniment_end(sequence: &Sequence, output: &TimeWindow) -> Result<()> {
        let accompaniment_end_time = sequence.instrument_end_time(ACCOMPANIMENT_INSTRUMENT);
        if accompaniment_end_time > output.start_time {
            return Err(GenerationError::overlaps_accompaniment(
                output.start_time,
                accompaniment_end_time,
            ));
        }
        Ok(())
    }

    /// Rejects start steps earlier than the model's predict-ahead steps.
    pub fn check_predictahead(&self, start_step: usize) -> Result<()> {
        if start_step < self.predictahead_steps {
            return Err(GenerationError::before_predictahead(
                self.predictahead_steps,
                start_step,
            ));
        }
        Ok(())
    }

    /// Runs all checks in order against the (possibly windowed) input.
    ///
    /// Returns the output window on success.
    pub fn validate(
        &self,
        request: &GenerationRequest,
        sequence: &Sequence,
        qpm: f64,
    ) -> Result<TimeWindow> {
        let output = Self::validate_sections(request)?;
        Self::check_accompaniment_end(sequence, &output)?;
        self.check_predictahead(self.converter.seconds_to_steps(output.start_time, qpm))?;
        Ok(output)
    }
}
