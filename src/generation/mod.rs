//! Accompaniment generation module.
//!
//! Provides the request pipeline for the accompaniment RNN:
//! - [`TimeStepConverter`]: Seconds to quantization steps
//! - [`GenerationRequestValidator`]: Window and timing preconditions
//! - [`MelodyPairExtractor`]: Main melody and accompaniment primers
//! - [`AccompanimentRnnGenerator`]: Validates, primes, delegates, and splices
//! - [`GeneratorRegistry`]: Configured generators by id

pub mod pair;
pub mod pipeline;
pub mod registry;
pub mod steps;
pub mod validate;

#[cfg(test)]
pub(crate) mod testing;

/// Instrument tag of the main melody.
pub const MAIN_MELODY_INSTRUMENT: u32 = 0;

/// Instrument tag of the accompaniment.
pub const ACCOMPANIMENT_INSTRUMENT: u32 = 1;

// Re-export commonly used items
pub use pair::{MelodyExtraction, MelodyPairExtractor, PrimedPair};
pub use pipeline::AccompanimentRnnGenerator;
pub use registry::{GeneratorFactory, GeneratorRegistry};
pub use steps::TimeStepConverter;
pub use validate::GenerationRequestValidator;
