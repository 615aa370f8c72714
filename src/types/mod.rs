//! Core types for the accompaniment generator.
//!
//! This module re-exports all the core data types used throughout the crate:
//! - [`Sequence`]: Timed notes in seconds, tagged by instrument
//! - [`QuantizedSequence`]: A sequence snapped onto a step grid
//! - [`Melody`] / [`MelodyPair`]: Monophonic step events and their pairing
//! - [`GenerationRequest`]: Input/output windows and named arguments
//! - [`AccompanimentRnnConfig`]: Parameters for one model variant

mod config;
mod melody;
mod request;
mod sequence;

// Re-export all types at the module level
pub use config::{default_configs, AccompanimentRnnConfig, ConfigTable, GeneratorDetails};
pub use melody::{Melody, MelodyEvent, MelodyPair};
pub use request::{GenerationRequest, GeneratorArg, TimeWindow, TEMPERATURE_ARG};
pub use sequence::{
    Note, QuantizedNote, QuantizedSequence, Sequence, Tempo, TimeSignature, DEFAULT_VELOCITY,
};
