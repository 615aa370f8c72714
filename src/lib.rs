//! accompaniment-rnn: paired melody generation as a sequence generator.
//!
//! Given a priming sequence with a main melody (instrument 0) and an
//! accompaniment (instrument 1), the generator quantizes the input,
//! extracts both monophonic lines, asks a paired model to extend them
//! jointly into a requested time window, and returns one combined sequence.
//!
//! # Modules
//!
//! - [`types`]: Core data types (Sequence, Melody, GenerationRequest, AccompanimentRnnConfig)
//! - [`config`]: Runtime settings (GeneratorSettings)
//! - [`music`]: Quantization, melody extraction, and conversions
//! - [`models`]: The PairedSequenceModel capability
//! - [`generation`]: Validation, primer construction, the generator, and its registry
//! - [`error`]: Error types and codes (GenerationError, ErrorCode)
//!
//! # Example
//!
//! ```rust,ignore
//! use accompaniment_rnn::{
//!     ConfigTable, GenerationRequest, GeneratorRegistry, GeneratorSettings, TimeWindow,
//! };
//!
//! let registry = GeneratorRegistry::build(
//!     &ConfigTable::default(),
//!     &GeneratorSettings::from_env(),
//!     |config| MyModel::load(config),
//! )?;
//!
//! let mut generator = registry.construct("basic_accompaniment")?;
//! let request = GenerationRequest::new(TimeWindow::new(4.0, 12.0)).with_temperature(0.9);
//! let output = generator.generate(&primer, &request)?;
//! ```

pub mod config;
pub mod error;
pub mod generation;
pub mod models;
pub mod music;
pub mod types;

// Re-export commonly used types at crate root for convenience
pub use config::GeneratorSettings;
pub use error::{ErrorCode, GenerationError, Result};
pub use generation::{AccompanimentRnnGenerator, GeneratorFactory, GeneratorRegistry};
pub use models::{PairedSequenceModel, SharedModel};
pub use music::{DefaultMusicLibrary, MusicSequenceLibrary};
pub use types::{
    AccompanimentRnnConfig, ConfigTable, GenerationRequest, GeneratorDetails, Melody,
    MelodyEvent, MelodyPair, Note, Sequence, TimeWindow,
};
