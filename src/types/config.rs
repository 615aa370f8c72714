//! AccompanimentRnnConfig type for model variants.
//!
//! Each configuration names one model variant and carries the parameters
//! the generator needs to drive it. Configurations are built once at
//! startup, from the built-in table or a JSON file, and never mutated.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, Result};

/// Static identity of a configured generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorDetails {
    /// Registry key, e.g. `basic_accompaniment`.
    pub id: String,
    /// Human-readable summary of the variant.
    pub description: String,
}

/// Configuration parameters for one accompaniment RNN variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccompanimentRnnConfig {
    /// Identity reported by generators built from this config.
    pub details: GeneratorDetails,

    /// Priming steps required before the first predicted step.
    pub predictahead_steps: usize,

    /// Lowest MIDI pitch the model encodes (inclusive).
    pub min_note: u8,

    /// Highest MIDI pitch the model encodes (exclusive).
    pub max_note: u8,

    /// Quantization resolution the model was trained at.
    pub steps_per_quarter: u32,
}

impl AccompanimentRnnConfig {
    /// Creates the basic variant: one step of lookahead, 48-84 pitch range.
    pub fn basic() -> Self {
        Self {
            details: GeneratorDetails {
                id: "basic_accompaniment".to_string(),
                description: "Accompaniment RNN with a one-hot paired melody encoding"
                    .to_string(),
            },
            predictahead_steps: 1,
            min_note: 48,
            max_note: 84,
            steps_per_quarter: 4,
        }
    }

    /// Creates the lookback variant: one bar of lookahead.
    pub fn lookback() -> Self {
        Self {
            details: GeneratorDetails {
                id: "lookback_accompaniment".to_string(),
                description: "Accompaniment RNN with lookback inputs over the previous two bars"
                    .to_string(),
            },
            predictahead_steps: 16,
            min_note: 48,
            max_note: 84,
            steps_per_quarter: 4,
        }
    }

    pub fn id(&self) -> &str {
        &self.details.id
    }

    /// Validates the configuration for consistency.
    ///
    /// Returns an error message if validation fails, None otherwise.
    pub fn validate(&self) -> Option<String> {
        if self.details.id.trim().is_empty() {
            return Some("id must not be empty".to_string());
        }

        if self.steps_per_quarter == 0 {
            return Some(format!("{}: steps_per_quarter must be > 0", self.details.id));
        }

        if self.min_note >= self.max_note {
            return Some(format!(
                "{}: min_note ({}) must be below max_note ({})",
                self.details.id, self.min_note, self.max_note
            ));
        }

        if self.max_note > 128 {
            return Some(format!(
                "{}: max_note must be <= 128, got {}",
                self.details.id, self.max_note
            ));
        }

        None
    }
}

/// Returns the built-in configuration table.
pub fn default_configs() -> Vec<AccompanimentRnnConfig> {
    vec![
        AccompanimentRnnConfig::basic(),
        AccompanimentRnnConfig::lookback(),
    ]
}

/// A validated, immutable list of configurations with unique ids.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigTable {
    configs: Vec<AccompanimentRnnConfig>,
}

impl ConfigTable {
    /// Validates every entry and rejects duplicate ids.
    pub fn new(configs: Vec<AccompanimentRnnConfig>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for config in &configs {
            if let Some(reason) = config.validate() {
                return Err(GenerationError::invalid_config(reason));
            }
            if !seen.insert(config.details.id.as_str()) {
                return Err(GenerationError::invalid_config(format!(
                    "duplicate config id '{}'",
                    config.details.id
                )));
            }
        }

        Ok(Self { configs })
    }

    /// Parses a JSON array of configurations.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let configs: Vec<AccompanimentRnnConfig> = serde_json::from_str(json).map_err(|e| {
            GenerationError::invalid_config(format!("failed to parse config table: {}", e))
        })?;
        Self::new(configs)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GenerationError::invalid_config(format!(
                "failed to read {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&content)
    }

    pub fn configs(&self) -> &[AccompanimentRnnConfig] {
        &self.configs
    }
}

impl Default for ConfigTable {
    fn default() -> Self {
        Self {
            configs: default_configs(),
        }
    }
}
