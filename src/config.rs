//! Generator settings module.
//!
//! Contains the runtime settings shared by every generator instance:
//! quantization resolution, tempo and temperature defaults, the pitch range
//! used for fallback accompaniment seeds, and an optional RNG seed.

use serde::{Deserialize, Serialize};

/// Quantization steps per quarter note.
pub const DEFAULT_STEPS_PER_QUARTER: u32 = 4;

/// Tempo used when the input sequence carries no tempo marking.
pub const DEFAULT_QUARTERS_PER_MINUTE: f64 = 120.0;

/// Sampling temperature used when the request does not set one.
pub const DEFAULT_TEMPERATURE: f64 = 1.0;

/// Runtime settings for accompaniment generators.
///
/// Typically built once at startup, from defaults or environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    /// Quantization resolution in steps per quarter note.
    pub steps_per_quarter: u32,

    /// Tempo assumed for input sequences without a tempo marking.
    pub default_qpm: f64,

    /// Temperature passed to the model when the request omits it.
    pub default_temperature: f64,

    /// Lowest pitch for a synthesized accompaniment seed note (inclusive).
    pub fallback_min_pitch: u8,

    /// Highest pitch for a synthesized accompaniment seed note (inclusive).
    pub fallback_max_pitch: u8,

    /// Seed for the generator's RNG. If None, seeded from entropy.
    pub seed: Option<u64>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            steps_per_quarter: DEFAULT_STEPS_PER_QUARTER,
            default_qpm: DEFAULT_QUARTERS_PER_MINUTE,
            default_temperature: DEFAULT_TEMPERATURE,
            fallback_min_pitch: 16,
            fallback_max_pitch: 54,
            seed: None,
        }
    }
}

impl GeneratorSettings {
    /// Creates settings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates settings from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `ACCOMPANIMENT_RNN_STEPS_PER_QUARTER` - Quantization resolution
    /// - `ACCOMPANIMENT_RNN_DEFAULT_QPM` - Fallback tempo
    /// - `ACCOMPANIMENT_RNN_TEMPERATURE` - Default sampling temperature
    /// - `ACCOMPANIMENT_RNN_SEED` - RNG seed for reproducible output
    ///
    /// Falls back to defaults for unset or unparseable variables.
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Creates settings from variables resolved by `var`.
    ///
    /// Same names and fallbacks as [`GeneratorSettings::from_env`].
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(steps_str) = var("ACCOMPANIMENT_RNN_STEPS_PER_QUARTER") {
            if let Ok(steps) = steps_str.parse::<u32>() {
                if steps > 0 {
                    settings.steps_per_quarter = steps;
                }
            }
        }

        if let Some(qpm_str) = var("ACCOMPANIMENT_RNN_DEFAULT_QPM") {
            if let Ok(qpm) = qpm_str.parse::<f64>() {
                if qpm > 0.0 {
                    settings.default_qpm = qpm;
                }
            }
        }

        if let Some(temperature_str) = var("ACCOMPANIMENT_RNN_TEMPERATURE") {
            if let Ok(temperature) = temperature_str.parse::<f64>() {
                if temperature > 0.0 {
                    settings.default_temperature = temperature;
                }
            }
        }

        if let Some(seed_str) = var("ACCOMPANIMENT_RNN_SEED") {
            if let Ok(seed) = seed_str.parse::<u64>() {
                settings.seed = Some(seed);
            }
        }

        settings
    }

    /// Returns a copy with the RNG seed fixed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the settings.
    ///
    /// Returns an error message if validation fails, None otherwise.
    pub fn validate(&self) -> Option<String> {
        if self.steps_per_quarter == 0 {
            return Some("steps_per_quarter must be > 0".to_string());
        }

        if !(self.default_qpm > 0.0) {
            return Some(format!("default_qpm must be > 0, got {}", self.default_qpm));
        }

        if self.fallback_min_pitch > self.fallback_max_pitch || self.fallback_max_pitch > 127 {
            return Some(format!(
                "invalid fallback pitch range {}..={}",
                self.fallback_min_pitch, self.fallback_max_pitch
            ));
        }

        None
    }
}
