//! Generator registry keyed by configuration id.
//!
//! The registry is built once from a [`ConfigTable`] and is read-only
//! afterwards. Each entry pre-binds one model instance and the variant's
//! details, so building a generator takes no arguments. Generators built
//! from the same entry share the model and its inference lock.

use std::collections::BTreeMap;

use crate::config::GeneratorSettings;
use crate::error::{GenerationError, Result};
use crate::models::{PairedSequenceModel, SharedModel};
use crate::types::{AccompanimentRnnConfig, ConfigTable, GeneratorDetails};

use super::pipeline::AccompanimentRnnGenerator;

/// Zero-argument constructor for one configured generator.
pub struct GeneratorFactory<M> {
    config: AccompanimentRnnConfig,
    model: SharedModel<M>,
    settings: GeneratorSettings,
}

impl<M: PairedSequenceModel> GeneratorFactory<M> {
    pub fn details(&self) -> &GeneratorDetails {
        &self.config.details
    }

    pub fn config(&self) -> &AccompanimentRnnConfig {
        &self.config
    }

    /// Builds a generator bound to this entry's model.
    pub fn build(&self) -> Result<AccompanimentRnnGenerator<M>> {
        AccompanimentRnnGenerator::new(
            self.model.clone(),
            self.config.details.clone(),
            self.settings.clone(),
        )
    }
}

/// Immutable map from configuration id to generator factory.
pub struct GeneratorRegistry<M> {
    factories: BTreeMap<String, GeneratorFactory<M>>,
}

impl<M: PairedSequenceModel> GeneratorRegistry<M> {
    /// Builds one model per configuration and binds it to a factory.
    ///
    /// Each factory uses `settings` with the resolution overridden by its
    /// configuration's `steps_per_quarter`. Fails on invalid settings or
    /// when `make_model` fails.
    pub fn build<F>(
        table: &ConfigTable,
        settings: &GeneratorSettings,
        mut make_model: F,
    ) -> Result<Self>
    where
        F: FnMut(&AccompanimentRnnConfig) -> Result<M>,
    {
        if let Some(reason) = settings.validate() {
            return Err(GenerationError::invalid_config(reason));
        }

        let mut factories = BTreeMap::new();
        for config in table.configs() {
            let model = SharedModel::new(make_model(config)?);
            let settings = GeneratorSettings {
                steps_per_quarter: config.steps_per_quarter,
                ..settings.clone()
            };
            factories.insert(
                config.details.id.clone(),
                GeneratorFactory {
                    config: config.clone(),
                    model,
                    settings,
                },
            );
        }

        Ok(Self { factories })
    }

    /// Returns the factory registered under `id`.
    pub fn get(&self, id: &str) -> Option<&GeneratorFactory<M>> {
        self.factories.get(id)
    }

    /// Returns the registered ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Builds the generator registered under `id`.
    pub fn construct(&self, id: &str) -> Result<AccompanimentRnnGenerator<M>> {
        let factory = self.get(id).ok_or_else(|| {
            GenerationError::invalid_config(format!("unknown generator id '{}'", id))
        })?;
        factory.build()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
