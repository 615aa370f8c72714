//! Backend abstraction for paired melody models.
//!
//! The generator only needs two things from a model: how many priming
//! steps it requires, and a way to extend a melody pair. Inference engines
//! implement [`PairedSequenceModel`]; tests plug in stubs.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{GenerationError, Result};
use crate::types::{Melody, MelodyPair};

/// A generative model that extends a main melody and its accompaniment jointly.
pub trait PairedSequenceModel {
    /// Minimum number of priming steps before the first predicted step.
    fn predictahead_steps(&self) -> usize;

    /// Extends `primer` by `num_steps` steps at the given temperature.
    ///
    /// Returns `(main_melody, accompaniment)`, each containing its primer
    /// followed by the generated steps. Errors are passed to the caller
    /// unchanged.
    fn generate_pair(
        &mut self,
        num_steps: usize,
        primer: &MelodyPair,
        temperature: f64,
    ) -> Result<(Melody, Melody)>;
}

/// A model instance shared by every generator built from one registry entry.
///
/// The mutex serializes inference calls against the same instance.
#[derive(Debug)]
pub struct SharedModel<M> {
    inner: Arc<Mutex<M>>,
}

impl<M> SharedModel<M> {
    pub fn new(model: M) -> Self {
        Self {
            inner: Arc::new(Mutex::new(model)),
        }
    }

    /// Locks the model for exclusive use.
    ///
    /// A lock poisoned by a panicking inference call is reported as a
    /// MODEL_INFERENCE error.
    pub fn lock(&self) -> Result<MutexGuard<'_, M>> {
        self.inner
            .lock()
            .map_err(|_| GenerationError::model_inference("model lock poisoned by a failed call"))
    }

    /// Returns true if both handles point at the same instance.
    pub fn same_instance(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<M> Clone for SharedModel<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
