//! Sampling backends.
//!
//! A [`Sampler`] receives a [`QuboModel`] and a read count and returns one
//! [`Sample`] per read. The solver treats it as a black box, so tests can
//! swap in the exact sampler or a scripted one.

mod annealing;
mod exact;

pub use annealing::{AnnealingConfig, SimulatedAnnealingSampler};
pub use exact::{ExactSampler, MAX_EXACT_VARIABLES};

use crate::errors::Result;
use crate::qubo::QuboModel;
use serde::{Deserialize, Serialize};

/// One read: a full 0/1 assignment and its energy under the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub assignment: Vec<u8>,
    pub energy: f64,
}

impl Sample {
    pub fn new(assignment: Vec<u8>, energy: f64) -> Self {
        Self { assignment, energy }
    }

    /// Scores `assignment` against `model`.
    pub fn evaluate(model: &QuboModel, assignment: Vec<u8>) -> Result<Self> {
        let energy = model.energy(&assignment)?;
        Ok(Self { assignment, energy })
    }
}

/// Stochastic or exact optimization backend.
///
/// Reads must be independent of each other. Implementations return exactly
/// `num_reads` samples or an error.
pub trait Sampler: Send + Sync {
    /// Backend name for logs and reports.
    fn name(&self) -> &str;

    fn sample(&self, model: &QuboModel, num_reads: usize) -> Result<Vec<Sample>>;
}

impl<S: Sampler + ?Sized> Sampler for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn sample(&self, model: &QuboModel, num_reads: usize) -> Result<Vec<Sample>> {
        (**self).sample(model, num_reads)
    }
}
