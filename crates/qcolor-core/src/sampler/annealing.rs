//! Simulated annealing over single-bit flips.
//!
//! Each read starts from a uniformly random assignment and performs
//! `num_sweeps` Metropolis sweeps while the inverse temperature grows
//! geometrically from `beta_min` to `beta_max`. Reads run on the rayon pool;
//! read `r` draws from `ChaCha8Rng` stream `r` of the base seed, so a seeded
//! run returns the same samples for any thread count.

use super::{Sample, Sampler};
use crate::errors::{QColorError, Result};
use crate::qubo::QuboModel;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Annealing schedule parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnealingConfig {
    /// Metropolis sweeps per read
    #[serde(default = "default_num_sweeps")]
    pub num_sweeps: usize,

    /// `(beta_min, beta_max)`; derived from the model's coefficients when unset
    #[serde(default)]
    pub beta_range: Option<(f64, f64)>,

    /// Base seed; drawn from entropy when unset
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_num_sweeps() -> usize {
    1000
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            num_sweeps: default_num_sweeps(),
            beta_range: None,
            seed: None,
        }
    }
}

impl AnnealingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.num_sweeps < 1 {
            return Err(QColorError::invalid_parameter(
                "num_sweeps must be >= 1, got 0",
            ));
        }
        if let Some((beta_min, beta_max)) = self.beta_range {
            let ordered = beta_min.is_finite()
                && beta_max.is_finite()
                && beta_min > 0.0
                && beta_min <= beta_max;
            if !ordered {
                return Err(QColorError::invalid_parameter(format!(
                    "beta_range must satisfy 0 < beta_min <= beta_max, got ({}, {})",
                    beta_min, beta_max
                )));
            }
        }
        Ok(())
    }
}

/// CPU simulated-annealing sampler.
#[derive(Debug, Clone, Default)]
pub struct SimulatedAnnealingSampler {
    config: AnnealingConfig,
}

impl SimulatedAnnealingSampler {
    pub fn new(config: AnnealingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Sampler with default schedule and a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            config: AnnealingConfig {
                seed: Some(seed),
                ..AnnealingConfig::default()
            },
        }
    }

    pub fn config(&self) -> &AnnealingConfig {
        &self.config
    }

    /// Geometric inverse-temperature schedule, one entry per sweep.
    fn schedule(&self, model: &QuboModel) -> Vec<f64> {
        let (beta_min, beta_max) = self
            .config
            .beta_range
            .unwrap_or_else(|| default_beta_range(model));
        let sweeps = self.config.num_sweeps;
        if sweeps == 1 {
            return vec![beta_max];
        }
        let ratio = (beta_max / beta_min).powf(1.0 / (sweeps - 1) as f64);
        let mut beta = beta_min;
        let mut schedule = Vec::with_capacity(sweeps);
        for _ in 0..sweeps {
            schedule.push(beta);
            beta *= ratio;
        }
        schedule
    }
}

/// Hot end accepts the largest possible uphill flip with probability 1/2,
/// cold end accepts the smallest one with probability 1/100.
fn default_beta_range(model: &QuboModel) -> (f64, f64) {
    let mut max_field = vec![0.0f64; model.num_variables()];
    let mut min_coefficient = f64::INFINITY;

    for ((i, j), value) in model.terms() {
        let magnitude = value.abs();
        if magnitude == 0.0 {
            continue;
        }
        min_coefficient = min_coefficient.min(magnitude);
        max_field[i] += magnitude;
        if i != j {
            max_field[j] += magnitude;
        }
    }

    let max_delta = max_field.into_iter().fold(0.0f64, f64::max);
    if max_delta == 0.0 || !min_coefficient.is_finite() {
        return (0.1, 1.0);
    }

    let beta_min = 2f64.ln() / max_delta;
    let beta_max = (100f64.ln() / min_coefficient).max(beta_min);
    (beta_min, beta_max)
}

fn anneal_once(
    biases: &[f64],
    neighborhoods: &[Vec<(usize, f64)>],
    schedule: &[f64],
    rng: &mut ChaCha8Rng,
) -> Vec<u8> {
    let n = biases.len();
    let mut state: Vec<u8> = (0..n).map(|_| rng.gen_range(0..=1u8)).collect();

    // field[i] = h_i + sum_j J_ij x_j, so flipping i changes energy by
    // +field[i] when 0 -> 1 and -field[i] when 1 -> 0
    let mut field = biases.to_vec();
    for (i, neighbors) in neighborhoods.iter().enumerate() {
        if state[i] == 1 {
            for &(j, coupling) in neighbors {
                field[j] += coupling;
            }
        }
    }

    for &beta in schedule {
        for i in 0..n {
            let delta = if state[i] == 0 { field[i] } else { -field[i] };
            let accept = delta <= 0.0 || rng.gen::<f64>() < (-beta * delta).exp();
            if accept {
                let step = if state[i] == 0 { 1.0 } else { -1.0 };
                state[i] ^= 1;
                for &(j, coupling) in &neighborhoods[i] {
                    field[j] += step * coupling;
                }
            }
        }
    }

    state
}

impl Sampler for SimulatedAnnealingSampler {
    fn name(&self) -> &str {
        "simulated-annealing"
    }

    fn sample(&self, model: &QuboModel, num_reads: usize) -> Result<Vec<Sample>> {
        if num_reads < 1 {
            return Err(QColorError::invalid_parameter(
                "num_reads must be >= 1, got 0",
            ));
        }

        let base_seed = self.config.seed.unwrap_or_else(rand::random);
        let biases = model.linear_biases();
        let neighborhoods = model.neighborhoods();
        let schedule = self.schedule(model);

        log::debug!(
            "SA sampler: {} reads, {} sweeps, beta {:.4} -> {:.4}, seed {}",
            num_reads,
            schedule.len(),
            schedule.first().copied().unwrap_or_default(),
            schedule.last().copied().unwrap_or_default(),
            base_seed
        );

        (0..num_reads)
            .into_par_iter()
            .map(|read| {
                let mut rng = ChaCha8Rng::seed_from_u64(base_seed);
                rng.set_stream(read as u64);
                let assignment = anneal_once(&biases, &neighborhoods, &schedule, &mut rng);
                Sample::evaluate(model, assignment)
            })
            .collect()
    }
}
