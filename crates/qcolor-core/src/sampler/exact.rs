//! Brute-force sampler for small models.
//!
//! Walks all `2^n` assignments in Gray-code order, updating the energy with
//! one bit flip per step.

use super::{Sample, Sampler};
use crate::errors::{QColorError, Result};
use crate::qubo::QuboModel;

/// Largest model the exact sampler will enumerate.
pub const MAX_EXACT_VARIABLES: usize = 24;

const ENERGY_TOLERANCE: f64 = 1e-9;

/// Deterministic sampler returning the lowest-energy assignments.
///
/// `sample(model, r)` yields the `r` best assignments ordered by energy, ties
/// broken by the assignment read as a little-endian bit string. If `r`
/// exceeds `2^n` the list is padded by repeating the ground state.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactSampler;

impl ExactSampler {
    pub fn new() -> Self {
        Self
    }

    /// Every assignment sharing the minimum energy.
    pub fn ground_states(&self, model: &QuboModel) -> Result<Vec<Sample>> {
        let spectrum = enumerate(model)?;
        let minimum = spectrum
            .iter()
            .map(|&(_, energy)| energy)
            .fold(f64::INFINITY, f64::min);
        spectrum
            .into_iter()
            .filter(|&(_, energy)| (energy - minimum).abs() <= ENERGY_TOLERANCE)
            .map(|(bits, _)| Sample::evaluate(model, unpack(bits, model.num_variables())))
            .collect()
    }
}

/// `(bits, energy)` for every assignment, sorted by energy then bits.
fn enumerate(model: &QuboModel) -> Result<Vec<(u64, f64)>> {
    let n = model.num_variables();
    if n > MAX_EXACT_VARIABLES {
        return Err(QColorError::solver_unavailable(format!(
            "exact sampler supports at most {} variables, model has {}",
            MAX_EXACT_VARIABLES, n
        )));
    }

    let neighborhoods = model.neighborhoods();
    let mut field = model.linear_biases();
    let mut bits: u64 = 0;
    let mut energy = 0.0;
    let total: u64 = 1 << n;

    let mut spectrum = Vec::with_capacity(total as usize);
    spectrum.push((bits, energy));

    for step in 1..total {
        let i = step.trailing_zeros() as usize;
        let set = bits & (1 << i) == 0;
        energy += if set { field[i] } else { -field[i] };
        let sign = if set { 1.0 } else { -1.0 };
        for &(j, coupling) in &neighborhoods[i] {
            field[j] += sign * coupling;
        }
        bits ^= 1 << i;
        spectrum.push((bits, energy));
    }

    spectrum.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
    Ok(spectrum)
}

fn unpack(bits: u64, n: usize) -> Vec<u8> {
    (0..n).map(|i| ((bits >> i) & 1) as u8).collect()
}

impl Sampler for ExactSampler {
    fn name(&self) -> &str {
        "exact"
    }

    fn sample(&self, model: &QuboModel, num_reads: usize) -> Result<Vec<Sample>> {
        if num_reads < 1 {
            return Err(QColorError::invalid_parameter(
                "num_reads must be >= 1, got 0",
            ));
        }
        let spectrum = enumerate(model)?;
        let n = model.num_variables();
        let ground = spectrum[0].0;

        (0..num_reads)
            .map(|read| {
                let bits = spectrum.get(read).map_or(ground, |&(bits, _)| bits);
                Sample::evaluate(model, unpack(bits, n))
            })
            .collect()
    }
}
