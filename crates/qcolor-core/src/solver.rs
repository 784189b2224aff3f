//! Solver adapter: sample, aggregate, pick the best read, decode it.

use crate::errors::{QColorError, Result};
use crate::extract::decode;
use crate::qubo::QuboModel;
use crate::sampler::Sampler;
use crate::sampleset::SampleSet;
use crate::types::Coloring;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Default number of independent reads.
pub const DEFAULT_NUM_READS: usize = 50;

/// Outcome of a solve, with the statistics behind the chosen coloring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveReport {
    /// Decoded coloring of the lowest-energy sample
    pub coloring: Coloring,
    /// Energy of that sample
    pub energy: f64,
    /// How many reads produced the winning assignment
    pub num_occurrences: usize,
    /// Distinct assignments across all reads
    pub distinct_samples: usize,
    /// Reads requested from the sampler
    pub num_reads: usize,
    /// Backend that produced the samples
    pub sampler: String,
    /// Wall-clock time in milliseconds
    pub computation_time_ms: f64,
}

/// Runs a [`Sampler`] against coloring models.
#[derive(Debug, Clone)]
pub struct ColoringSolver<S> {
    sampler: S,
}

impl<S: Sampler> ColoringSolver<S> {
    pub fn new(sampler: S) -> Self {
        Self { sampler }
    }

    pub fn sampler(&self) -> &S {
        &self.sampler
    }

    /// Best coloring over `num_reads` reads.
    pub fn solve(&self, model: &QuboModel, num_colors: usize, num_reads: usize) -> Result<Coloring> {
        self.solve_with_report(model, num_colors, num_reads)
            .map(|report| report.coloring)
    }

    /// Like [`solve`](Self::solve) but keeps energy and multiplicity data.
    ///
    /// ## Errors
    /// - `InvalidParameter` if `num_colors < 1`, `num_reads < 1`, or the
    ///   model size is not a multiple of `num_colors`
    /// - `SolverUnavailable` if the sampler fails, returns nothing (or only
    ///   NaN energies), or returns assignments of the wrong size
    pub fn solve_with_report(
        &self,
        model: &QuboModel,
        num_colors: usize,
        num_reads: usize,
    ) -> Result<SolveReport> {
        if num_colors < 1 {
            return Err(QColorError::invalid_parameter(format!(
                "num_colors must be >= 1, got {}",
                num_colors
            )));
        }
        if num_reads < 1 {
            return Err(QColorError::invalid_parameter(format!(
                "num_reads must be >= 1, got {}",
                num_reads
            )));
        }
        if model.num_variables() % num_colors != 0 {
            return Err(QColorError::invalid_parameter(format!(
                "model of {} variables is not a whole number of {}-color blocks",
                model.num_variables(),
                num_colors
            )));
        }

        let start = Instant::now();
        let samples = self
            .sampler
            .sample(model, num_reads)
            .map_err(|e| match e {
                QColorError::SolverUnavailable(_) => e,
                other => QColorError::solver_unavailable(format!(
                    "{} sampler failed: {}",
                    self.sampler.name(),
                    other
                )),
            })?;

        if let Some(bad) = samples
            .iter()
            .find(|s| s.assignment.len() != model.num_variables())
        {
            return Err(QColorError::solver_unavailable(format!(
                "{} sampler returned {} variables, model has {}",
                self.sampler.name(),
                bad.assignment.len(),
                model.num_variables()
            )));
        }
        if samples.len() != num_reads {
            log::warn!(
                "{} sampler returned {} samples for {} reads",
                self.sampler.name(),
                samples.len(),
                num_reads
            );
        }

        let sample_set = SampleSet::aggregate(samples);
        let best = sample_set.lowest().ok_or_else(|| {
            QColorError::solver_unavailable(format!(
                "{} sampler produced no usable samples",
                self.sampler.name()
            ))
        })?;

        let coloring = decode(&best.sample.assignment, num_colors)?;
        let computation_time_ms = start.elapsed().as_secs_f64() * 1000.0;

        log::info!(
            "{}: best energy {:.4} ({}x of {} reads, {} distinct) in {:.1}ms",
            self.sampler.name(),
            best.sample.energy,
            best.num_occurrences,
            sample_set.num_reads(),
            sample_set.len(),
            computation_time_ms
        );

        let violations = coloring.violation_count();
        if violations > 0 {
            log::warn!(
                "Best sample violates the one-color rule on {} of {} nodes",
                violations,
                coloring.num_nodes
            );
        }

        Ok(SolveReport {
            energy: best.sample.energy,
            num_occurrences: best.num_occurrences,
            distinct_samples: sample_set.len(),
            num_reads,
            sampler: self.sampler.name().to_string(),
            computation_time_ms,
            coloring,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::Sample;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Replays a fixed list of assignments.
    struct ScriptedSampler {
        script: Vec<Vec<u8>>,
        calls: AtomicUsize,
    }

    impl ScriptedSampler {
        fn new(script: Vec<Vec<u8>>) -> Self {
            Self {
                script,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Sampler for ScriptedSampler {
        fn name(&self) -> &str {
            "scripted"
        }

        fn sample(&self, model: &QuboModel, _num_reads: usize) -> Result<Vec<Sample>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script
                .iter()
                .map(|bits| Sample::evaluate(model, bits.clone()))
                .collect()
        }
    }

    struct BrokenSampler;

    impl Sampler for BrokenSampler {
        fn name(&self) -> &str {
            "broken"
        }

        fn sample(&self, _model: &QuboModel, _num_reads: usize) -> Result<Vec<Sample>> {
            Err(QColorError::config("backend unreachable"))
        }
    }

    /// Two variables, one color each: x0 = -1, x1 = -1, x0 x1 = +3.
    fn toy_model() -> QuboModel {
        let mut model = QuboModel::new(2);
        model.set(0, 0, -1.0);
        model.set(1, 1, -1.0);
        model.set(0, 1, 3.0);
        model
    }

    #[test]
    fn test_selects_minimum_energy() {
        let sampler = ScriptedSampler::new(vec![vec![1, 1], vec![0, 0], vec![0, 1], vec![0, 0]]);
        let report = ColoringSolver::new(sampler)
            .solve_with_report(&toy_model(), 1, 4)
            .unwrap();
        assert_eq!(report.energy, -1.0);
        assert_eq!(report.distinct_samples, 3);
        assert_eq!(report.coloring.pairs(), vec![(1, 0)]);
    }

    #[test]
    fn test_tie_goes_to_first_seen() {
        let sampler = ScriptedSampler::new(vec![vec![1, 0], vec![0, 1], vec![0, 1]]);
        let report = ColoringSolver::new(sampler)
            .solve_with_report(&toy_model(), 1, 3)
            .unwrap();
        assert_eq!(report.coloring.pairs(), vec![(0, 0)]);
        assert_eq!(report.num_occurrences, 1);
    }

    #[test]
    fn test_parameters_checked_before_sampling() {
        let solver = ColoringSolver::new(ScriptedSampler::new(vec![vec![1, 0]]));
        let zero_reads = solver.solve(&toy_model(), 1, 0);
        assert!(matches!(zero_reads, Err(QColorError::InvalidParameter(_))));
        let zero_colors = solver.solve(&toy_model(), 0, 5);
        assert!(matches!(zero_colors, Err(QColorError::InvalidParameter(_))));
        assert_eq!(solver.sampler().calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_model_not_divisible_by_colors_rejected_before_sampling() {
        let solver = ColoringSolver::new(ScriptedSampler::new(vec![vec![1, 0, 0, 0]]));
        let result = solver.solve(&QuboModel::new(4), 3, 5);
        assert!(matches!(result, Err(QColorError::InvalidParameter(_))));
        assert_eq!(solver.sampler().calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_empty_backend_is_unavailable() {
        let solver = ColoringSolver::new(ScriptedSampler::new(Vec::new()));
        let result = solver.solve(&toy_model(), 1, 5);
        assert!(matches!(result, Err(QColorError::SolverUnavailable(_))));
    }

    #[test]
    fn test_backend_errors_surface_as_unavailable() {
        let result = ColoringSolver::new(BrokenSampler).solve(&toy_model(), 1, 5);
        match result {
            Err(QColorError::SolverUnavailable(msg)) => assert!(msg.contains("broken")),
            other => panic!("expected SolverUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_sized_samples_rejected() {
        struct ShortSampler;
        impl Sampler for ShortSampler {
            fn name(&self) -> &str {
                "short"
            }
            fn sample(&self, _model: &QuboModel, _num_reads: usize) -> Result<Vec<Sample>> {
                Ok(vec![Sample::new(vec![1], -1.0)])
            }
        }
        let result = ColoringSolver::new(ShortSampler).solve(&toy_model(), 1, 1);
        assert!(matches!(result, Err(QColorError::SolverUnavailable(_))));
    }
}
