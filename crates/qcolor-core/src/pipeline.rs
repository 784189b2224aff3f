//! End-to-end run: order, build, solve, validate.

use crate::config::SolverConfig;
use crate::errors::Result;
use crate::qubo::{build_coloring_qubo, QuboStats};
use crate::sampler::{Sampler, SimulatedAnnealingSampler};
use crate::solver::{ColoringSolver, SolveReport};
use crate::types::{Graph, NodeOrder};
use crate::validation::{check_feasibility, FeasibilityReport};
use serde::{Deserialize, Serialize};

/// Everything a caller needs to interpret one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutcome {
    /// Order used to build the model; positions in the coloring refer to it
    pub order: NodeOrder,
    pub model_stats: QuboStats,
    pub report: SolveReport,
    pub feasibility: FeasibilityReport,
}

impl PipelineOutcome {
    /// Per-vertex colors when the coloring is one-hot.
    pub fn vertex_colors(&self) -> Option<Vec<usize>> {
        self.report.coloring.vertex_colors(&self.order)
    }
}

/// Validated configuration plus a sampler.
pub struct ColoringPipeline<S> {
    config: SolverConfig,
    solver: ColoringSolver<S>,
}

impl ColoringPipeline<SimulatedAnnealingSampler> {
    /// Pipeline backed by the simulated-annealing sampler from `config`.
    pub fn with_annealing(config: SolverConfig) -> Result<Self> {
        config.validate()?;
        let sampler = SimulatedAnnealingSampler::new(config.annealing.clone())?;
        Ok(Self {
            config,
            solver: ColoringSolver::new(sampler),
        })
    }
}

impl<S: Sampler> ColoringPipeline<S> {
    pub fn new(config: SolverConfig, sampler: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            solver: ColoringSolver::new(sampler),
        })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Runs with the natural node order.
    pub fn run(&self, graph: &Graph) -> Result<PipelineOutcome> {
        self.run_with_order(graph, NodeOrder::natural(graph))
    }

    /// Runs with an explicit node order; the same order is used for decoding
    /// checks.
    pub fn run_with_order(&self, graph: &Graph, order: NodeOrder) -> Result<PipelineOutcome> {
        let model = build_coloring_qubo(
            graph,
            &order,
            self.config.num_colors,
            self.config.penalties,
        )?;
        let model_stats = model.stats();

        let report =
            self.solver
                .solve_with_report(&model, self.config.num_colors, self.config.num_reads)?;
        let feasibility = check_feasibility(graph, &order, &report.coloring)?;

        if feasibility.feasible {
            log::info!(
                "Feasible {}-coloring found for {} vertices ({} colors used)",
                self.config.num_colors,
                graph.num_vertices,
                report.coloring.colors_used()
            );
        } else {
            log::warn!(
                "Infeasible coloring: {} conflicting edges, {} uncolored, {} multicolored",
                feasibility.conflicting_edges.len(),
                feasibility.uncolored_nodes.len(),
                feasibility.multicolored_nodes.len()
            );
        }

        Ok(PipelineOutcome {
            order,
            model_stats,
            report,
            feasibility,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::QColorError;
    use crate::sampler::ExactSampler;

    #[test]
    fn test_exact_pipeline_on_path() {
        let graph = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        let config = SolverConfig {
            num_colors: 2,
            num_reads: 4,
            ..SolverConfig::default()
        };
        let outcome = ColoringPipeline::new(config, ExactSampler::new())
            .unwrap()
            .run(&graph)
            .unwrap();

        assert!(outcome.feasibility.feasible);
        assert_eq!(outcome.model_stats.num_variables, 6);
        assert_eq!(outcome.report.energy, -6.0);
        let colors = outcome.vertex_colors().unwrap();
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
    }

    #[test]
    fn test_invalid_config_rejected_up_front() {
        let config = SolverConfig {
            num_colors: 0,
            ..SolverConfig::default()
        };
        let result = ColoringPipeline::new(config, ExactSampler::new());
        assert!(matches!(result, Err(QColorError::InvalidParameter(_))));
    }
}
