//! # qcolor-core
//!
//! Graph coloring as a Quadratic Unconstrained Binary Optimization problem.
//!
//! ## Pipeline
//! ```text
//! Graph + NodeOrder + K ──► build_coloring_qubo ──► QuboModel
//!                                                      │
//!                               Sampler (N reads) ◄────┘
//!                                      │
//!                  SampleSet::aggregate / lowest ──► decode ──► Coloring
//! ```
//!
//! Variable `p * K + c` is set when the node at position `p` takes color `c`.
//! The [`NodeOrder`] that fixes positions is an explicit value: build the
//! model and interpret the coloring with the same one.
//!
//! ## Example
//! ```
//! use qcolor_core::{build_coloring_qubo, ColoringSolver, ExactSampler, Graph, NodeOrder, PenaltyWeights};
//!
//! let graph = Graph::from_edges(3, &[(0, 1), (1, 2), (0, 2)])?;
//! let order = NodeOrder::natural(&graph);
//! let model = build_coloring_qubo(&graph, &order, 3, PenaltyWeights::default())?;
//! let coloring = ColoringSolver::new(ExactSampler::new()).solve(&model, 3, 10)?;
//! assert!(coloring.is_one_hot());
//! # Ok::<(), qcolor_core::QColorError>(())
//! ```

pub mod config;
pub mod errors;
pub mod extract;
pub mod generate;
pub mod indexer;
pub mod io;
pub mod pipeline;
pub mod qubo;
pub mod sampler;
pub mod sampleset;
pub mod solver;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use config::SolverConfig;
pub use errors::{QColorError, Result};
pub use extract::decode;
pub use generate::gnm_random_graph;
pub use indexer::VariableIndexer;
pub use io::{read_graph_from_file, GraphFormat};
pub use pipeline::{ColoringPipeline, PipelineOutcome};
pub use qubo::{build_coloring_qubo, PenaltyWeights, QuboModel, QuboStats};
pub use sampler::{AnnealingConfig, ExactSampler, Sample, Sampler, SimulatedAnnealingSampler};
pub use sampleset::{SampleEntry, SampleSet};
pub use solver::{ColoringSolver, SolveReport, DEFAULT_NUM_READS};
pub use types::{ColorAssignment, Coloring, Graph, NodeOrder, OneColorViolation, VertexId};
pub use validation::{check_feasibility, FeasibilityReport};
