//! qcolor CLI entry point.
//!
//! Loads or generates a graph, encodes K-coloring as a QUBO, samples it and
//! reports the best coloring found.

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use config::QColorConfig;
use qcolor_core::{
    gnm_random_graph, read_graph_from_file, ColoringPipeline, ExactSampler, Graph, GraphFormat,
    PipelineOutcome, Sampler, SimulatedAnnealingSampler,
};
use serde::Serialize;
use std::path::Path;

/// qcolor version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "qcolor")]
#[command(version = VERSION)]
#[command(about = "Graph coloring via QUBO sampling", long_about = None)]
struct Args {
    /// Input graph file (DIMACS .col or edge list); a random graph is generated when omitted
    #[arg(short, long)]
    input: Option<String>,

    /// Input format: dimacs or edgelist (inferred from the extension by default)
    #[arg(long)]
    format: Option<String>,

    /// Number of vertices of the generated graph
    #[arg(long)]
    nodes: Option<usize>,

    /// Number of edges of the generated graph
    #[arg(long)]
    edges: Option<usize>,

    /// Number of colors (K)
    #[arg(short = 'k', long)]
    colors: Option<usize>,

    /// Number of independent sampler reads
    #[arg(short, long)]
    reads: Option<usize>,

    /// Annealing sweeps per read
    #[arg(long)]
    sweeps: Option<usize>,

    /// Seed for graph generation and the sampler
    #[arg(long)]
    seed: Option<u64>,

    /// One-color penalty weight (A)
    #[arg(long)]
    a_coefficient: Option<f64>,

    /// Adjacency penalty weight (B)
    #[arg(long)]
    b_coefficient: Option<f64>,

    /// TOML configuration file
    ///
    /// Example: --config configs/default.toml
    #[arg(short, long)]
    config: Option<String>,

    /// Write a JSON report to this path
    #[arg(short, long)]
    output: Option<String>,

    /// Use the brute-force exact sampler (small graphs only)
    #[arg(long)]
    exact: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// JSON report written with `--output`.
#[derive(Serialize)]
struct RunReport<'a> {
    version: &'a str,
    timestamp: String,
    graph_source: String,
    num_vertices: usize,
    num_edges: usize,
    density: f64,
    config: &'a QColorConfig,
    outcome: &'a PipelineOutcome,
    vertex_colors: Option<Vec<usize>>,
}

/// Command-line flags take precedence over the configuration file.
fn resolve_config(args: &Args) -> Result<QColorConfig> {
    let mut config = match args.config {
        Some(ref path) => QColorConfig::from_file(path)?,
        None => QColorConfig::default(),
    };

    if let Some(ref input) = args.input {
        config.graph.input = Some(input.clone());
    }
    if let Some(ref format) = args.format {
        config.graph.format = Some(format.clone());
    }
    if let Some(nodes) = args.nodes {
        config.graph.nodes = nodes;
    }
    if let Some(edges) = args.edges {
        config.graph.edges = edges;
    }
    if let Some(colors) = args.colors {
        config.solver.num_colors = colors;
    }
    if let Some(reads) = args.reads {
        config.solver.num_reads = reads;
    }
    if let Some(sweeps) = args.sweeps {
        config.solver.annealing.num_sweeps = sweeps;
    }
    if let Some(seed) = args.seed {
        config.graph.seed = seed;
        config.solver.annealing.seed = Some(seed);
    }
    if let Some(a) = args.a_coefficient {
        config.solver.penalties.a = a;
    }
    if let Some(b) = args.b_coefficient {
        config.solver.penalties.b = b;
    }
    if let Some(ref output) = args.output {
        config.output.report_path = Some(output.clone());
    }

    config.validate()?;
    Ok(config)
}

/// Converts core errors into their user-facing form.
fn core<T>(result: qcolor_core::Result<T>) -> Result<T> {
    result.map_err(|e| anyhow::anyhow!(e.user_message()))
}

fn load_graph(config: &QColorConfig) -> Result<(Graph, String)> {
    match config.graph.input {
        Some(ref input) => {
            let path = Path::new(input);
            let format = match config.graph.format {
                Some(ref name) => core(name.parse::<GraphFormat>())?,
                None => GraphFormat::from_path(path).with_context(|| {
                    format!(
                        "Cannot infer graph format of '{}'; pass --format dimacs|edgelist",
                        input
                    )
                })?,
            };
            let graph = core(read_graph_from_file(path, format))?;
            Ok((graph, input.clone()))
        }
        None => {
            let graph = core(gnm_random_graph(
                config.graph.nodes,
                config.graph.edges,
                config.graph.seed,
            ))?;
            let source = format!(
                "gnm(n={}, m={}, seed={})",
                config.graph.nodes, config.graph.edges, config.graph.seed
            );
            Ok((graph, source))
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = resolve_config(args)?;
    let (graph, source) = load_graph(&config)?;

    log::info!(
        "Graph {}: {} vertices, {} edges (density {:.3})",
        source,
        graph.num_vertices,
        graph.num_edges,
        graph.density()
    );
    log::info!(
        "Solver: K={}, reads={}, A={}, B={}, sampler={}",
        config.solver.num_colors,
        config.solver.num_reads,
        config.solver.penalties.a,
        config.solver.penalties.b,
        if args.exact { "exact" } else { "simulated-annealing" }
    );

    let sampler: Box<dyn Sampler> = if args.exact {
        Box::new(ExactSampler::new())
    } else {
        Box::new(core(SimulatedAnnealingSampler::new(
            config.solver.annealing.clone(),
        ))?)
    };

    let pipeline = core(ColoringPipeline::new(config.solver.clone(), sampler))?;
    let outcome = core(pipeline.run(&graph))?;

    log::info!("=== Results Summary ===");
    log::info!(
        "Energy {:.4}, found {}x in {} reads ({} distinct)",
        outcome.report.energy,
        outcome.report.num_occurrences,
        outcome.report.num_reads,
        outcome.report.distinct_samples
    );
    let vertex_colors = outcome.vertex_colors();
    match vertex_colors {
        Some(ref colors) if outcome.feasibility.feasible => {
            for (vertex, color) in colors.iter().enumerate() {
                log::info!("  vertex {} -> color {}", vertex, color);
            }
        }
        _ => {
            log::warn!(
                "Coloring is infeasible ({} violations); try more reads or colors",
                outcome.feasibility.num_violations()
            );
            for assignment in &outcome.report.coloring.assignments {
                log::debug!(
                    "  position {} -> color {}",
                    assignment.node,
                    assignment.color
                );
            }
        }
    }

    if let Some(ref path) = config.output.report_path {
        let report = RunReport {
            version: VERSION,
            timestamp: chrono::Utc::now().to_rfc3339(),
            graph_source: source,
            num_vertices: graph.num_vertices,
            num_edges: graph.num_edges,
            density: graph.density(),
            config: &config,
            outcome: &outcome,
            vertex_colors,
        };
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report to '{}'", path))?;
        log::info!("Report written to: {}", path);
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logger
    if args.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    log::info!("qcolor {} - Starting", VERSION);
    run(&args)
}
