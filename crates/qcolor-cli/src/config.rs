//! qcolor configuration file.
//!
//! Serde-based TOML configuration. Every section is optional; command-line
//! flags override whatever the file sets.
//!
//! ```toml
//! [solver]
//! num_colors = 4
//! num_reads = 100
//!
//! [solver.penalties]
//! a = 2.0
//! b = 1.0
//!
//! [solver.annealing]
//! num_sweeps = 2000
//! seed = 7
//!
//! [graph]
//! nodes = 12
//! edges = 20
//!
//! [output]
//! report_path = "coloring.json"
//! ```

use anyhow::{Context, Result};
use qcolor_core::{GraphFormat, SolverConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QColorConfig {
    #[serde(default)]
    pub solver: SolverConfig,

    #[serde(default)]
    pub graph: GraphConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl QColorConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(ref format) = self.graph.format {
            format
                .parse::<GraphFormat>()
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
        }
        Ok(())
    }
}

// =============================================================================
// Graph Source
// =============================================================================

/// Either a graph file or a random G(n, m) graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Graph file; when unset a random graph is generated
    #[serde(default)]
    pub input: Option<String>,

    /// File format ("dimacs" or "edgelist"); inferred from the extension if unset
    #[serde(default)]
    pub format: Option<String>,

    #[serde(default = "default_nodes")]
    pub nodes: usize,

    #[serde(default = "default_edges")]
    pub edges: usize,

    /// Generator seed
    #[serde(default)]
    pub seed: u64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            input: None,
            format: None,
            nodes: default_nodes(),
            edges: default_edges(),
            seed: 0,
        }
    }
}

fn default_nodes() -> usize {
    8
}

fn default_edges() -> usize {
    12
}

// =============================================================================
// Output
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// JSON report destination
    #[serde(default)]
    pub report_path: Option<String>,
}
