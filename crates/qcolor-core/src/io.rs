//! Graph file readers.
//!
//! ## DIMACS (`.col`)
//! - Lines starting with 'c' are comments (ignored)
//! - Line starting with 'p edge N M' declares N vertices and M edges
//! - Lines starting with 'e U V' declare an edge between vertices U and V (1-indexed)
//!
//! ## Edge list (`.txt`, `.edges`)
//! - One `U V` pair per line, 0-indexed
//! - `#` starts a comment; blank lines are skipped
//! - Vertex count is the largest id + 1
//!
//! ```text
//! c Triangle graph example
//! p edge 3 3
//! e 1 2
//! e 2 3
//! e 1 3
//! ```

use crate::errors::{QColorError, Result};
use crate::types::{Graph, VertexId};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Supported graph file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphFormat {
    Dimacs,
    EdgeList,
}

impl GraphFormat {
    /// Guesses the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        ext.parse().ok()
    }
}

impl FromStr for GraphFormat {
    type Err = QColorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dimacs" | "col" => Ok(GraphFormat::Dimacs),
            "edgelist" | "edge-list" | "edges" | "txt" => Ok(GraphFormat::EdgeList),
            other => Err(QColorError::config(format!(
                "Unknown graph format '{}': expected 'dimacs' or 'edgelist'",
                other
            ))),
        }
    }
}

/// Reads a graph file in the given format.
pub fn read_graph_from_file<P: AsRef<Path>>(path: P, format: GraphFormat) -> Result<Graph> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        QColorError::IoError(std::io::Error::new(
            e.kind(),
            format!("Failed to read graph file '{}': {}", path.display(), e),
        ))
    })?;

    let graph = match format {
        GraphFormat::Dimacs => parse_dimacs(&content)?,
        GraphFormat::EdgeList => parse_edge_list(&content)?,
    };

    log::info!(
        "Loaded {} ({:?}): {} vertices, {} edges",
        path.display(),
        format,
        graph.num_vertices,
        graph.num_edges
    );
    Ok(graph)
}

/// Helper to create a validation error tagged with a line number.
fn parse_error(line_num: usize, message: impl std::fmt::Display) -> QColorError {
    QColorError::validation(format!("line {}: {}", line_num + 1, message))
}

fn parse_vertex(token: &str, line_num: usize) -> Result<usize> {
    token.parse::<usize>().map_err(|_| {
        parse_error(
            line_num,
            format!("invalid vertex ID '{}': must be a non-negative integer", token),
        )
    })
}

/// Parses DIMACS `.col` content.
pub fn parse_dimacs(content: &str) -> Result<Graph> {
    let mut header: Option<(usize, usize)> = None;
    let mut edges: Vec<(VertexId, VertexId)> = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('c') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0] {
            "p" => {
                if parts.len() < 4 {
                    return Err(parse_error(
                        line_num,
                        format!("expected 'p edge N M', got '{}'", line),
                    ));
                }
                if parts[1] != "edge" && parts[1] != "col" {
                    return Err(parse_error(
                        line_num,
                        format!("unsupported problem type '{}'", parts[1]),
                    ));
                }
                let n = parse_vertex(parts[2], line_num)?;
                let m = parse_vertex(parts[3], line_num)?;
                header = Some((n, m));
            }
            "e" => {
                let (n, _) = header.ok_or_else(|| {
                    parse_error(line_num, "edge definition before problem line")
                })?;
                if parts.len() < 3 {
                    return Err(parse_error(
                        line_num,
                        format!("expected 'e U V', got '{}'", line),
                    ));
                }
                let u = parse_vertex(parts[1], line_num)?;
                let v = parse_vertex(parts[2], line_num)?;
                for id in [u, v] {
                    if id == 0 || id > n {
                        return Err(parse_error(
                            line_num,
                            format!("vertex ID {} out of range [1, {}]", id, n),
                        ));
                    }
                }
                edges.push((u - 1, v - 1));
            }
            other => {
                log::debug!(
                    "Ignoring unknown DIMACS line type '{}' at line {}",
                    other,
                    line_num + 1
                );
            }
        }
    }

    let (num_vertices, declared_edges) = header.ok_or_else(|| {
        QColorError::validation("No problem line found in DIMACS file (expected 'p edge N M')")
    })?;

    let graph = build_graph(num_vertices, &edges);
    if graph.num_edges != declared_edges {
        log::warn!(
            "DIMACS file declared {} edges but actual edge count is {} (after deduplication)",
            declared_edges,
            graph.num_edges
        );
    }
    Ok(graph)
}

/// Parses a whitespace-separated, 0-indexed edge list.
pub fn parse_edge_list(content: &str) -> Result<Graph> {
    let mut edges: Vec<(VertexId, VertexId)> = Vec::new();
    let mut num_vertices = 0;

    for (line_num, raw) in content.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 2 {
            return Err(parse_error(
                line_num,
                format!("expected 'U V', got '{}'", line),
            ));
        }
        let u = parse_vertex(parts[0], line_num)?;
        let v = parse_vertex(parts[1], line_num)?;
        let upper = u.max(v).checked_add(1).ok_or_else(|| {
            parse_error(line_num, format!("vertex ID {} is too large", u.max(v)))
        })?;
        num_vertices = num_vertices.max(upper);
        edges.push((u, v));
    }

    Ok(build_graph(num_vertices, &edges))
}

fn build_graph(num_vertices: usize, edges: &[(VertexId, VertexId)]) -> Graph {
    let mut graph = Graph::new(num_vertices);
    for &(u, v) in edges {
        if u == v {
            log::warn!("Skipping self-loop edge ({}, {})", u, v);
            continue;
        }
        graph.add_edge(u, v);
    }
    graph
}
