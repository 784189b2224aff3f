//! Feasibility checks for decoded colorings.

use crate::errors::{QColorError, Result};
use crate::types::{Coloring, Graph, NodeOrder, VertexId};
use serde::{Deserialize, Serialize};

/// Result of checking a coloring against its graph.
///
/// Vertices are reported by id, translated through the node order used to
/// build the model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeasibilityReport {
    /// Every vertex has exactly one color and no edge is monochromatic
    pub feasible: bool,
    /// Vertices without any color
    pub uncolored_nodes: Vec<VertexId>,
    /// Vertices with more than one color
    pub multicolored_nodes: Vec<VertexId>,
    /// Edges `(u, v)`, `u < v`, whose endpoints share a color
    pub conflicting_edges: Vec<(VertexId, VertexId)>,
}

impl FeasibilityReport {
    pub fn num_violations(&self) -> usize {
        self.uncolored_nodes.len()
            + self.multicolored_nodes.len()
            + self.conflicting_edges.len()
    }
}

/// Checks `coloring` against `graph`.
///
/// A multicolored vertex conflicts with a neighbor if any of their colors
/// coincide.
pub fn check_feasibility(
    graph: &Graph,
    order: &NodeOrder,
    coloring: &Coloring,
) -> Result<FeasibilityReport> {
    order.ensure_matches(graph)?;
    if coloring.num_nodes != order.len() {
        return Err(QColorError::invalid_parameter(format!(
            "Coloring covers {} nodes but the node order has {}",
            coloring.num_nodes,
            order.len()
        )));
    }

    let mut vertex_colors: Vec<Vec<usize>> = vec![Vec::new(); graph.num_vertices];
    for assignment in &coloring.assignments {
        let vertex = order.vertex_at(assignment.node).ok_or_else(|| {
            QColorError::invalid_parameter(format!(
                "Coloring references node position {} outside [0, {})",
                assignment.node,
                order.len()
            ))
        })?;
        vertex_colors[vertex].push(assignment.color);
    }

    let mut report = FeasibilityReport::default();
    for (vertex, colors) in vertex_colors.iter().enumerate() {
        match colors.len() {
            0 => report.uncolored_nodes.push(vertex),
            1 => {}
            _ => report.multicolored_nodes.push(vertex),
        }
    }

    for (u, v) in graph.edges() {
        if vertex_colors[u].iter().any(|c| vertex_colors[v].contains(c)) {
            report.conflicting_edges.push((u, v));
        }
    }

    report.feasible = report.num_violations() == 0;
    Ok(report)
}
