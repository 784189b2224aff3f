//! Core data types: graphs, node orders and decoded colorings.

use crate::errors::{QColorError, Result};
use serde::{Deserialize, Serialize};

/// Vertex identifier inside a [`Graph`].
pub type VertexId = usize;

/// Undirected graph with adjacency-list structure.
///
/// Vertices are `0..num_vertices`. Self loops and repeated edges are dropped
/// on insertion, so every edge appears exactly once in each endpoint's list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    /// Number of vertices in the graph
    pub num_vertices: usize,

    /// Number of distinct undirected edges
    pub num_edges: usize,

    /// Adjacency list representation: vertex -> list of neighbors
    pub adjacency: Vec<Vec<VertexId>>,
}

impl Graph {
    /// Creates a new graph with `num_vertices` isolated vertices.
    pub fn new(num_vertices: usize) -> Self {
        Self {
            num_vertices,
            num_edges: 0,
            adjacency: vec![Vec::new(); num_vertices],
        }
    }

    /// Builds a graph from an edge list, dropping self loops and duplicates.
    ///
    /// Fails when an endpoint is outside `0..num_vertices`.
    pub fn from_edges(num_vertices: usize, edges: &[(VertexId, VertexId)]) -> Result<Self> {
        let mut graph = Self::new(num_vertices);
        for &(u, v) in edges {
            if u >= num_vertices || v >= num_vertices {
                return Err(QColorError::validation(format!(
                    "Edge ({}, {}) references a vertex outside [0, {})",
                    u, v, num_vertices
                )));
            }
            graph.add_edge(u, v);
        }
        Ok(graph)
    }

    /// Adds an undirected edge between two vertices.
    ///
    /// Returns `false` when the edge was ignored (out of range, self loop or
    /// already present).
    pub fn add_edge(&mut self, u: VertexId, v: VertexId) -> bool {
        if u >= self.num_vertices || v >= self.num_vertices || u == v {
            return false;
        }
        if self.adjacency[u].contains(&v) {
            return false;
        }
        self.adjacency[u].push(v);
        self.adjacency[v].push(u);
        self.num_edges += 1;
        true
    }

    /// Neighbors of `vertex`.
    pub fn neighbors(&self, vertex: VertexId) -> &[VertexId] {
        &self.adjacency[vertex]
    }

    /// Returns the degree of a vertex.
    pub fn degree(&self, vertex: VertexId) -> usize {
        self.adjacency[vertex].len()
    }

    /// Iterates every undirected edge once as `(u, v)` with `u < v`.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(u, neighbors)| {
                neighbors
                    .iter()
                    .filter(move |&&v| u < v)
                    .map(move |&v| (u, v))
            })
    }

    /// Graph density: |E| / (|V| * (|V| - 1) / 2)
    pub fn density(&self) -> f64 {
        if self.num_vertices <= 1 {
            return 0.0;
        }
        (2.0 * self.num_edges as f64) / (self.num_vertices * (self.num_vertices - 1)) as f64
    }
}

/// Fixed enumeration order over a graph's vertices.
///
/// Position `p` of a vertex determines its block of binary variables
/// `[p * K, (p + 1) * K)`. The same order value must be used to build the
/// model and to map decoded positions back to vertices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<VertexId>", into = "Vec<VertexId>")]
pub struct NodeOrder {
    vertices: Vec<VertexId>,
    positions: Vec<usize>,
}

impl NodeOrder {
    /// Identity order: vertex `v` sits at position `v`.
    pub fn natural(graph: &Graph) -> Self {
        let vertices: Vec<VertexId> = (0..graph.num_vertices).collect();
        Self {
            positions: vertices.clone(),
            vertices,
        }
    }

    /// Order given explicitly as the list of vertices by position.
    ///
    /// The list must be a permutation of `0..vertices.len()`.
    pub fn from_vertices(vertices: Vec<VertexId>) -> Result<Self> {
        let n = vertices.len();
        let mut positions = vec![usize::MAX; n];
        for (position, &vertex) in vertices.iter().enumerate() {
            if vertex >= n {
                return Err(QColorError::invalid_parameter(format!(
                    "Node order references vertex {} outside [0, {})",
                    vertex, n
                )));
            }
            if positions[vertex] != usize::MAX {
                return Err(QColorError::invalid_parameter(format!(
                    "Node order lists vertex {} twice",
                    vertex
                )));
            }
            positions[vertex] = position;
        }
        Ok(Self {
            vertices,
            positions,
        })
    }

    /// Number of ordered vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// 0-based rank of `vertex` in this order.
    pub fn position(&self, vertex: VertexId) -> usize {
        self.positions[vertex]
    }

    /// Vertex at `position`, if any.
    pub fn vertex_at(&self, position: usize) -> Option<VertexId> {
        self.vertices.get(position).copied()
    }

    /// Vertices in enumeration order.
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Checks that this order enumerates exactly the vertices of `graph`.
    pub fn ensure_matches(&self, graph: &Graph) -> Result<()> {
        if self.len() != graph.num_vertices {
            return Err(QColorError::invalid_parameter(format!(
                "Node order covers {} vertices but the graph has {}",
                self.len(),
                graph.num_vertices
            )));
        }
        Ok(())
    }
}

impl TryFrom<Vec<VertexId>> for NodeOrder {
    type Error = QColorError;

    fn try_from(vertices: Vec<VertexId>) -> Result<Self> {
        Self::from_vertices(vertices)
    }
}

impl From<NodeOrder> for Vec<VertexId> {
    fn from(order: NodeOrder) -> Self {
        order.vertices
    }
}

/// One decoded `(node position, color)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ColorAssignment {
    /// Node position in the [`NodeOrder`] used to build the model
    pub node: usize,
    /// Color index in `[0, num_colors)`
    pub color: usize,
}

/// A node whose variable block does not hold exactly one set bit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneColorViolation {
    /// Node position
    pub node: usize,
    /// Every color set for this node (empty when uncolored)
    pub colors: Vec<usize>,
}

impl OneColorViolation {
    pub fn is_uncolored(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Decoded coloring, ordered ascending by (node position, color).
///
/// A raw sample may leave nodes without a color or give them several; those
/// entries are kept as-is and surfaced through [`Coloring::violations`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coloring {
    /// Number of nodes covered by the decoded sample
    pub num_nodes: usize,
    /// Number of colors per node block
    pub num_colors: usize,
    /// Decoded pairs in ascending variable-index order
    pub assignments: Vec<ColorAssignment>,
}

impl Coloring {
    /// Pairs as plain `(node, color)` tuples.
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        self.assignments.iter().map(|a| (a.node, a.color)).collect()
    }

    /// Colors assigned to the node at `position`.
    pub fn colors_of(&self, position: usize) -> Vec<usize> {
        self.assignments
            .iter()
            .filter(|a| a.node == position)
            .map(|a| a.color)
            .collect()
    }

    /// Nodes with zero or more than one color, ascending by position.
    pub fn violations(&self) -> Vec<OneColorViolation> {
        let mut per_node: Vec<Vec<usize>> = vec![Vec::new(); self.num_nodes];
        for assignment in &self.assignments {
            if let Some(colors) = per_node.get_mut(assignment.node) {
                colors.push(assignment.color);
            }
        }
        per_node
            .into_iter()
            .enumerate()
            .filter(|(_, colors)| colors.len() != 1)
            .map(|(node, colors)| OneColorViolation { node, colors })
            .collect()
    }

    /// Number of nodes violating the one-color rule.
    pub fn violation_count(&self) -> usize {
        self.violations().len()
    }

    /// True when every node carries exactly one color.
    pub fn is_one_hot(&self) -> bool {
        self.assignments.len() == self.num_nodes && self.violation_count() == 0
    }

    /// Per-vertex colors (indexed by vertex id), or `None` if not one-hot.
    pub fn vertex_colors(&self, order: &NodeOrder) -> Option<Vec<usize>> {
        if !self.is_one_hot() || order.len() != self.num_nodes {
            return None;
        }
        let mut colors = vec![0; self.num_nodes];
        for assignment in &self.assignments {
            let vertex = order.vertex_at(assignment.node)?;
            colors[vertex] = assignment.color;
        }
        Some(colors)
    }

    /// Number of distinct colors in use.
    pub fn colors_used(&self) -> usize {
        let mut seen = vec![false; self.num_colors];
        for assignment in &self.assignments {
            if let Some(slot) = seen.get_mut(assignment.color) {
                *slot = true;
            }
        }
        seen.into_iter().filter(|&used| used).count()
    }
}
