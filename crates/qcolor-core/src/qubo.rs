//! QUBO model and the graph-coloring builder.
//!
//! ## Formulation
//! For node position `p` and colors `0..K`:
//! ```text
//! one-color:  x(p,c) -> -A            for every c
//!             x(p,c1) x(p,c2) -> 2A    for every c1 < c2
//! adjacency:  x(p,c) x(p',c) -> B      for every edge with p < p', every c
//! ```
//! A node block costs `-A` with exactly one bit set and more otherwise, and
//! every monochromatic edge adds `B`.

use crate::errors::{QColorError, Result};
use crate::indexer::VariableIndexer;
use crate::types::{Graph, NodeOrder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Penalty weights of the coloring formulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenaltyWeights {
    /// One-color constraint weight (A)
    #[serde(default = "default_a")]
    pub a: f64,
    /// Adjacency constraint weight (B)
    #[serde(default = "default_b")]
    pub b: f64,
}

fn default_a() -> f64 {
    2.0
}

fn default_b() -> f64 {
    1.0
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            a: default_a(),
            b: default_b(),
        }
    }
}

impl PenaltyWeights {
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// Both weights must be positive and finite.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("a_coefficient", self.a), ("b_coefficient", self.b)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(QColorError::invalid_parameter(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Sparse QUBO over `num_variables` binary variables.
///
/// Keys are normalized to `(i, j)` with `i <= j`; `(i, i)` is a linear term.
/// Setting a key that already exists overwrites it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuboModel {
    num_variables: usize,
    terms: BTreeMap<(usize, usize), f64>,
}

/// Term counts of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuboStats {
    pub num_variables: usize,
    pub num_linear: usize,
    pub num_quadratic: usize,
}

impl QuboModel {
    /// Creates a model with no terms.
    pub fn new(num_variables: usize) -> Self {
        Self {
            num_variables,
            terms: BTreeMap::new(),
        }
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    /// Sets the coefficient of the unordered pair `{i, j}`.
    ///
    /// # Panics
    /// Panics if either index is outside `0..num_variables`.
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        assert!(
            i < self.num_variables && j < self.num_variables,
            "variable ({}, {}) outside model of {} variables",
            i,
            j,
            self.num_variables
        );
        self.terms.insert(normalize(i, j), value);
    }

    /// Coefficient of `{i, j}` (0 when absent).
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.terms.get(&normalize(i, j)).copied().unwrap_or(0.0)
    }

    /// All terms in key order.
    pub fn terms(&self) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
        self.terms.iter().map(|(&key, &value)| (key, value))
    }

    /// Linear terms as `(variable, bias)`.
    pub fn linear(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.terms
            .iter()
            .filter(|((i, j), _)| i == j)
            .map(|(&(i, _), &value)| (i, value))
    }

    /// Quadratic terms as `((i, j), coupling)` with `i < j`.
    pub fn quadratic(&self) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
        self.terms
            .iter()
            .filter(|((i, j), _)| i != j)
            .map(|(&key, &value)| (key, value))
    }

    pub fn stats(&self) -> QuboStats {
        let num_linear = self.linear().count();
        QuboStats {
            num_variables: self.num_variables,
            num_linear,
            num_quadratic: self.terms.len() - num_linear,
        }
    }

    /// Dense linear biases, indexed by variable.
    pub fn linear_biases(&self) -> Vec<f64> {
        let mut biases = vec![0.0; self.num_variables];
        for (i, value) in self.linear() {
            biases[i] = value;
        }
        biases
    }

    /// Per-variable quadratic couplings, each pair listed from both sides.
    pub fn neighborhoods(&self) -> Vec<Vec<(usize, f64)>> {
        let mut neighborhoods = vec![Vec::new(); self.num_variables];
        for ((i, j), value) in self.quadratic() {
            neighborhoods[i].push((j, value));
            neighborhoods[j].push((i, value));
        }
        neighborhoods
    }

    /// Objective value of a 0/1 assignment.
    pub fn energy(&self, assignment: &[u8]) -> Result<f64> {
        if assignment.len() != self.num_variables {
            return Err(QColorError::invalid_parameter(format!(
                "Assignment has {} variables, model has {}",
                assignment.len(),
                self.num_variables
            )));
        }
        Ok(self
            .terms
            .iter()
            .filter(|((i, j), _)| assignment[*i] != 0 && assignment[*j] != 0)
            .map(|(_, &value)| value)
            .sum())
    }
}

#[inline]
fn normalize(i: usize, j: usize) -> (usize, usize) {
    if i <= j {
        (i, j)
    } else {
        (j, i)
    }
}

/// Builds the coloring QUBO for `graph` enumerated by `order`.
///
/// ## Errors
/// - `InvalidParameter` if `num_colors < 1`, a weight is not positive, or
///   `order` does not cover the graph's vertices.
pub fn build_coloring_qubo(
    graph: &Graph,
    order: &NodeOrder,
    num_colors: usize,
    penalties: PenaltyWeights,
) -> Result<QuboModel> {
    if num_colors < 1 {
        return Err(QColorError::invalid_parameter(format!(
            "num_colors must be >= 1, got {}",
            num_colors
        )));
    }
    penalties.validate()?;
    order.ensure_matches(graph)?;

    let indexer = VariableIndexer::new(order.len(), num_colors);
    let mut model = QuboModel::new(indexer.num_variables());

    for (position, &vertex) in order.vertices().iter().enumerate() {
        // One-color constraint
        for color in 0..num_colors {
            let var = indexer.index(position, color);
            model.set(var, var, -penalties.a);
            for other in color + 1..num_colors {
                model.set(var, indexer.index(position, other), 2.0 * penalties.a);
            }
        }

        // Adjacency constraint, from the lower-position endpoint only
        for &neighbor in graph.neighbors(vertex) {
            let neighbor_position = order.position(neighbor);
            if neighbor_position > position {
                for color in 0..num_colors {
                    model.set(
                        indexer.index(position, color),
                        indexer.index(neighbor_position, color),
                        penalties.b,
                    );
                }
            }
        }
    }

    let stats = model.stats();
    log::debug!(
        "Built coloring QUBO: {} nodes, {} edges, {} colors -> {} variables, {} linear, {} quadratic",
        graph.num_vertices,
        graph.num_edges,
        num_colors,
        stats.num_variables,
        stats.num_linear,
        stats.num_quadratic
    );

    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(graph: &Graph, k: usize) -> QuboModel {
        build_coloring_qubo(graph, &NodeOrder::natural(graph), k, PenaltyWeights::default())
            .unwrap()
    }

    fn quadratic_map(model: &QuboModel) -> BTreeMap<(usize, usize), f64> {
        model.quadratic().collect()
    }

    #[test]
    fn test_single_node() {
        let graph = Graph::new(1);
        let model = build(&graph, 3);

        let linear: Vec<_> = model.linear().collect();
        assert_eq!(linear, vec![(0, -2.0), (1, -2.0), (2, -2.0)]);

        let expected: BTreeMap<_, _> =
            [((0, 1), 4.0), ((0, 2), 4.0), ((1, 2), 4.0)].into_iter().collect();
        assert_eq!(quadratic_map(&model), expected);
    }

    #[test]
    fn test_two_nodes_one_edge() {
        let graph = Graph::from_edges(2, &[(0, 1)]).unwrap();
        let model = build(&graph, 2);

        assert_eq!(model.num_variables(), 4);
        assert!(model.linear().all(|(_, bias)| bias == -2.0));
        assert_eq!(model.linear().count(), 4);

        let expected: BTreeMap<_, _> = [
            ((0, 1), 4.0),
            ((2, 3), 4.0),
            ((0, 2), 1.0),
            ((1, 3), 1.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(quadratic_map(&model), expected);
    }

    #[test]
    fn test_set_overwrites_unordered_pair() {
        let mut model = QuboModel::new(3);
        model.set(2, 0, 1.0);
        model.set(0, 2, 5.0);
        assert_eq!(model.get(2, 0), 5.0);
        assert_eq!(model.stats().num_quadratic, 1);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let graph = Graph::new(2);
        let order = NodeOrder::natural(&graph);
        let zero_colors = build_coloring_qubo(&graph, &order, 0, PenaltyWeights::default());
        assert!(matches!(zero_colors, Err(QColorError::InvalidParameter(_))));

        for weights in [
            PenaltyWeights::new(0.0, 1.0),
            PenaltyWeights::new(2.0, -1.0),
            PenaltyWeights::new(f64::NAN, 1.0),
        ] {
            let result = build_coloring_qubo(&graph, &order, 2, weights);
            assert!(matches!(result, Err(QColorError::InvalidParameter(_))));
        }
    }

    #[test]
    fn test_energy_of_one_hot_blocks() {
        let graph = Graph::from_edges(2, &[(0, 1)]).unwrap();
        let model = build(&graph, 2);

        // Distinct colors: two blocks at -A each
        assert_eq!(model.energy(&[1, 0, 0, 1]).unwrap(), -4.0);
        // Same color: adds B
        assert_eq!(model.energy(&[1, 0, 1, 0]).unwrap(), -3.0);
        // Both colors on node 0: -2A + 2A, node 1 uncolored
        assert_eq!(model.energy(&[1, 1, 0, 0]).unwrap(), 0.0);
        assert!(model.energy(&[1, 0]).is_err());
    }

    #[test]
    fn test_neighborhoods_are_symmetric() {
        let graph = Graph::from_edges(2, &[(0, 1)]).unwrap();
        let model = build(&graph, 2);
        let neighborhoods = model.neighborhoods();
        assert!(neighborhoods[0].contains(&(1, 4.0)));
        assert!(neighborhoods[1].contains(&(0, 4.0)));
        assert!(neighborhoods[2].contains(&(0, 1.0)));
        assert_eq!(model.linear_biases(), vec![-2.0; 4]);
    }
}
