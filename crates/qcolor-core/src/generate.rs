//! Random graph generation.

use crate::errors::{QColorError, Result};
use crate::types::Graph;
use rand::seq::index::sample;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Uniform random graph with exactly `num_edges` edges (the G(n, m) model).
///
/// Edges are drawn without replacement from all `n(n-1)/2` vertex pairs, so
/// the same seed always yields the same graph.
pub fn gnm_random_graph(num_vertices: usize, num_edges: usize, seed: u64) -> Result<Graph> {
    let max_edges = num_vertices.saturating_mul(num_vertices.saturating_sub(1)) / 2;
    if num_edges > max_edges {
        return Err(QColorError::validation(format!(
            "Cannot place {} edges on {} vertices (maximum {})",
            num_edges, num_vertices, max_edges
        )));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut graph = Graph::new(num_vertices);
    for pair in sample(&mut rng, max_edges, num_edges).into_vec() {
        let (u, v) = unrank_pair(pair, num_vertices);
        graph.add_edge(u, v);
    }

    log::debug!(
        "Generated G({}, {}) with seed {}: density {:.3}",
        num_vertices,
        num_edges,
        seed,
        graph.density()
    );
    Ok(graph)
}

/// Maps `rank` in `[0, n(n-1)/2)` to the pair `(u, v)`, `u < v`, in
/// row-major order of the strict upper triangle.
fn unrank_pair(mut rank: usize, n: usize) -> (usize, usize) {
    let mut u = 0;
    let mut row = n - 1;
    while rank >= row {
        rank -= row;
        u += 1;
        row -= 1;
    }
    (u, u + 1 + rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_count_and_determinism() {
        let a = gnm_random_graph(10, 15, 42).unwrap();
        let b = gnm_random_graph(10, 15, 42).unwrap();
        assert_eq!(a.num_vertices, 10);
        assert_eq!(a.num_edges, 15);
        assert_eq!(a, b);
    }

    #[test]
    fn test_complete_graph_when_saturated() {
        let graph = gnm_random_graph(5, 10, 1).unwrap();
        assert!((graph.density() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_too_many_edges() {
        assert!(gnm_random_graph(4, 7, 0).is_err());
        assert!(gnm_random_graph(0, 1, 0).is_err());
        assert_eq!(gnm_random_graph(0, 0, 0).unwrap().num_vertices, 0);
    }

    #[test]
    fn test_unrank_covers_upper_triangle() {
        let n = 5;
        let pairs: Vec<_> = (0..n * (n - 1) / 2).map(|r| unrank_pair(r, n)).collect();
        assert_eq!(pairs[0], (0, 1));
        assert_eq!(pairs[3], (0, 4));
        assert_eq!(pairs[4], (1, 2));
        assert_eq!(*pairs.last().unwrap(), (3, 4));
    }
}
