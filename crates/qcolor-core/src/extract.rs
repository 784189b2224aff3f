//! Decoding of binary assignments into colorings.

use crate::errors::{QColorError, Result};
use crate::indexer::VariableIndexer;
use crate::types::{ColorAssignment, Coloring};

/// Decodes `assignment` into `(node position, color)` pairs.
///
/// Every set bit `i` yields `(i / num_colors, i % num_colors)`, in ascending
/// `i`. Nodes with zero or several set bits are passed through unchanged.
pub fn decode(assignment: &[u8], num_colors: usize) -> Result<Coloring> {
    if num_colors < 1 {
        return Err(QColorError::invalid_parameter(format!(
            "num_colors must be >= 1, got {}",
            num_colors
        )));
    }
    if assignment.len() % num_colors != 0 {
        return Err(QColorError::invalid_parameter(format!(
            "assignment of {} variables is not a whole number of {}-color blocks",
            assignment.len(),
            num_colors
        )));
    }

    let indexer = VariableIndexer::new(assignment.len() / num_colors, num_colors);
    let assignments = assignment
        .iter()
        .enumerate()
        .filter(|(_, value)| **value == 1)
        .map(|(i, _)| {
            let (node, color) = indexer.decompose(i);
            ColorAssignment { node, color }
        })
        .collect();

    Ok(Coloring {
        num_nodes: indexer.num_nodes(),
        num_colors,
        assignments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_one_hot() {
        let coloring = decode(&[0, 1, 0, 1, 0, 0, 0, 0, 1], 3).unwrap();
        assert_eq!(coloring.pairs(), vec![(0, 1), (1, 0), (2, 2)]);
        assert_eq!(coloring.num_nodes, 3);
        assert!(coloring.is_one_hot());
    }

    #[test]
    fn test_decode_keeps_violations() {
        // Node 0 has two colors, node 1 none
        let coloring = decode(&[1, 1, 0, 0], 2).unwrap();
        assert_eq!(coloring.pairs(), vec![(0, 0), (0, 1)]);
        assert_eq!(coloring.violation_count(), 2);
    }

    #[test]
    fn test_decode_rejects_bad_shapes() {
        assert!(matches!(
            decode(&[1, 0], 0),
            Err(QColorError::InvalidParameter(_))
        ));
        assert!(matches!(
            decode(&[1, 0, 0], 2),
            Err(QColorError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_decode_empty() {
        let coloring = decode(&[], 4).unwrap();
        assert_eq!(coloring.num_nodes, 0);
        assert!(coloring.assignments.is_empty());
        assert!(coloring.is_one_hot());
    }
}
