//! Mapping between `(node position, color)` pairs and flat variable indices.
//!
//! Node position `p` owns the contiguous block `[p * K, (p + 1) * K)`, so
//! `index(p, c) = p * K + c` is a bijection onto `[0, n * K)`.

/// Variable layout for `num_nodes` nodes with `num_colors` colors each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableIndexer {
    num_nodes: usize,
    num_colors: usize,
}

impl VariableIndexer {
    /// `num_colors` must be at least 1; callers validate before constructing.
    pub fn new(num_nodes: usize, num_colors: usize) -> Self {
        debug_assert!(num_colors >= 1);
        Self {
            num_nodes,
            num_colors,
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn num_colors(&self) -> usize {
        self.num_colors
    }

    /// Total number of binary variables.
    pub fn num_variables(&self) -> usize {
        self.num_nodes * self.num_colors
    }

    #[inline]
    pub fn index(&self, position: usize, color: usize) -> usize {
        debug_assert!(color < self.num_colors);
        position * self.num_colors + color
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn decompose(&self, index: usize) -> (usize, usize) {
        (index / self.num_colors, index % self.num_colors)
    }

    /// Variable indices belonging to the node at `position`.
    pub fn block(&self, position: usize) -> std::ops::Range<usize> {
        let start = position * self.num_colors;
        start..start + self.num_colors
    }
}
