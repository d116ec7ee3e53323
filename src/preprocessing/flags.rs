//! The per-cell edge flag matrix produced by the preprocessing sweep.

use std::path::Path;

use fixedbitset::FixedBitSet;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::EdgeId;

/// One bit per (split-graph edge, partition cell).
///
/// Bits only ever go from 0 to 1 during preprocessing, so merging
/// per-worker matrices is an order-independent union.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeFlags {
    num_edges: usize,
    flags: Vec<FixedBitSet>,
}

impl EdgeFlags {
    pub fn new(num_edges: usize, cells: usize) -> Self {
        EdgeFlags {
            num_edges,
            flags: (0..cells)
                .map(|_| FixedBitSet::with_capacity(num_edges))
                .collect(),
        }
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn cells(&self) -> usize {
        self.flags.len()
    }

    pub fn set(&mut self, edge: EdgeId, cell: usize) {
        self.flags[cell].set(edge, true);
    }

    pub fn is_set(&self, edge: EdgeId, cell: usize) -> bool {
        self.flags[cell].contains(edge)
    }

    /// Number of flagged edges in `cell`.
    pub fn count_ones(&self, cell: usize) -> usize {
        self.flags[cell].count_ones(..)
    }

    /// ORs another worker's flags into this matrix.
    pub fn union_with(&mut self, other: &EdgeFlags) {
        debug_assert_eq!(self.num_edges, other.num_edges);
        debug_assert_eq!(self.cells(), other.cells());
        for (mine, theirs) in self.flags.iter_mut().zip(&other.flags) {
            mine.union_with(theirs);
        }
    }

    pub fn merged(mut self, other: EdgeFlags) -> Self {
        self.union_with(&other);
        self
    }

    pub fn save(&self, path: &Path) -> Result<(), Error> {
        crate::binary::save_to(self, path)
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        crate::binary::load_from(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_is_monotone_and_idempotent() {
        let mut a = EdgeFlags::new(8, 2);
        a.set(3, 0);
        a.set(5, 1);
        let mut b = EdgeFlags::new(8, 2);
        b.set(3, 0);
        b.set(6, 1);

        let mut merged = a.clone();
        merged.union_with(&b);
        assert!(merged.is_set(3, 0));
        assert!(merged.is_set(5, 1));
        assert!(merged.is_set(6, 1));
        assert_eq!(merged.count_ones(0), 1);
        assert_eq!(merged.count_ones(1), 2);

        let again = merged.clone().merged(a);
        assert_eq!(again, merged);
    }
}
