//! The trip-based profile search and its per-worker state.

pub mod labels;
pub mod parents;
pub mod profile;
pub mod reached;

pub use labels::{RouteLabel, TargetLabel, build_route_labels};
pub use profile::OneToAllProfile;
pub use reached::{ProfileReachedIndex, ReachedIndex};

use fixedbitset::FixedBitSet;

/// A set over a dense id range with insertion-ordered iteration and O(1)
/// membership, cleared in time proportional to its size.
#[derive(Debug, Clone)]
pub(crate) struct IndexedSet {
    marked: FixedBitSet,
    values: Vec<usize>,
}

impl IndexedSet {
    pub(crate) fn new(capacity: usize) -> Self {
        IndexedSet {
            marked: FixedBitSet::with_capacity(capacity),
            values: Vec::new(),
        }
    }

    pub(crate) fn insert(&mut self, value: usize) {
        if !self.marked.contains(value) {
            self.marked.set(value, true);
            self.values.push(value);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn get(&self, index: usize) -> usize {
        self.values[index]
    }

    pub(crate) fn sort(&mut self) {
        self.values.sort_unstable();
    }

    pub(crate) fn as_slice(&self) -> &[usize] {
        &self.values
    }

    pub(crate) fn clear(&mut self) {
        for &value in &self.values {
            self.marked.set(value, false);
        }
        self.values.clear();
    }
}
