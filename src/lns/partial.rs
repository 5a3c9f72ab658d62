//! Tour under reconstruction.
//!
//! The skeleton is a closed sequence that always starts and ends at the
//! depot; nodes removed by a destroy step wait in `unassigned` until the
//! repair step inserts them again.

use crate::models::Tour;

/// A partially destroyed tour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialTour {
    skeleton: Vec<usize>,
    unassigned: Vec<usize>,
}

impl PartialTour {
    /// Creates a partial tour from a depot-terminated skeleton and a pool.
    pub(crate) fn new(skeleton: Vec<usize>, unassigned: Vec<usize>) -> Self {
        debug_assert!(skeleton.len() >= 2);
        debug_assert_eq!(skeleton.first(), skeleton.last());
        Self {
            skeleton,
            unassigned,
        }
    }

    /// Nodes currently routed, depot at both ends.
    pub fn skeleton(&self) -> &[usize] {
        &self.skeleton
    }

    /// Nodes waiting for reinsertion, in removal order.
    pub fn unassigned(&self) -> &[usize] {
        &self.unassigned
    }

    /// Number of insertion gaps (edges) in the skeleton.
    pub fn num_gaps(&self) -> usize {
        self.skeleton.len() - 1
    }

    /// Returns `true` once every node is routed again.
    pub fn is_complete(&self) -> bool {
        self.unassigned.is_empty()
    }

    /// Moves `unassigned[pool_index]` into gap `gap` (between skeleton
    /// positions `gap` and `gap + 1`).
    pub(crate) fn insert(&mut self, pool_index: usize, gap: usize) {
        let node = self.unassigned.remove(pool_index);
        self.skeleton.insert(gap + 1, node);
    }

    /// Writes the rebuilt sequence back into `tour`.
    pub(crate) fn commit(self, tour: &mut Tour) {
        debug_assert!(self.is_complete());
        tour.replace(self.skeleton);
    }
}
