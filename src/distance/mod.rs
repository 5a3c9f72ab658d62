//! Distance queries.
//!
//! Engines read costs through [`DistanceOracle`]; [`DistanceMatrix`] is the
//! dense implementation used throughout the crate.

mod matrix;

pub use matrix::DistanceMatrix;

/// Read-only mapping `(i, j) → cost` over a fixed set of nodes.
///
/// The oracle must not change while an engine holds it.
pub trait DistanceOracle {
    /// Number of nodes covered.
    fn size(&self) -> usize;

    /// Cost of travelling from `from` to `to`.
    fn get(&self, from: usize, to: usize) -> f64;

    /// Cheapest arc leaving `from`, ignoring the self-loop.
    ///
    /// Returns `None` for a single-node oracle.
    fn min_outgoing(&self, from: usize) -> Option<f64> {
        (0..self.size())
            .filter(|&to| to != from)
            .map(|to| self.get(from, to))
            .min_by(f64::total_cmp)
    }
}

impl<T: DistanceOracle + ?Sized> DistanceOracle for &T {
    fn size(&self) -> usize {
        (**self).size()
    }

    fn get(&self, from: usize, to: usize) -> f64 {
        (**self).get(from, to)
    }

    fn min_outgoing(&self, from: usize) -> Option<f64> {
        (**self).min_outgoing(from)
    }
}
