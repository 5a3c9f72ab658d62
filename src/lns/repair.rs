//! Greedy cheapest-insertion repair.
//!
//! Each step evaluates every (unassigned node, gap) pair and inserts the
//! cheapest one. Ties go to the earliest node in the pool, then the earliest
//! gap, which keeps the rebuild deterministic.

use crate::distance::DistanceOracle;

use super::partial::PartialTour;

/// The cheapest single insertion available in `partial`.
///
/// Returns `(pool_index, gap, delta)`, or `None` if nothing is unassigned.
pub(crate) fn cheapest_insertion<D: DistanceOracle + ?Sized>(
    partial: &PartialTour,
    distances: &D,
) -> Option<(usize, usize, f64)> {
    let mut best: Option<(usize, usize, f64)> = None;
    for (pool_index, &node) in partial.unassigned().iter().enumerate() {
        for (gap, edge) in partial.skeleton().windows(2).enumerate() {
            let (prev, next) = (edge[0], edge[1]);
            let delta =
                distances.get(prev, node) + distances.get(node, next) - distances.get(prev, next);
            if best.as_ref().is_none_or(|b| delta < b.2) {
                best = Some((pool_index, gap, delta));
            }
        }
    }
    best
}

/// Reinserts every unassigned node greedily.
///
/// Returns the sum of the applied insertion deltas.
pub fn greedy_insertion<D: DistanceOracle + ?Sized>(
    partial: &mut PartialTour,
    distances: &D,
) -> f64 {
    let mut total = 0.0;
    while let Some((pool_index, gap, delta)) = cheapest_insertion(partial, distances) {
        partial.insert(pool_index, gap);
        total += delta;
    }
    total
}
