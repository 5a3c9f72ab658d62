//! Large Neighborhood Search: destroy and greedily repair a [`Tour`].
//!
//! - [`DestroyStrategy`] — Which nodes a destroy step removes
//! - [`greedy_insertion`] — Cheapest-insertion repair
//! - [`PartialTour`] — Skeleton plus unassigned pool
//! - [`lns`] / [`LnsConfig::run`] — The iteration loop
//!
//! Every rebuilt tour replaces the working tour, better or worse. The
//! returned checksum (sum of all insertion deltas) identifies a run for
//! reproducibility checks; it is not a quality measure.
//!
//! # Reference
//!
//! Shaw, P. (1998). "Using Constraint Programming and Local Search Methods
//! to Solve Vehicle Routing Problems", *CP-98*, LNCS 1520, 417-431.

mod destroy;
mod partial;
mod repair;

pub use destroy::DestroyStrategy;
pub use partial::PartialTour;
pub use repair::greedy_insertion;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::distance::DistanceOracle;
use crate::models::Tour;

/// Parameters of an LNS run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LnsConfig {
    /// Number of destroy/repair rounds.
    pub iterations: usize,
    /// Destroy step applied each round.
    pub destroy: DestroyStrategy,
}

impl Default for LnsConfig {
    fn default() -> Self {
        Self {
            iterations: 10,
            destroy: DestroyStrategy::All,
        }
    }
}

impl LnsConfig {
    /// Runs LNS on `tour` and returns the accumulated insertion checksum.
    #[instrument(skip_all, fields(nodes = tour.num_nodes(), iterations = self.iterations))]
    pub fn run<D: DistanceOracle + ?Sized>(&self, tour: &mut Tour, distances: &D) -> f64 {
        let mut checksum = 0.0;
        for iteration in 0..self.iterations {
            let mut partial = self.destroy.destroy(tour);
            checksum += greedy_insertion(&mut partial, distances);
            partial.commit(tour);
            trace!(iteration, checksum, "LNS round rebuilt");
        }
        debug!(checksum, "LNS finished");
        checksum
    }
}

/// Runs `iterations` rounds of full destroy and greedy repair.
///
/// # Examples
///
/// ```
/// use u_tourkit::distance::DistanceMatrix;
/// use u_tourkit::lns::lns;
/// use u_tourkit::models::Tour;
///
/// let dm = DistanceMatrix::from_fn(5, |i, j| (i as f64 - j as f64).abs());
/// let mut a = Tour::new(vec![0, 3, 1, 4, 2, 0]).unwrap();
/// let mut b = a.clone();
/// assert_eq!(lns(&mut a, &dm, 3), lns(&mut b, &dm, 3));
/// assert_eq!(a, b);
/// ```
pub fn lns<D: DistanceOracle + ?Sized>(tour: &mut Tour, distances: &D, iterations: usize) -> f64 {
    LnsConfig {
        iterations,
        destroy: DestroyStrategy::All,
    }
    .run(tour, distances)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::test_utils::{assert_valid_tour, instance_strategy, line_matrix};

    #[test]
    fn test_full_destroy_rebuild_is_input_independent() {
        let dm = line_matrix(6);
        let mut a = Tour::new(vec![0, 5, 1, 4, 2, 3, 0]).expect("valid");
        let mut b = Tour::identity(6);
        // Full destroy discards the incumbent order entirely.
        assert_eq!(lns(&mut a, &dm, 1), lns(&mut b, &dm, 1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_checksum_accumulates_per_iteration() {
        let dm = line_matrix(5);
        let mut tour = Tour::identity(5);
        let once = lns(&mut tour.clone(), &dm, 1);
        let thrice = lns(&mut tour, &dm, 3);
        assert_eq!(thrice, 3.0 * once);
    }

    #[test]
    fn test_zero_iterations_leaves_tour() {
        let dm = line_matrix(4);
        let mut tour = Tour::new(vec![0, 2, 1, 3, 0]).expect("valid");
        assert_eq!(lns(&mut tour, &dm, 0), 0.0);
        assert_eq!(tour.nodes(), &[0, 2, 1, 3, 0]);
    }

    #[test]
    fn test_every_other_keeps_skeleton_order() {
        let dm = line_matrix(5);
        let config = LnsConfig {
            iterations: 1,
            destroy: DestroyStrategy::EveryOther,
        };
        let mut tour = Tour::new(vec![0, 4, 3, 2, 1, 0]).expect("valid");
        config.run(&mut tour, &dm);
        // 3 and 1 stay in that relative order.
        let pos = |n: usize| tour.nodes().iter().position(|&x| x == n);
        assert!(pos(3) < pos(1));
        assert_valid_tour(&tour, 5);
    }

    #[test]
    fn test_single_node_tour() {
        let dm = line_matrix(1);
        let mut tour = Tour::identity(1);
        assert_eq!(lns(&mut tour, &dm, 5), 0.0);
        assert_eq!(tour.nodes(), &[0, 0]);
    }

    proptest! {
        #[test]
        fn prop_lns_deterministic((dm, tour) in instance_strategy(2, 10), iterations in 1usize..4) {
            let mut a = tour.clone();
            let mut b = tour;
            let first = lns(&mut a, &dm, iterations);
            let second = lns(&mut b, &dm, iterations);
            prop_assert_eq!(first, second);
            prop_assert_eq!(&a, &b);
            assert_valid_tour(&a, dm.size());
        }

        #[test]
        fn prop_every_other_keeps_tour_valid((dm, tour) in instance_strategy(2, 10)) {
            let mut tour = tour;
            let config = LnsConfig { iterations: 3, destroy: DestroyStrategy::EveryOther };
            config.run(&mut tour, &dm);
            assert_valid_tour(&tour, dm.size());
        }
    }
}
