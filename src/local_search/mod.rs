//! Local search operators for improving a [`Tour`] in place.
//!
//! - [`two_opt`] — First-improvement 2-opt edge exchange
//! - [`or_opt`] — First-improvement relocation of 1-3 node segments
//! - [`local_search`] — Alternates both until neither improves
//!
//! All operators scan in a fixed order, so results are reproducible.

mod or_opt;
mod two_opt;

pub use or_opt::or_opt;
pub use two_opt::two_opt;

use tracing::debug;

use crate::distance::DistanceOracle;
use crate::models::Tour;

/// Minimum gain a move must achieve to be applied.
pub(crate) const IMPROVEMENT_EPSILON: f64 = 1e-10;

/// Runs 2-opt and Or-opt alternately until the tour is a local optimum for both.
///
/// Returns the total number of moves applied.
///
/// # Examples
///
/// ```
/// use u_tourkit::distance::DistanceMatrix;
/// use u_tourkit::local_search::local_search;
/// use u_tourkit::models::Tour;
///
/// let dm = DistanceMatrix::from_fn(6, |i, j| (i as f64 - j as f64).abs());
/// let mut tour = Tour::new(vec![0, 4, 1, 5, 2, 3, 0]).unwrap();
/// let before = tour.cost(&dm);
/// assert!(local_search(&mut tour, &dm) > 0);
/// assert!(tour.cost(&dm) < before);
/// ```
pub fn local_search<D: DistanceOracle + ?Sized>(tour: &mut Tour, distances: &D) -> usize {
    let mut total = 0;
    loop {
        total += two_opt(tour, distances);
        let relocated = or_opt(tour, distances);
        total += relocated;
        if relocated == 0 {
            break;
        }
    }
    debug!(moves = total, "local search converged");
    total
}
