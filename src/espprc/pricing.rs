//! Auxiliary ESPPRC inputs derived from a tour.
//!
//! The tour plays the role of a dual solution: the cost of the arc that
//! enters node `j` is taken as its dual value, and reduced costs subtract it
//! from every arc into `j`.

use crate::distance::{DistanceMatrix, DistanceOracle};
use crate::error::Result;
use crate::models::Tour;

/// `rc(i, j) = d(i, j) - d(pred(j), j)` where `pred(j)` precedes `j` in `tour`.
///
/// # Errors
///
/// Returns [`RoutingError::MatrixSize`](crate::error::RoutingError::MatrixSize)
/// if the tour and the oracle cover different node counts.
///
/// # Examples
///
/// ```
/// use u_tourkit::distance::DistanceMatrix;
/// use u_tourkit::espprc::reduced_cost_matrix;
/// use u_tourkit::models::Tour;
///
/// let dm = DistanceMatrix::from_fn(3, |i, j| (i + j) as f64);
/// let rc = reduced_cost_matrix(&Tour::identity(3), &dm).unwrap();
/// // Arcs used by the tour have zero reduced cost.
/// assert_eq!(rc.get(0, 1), 0.0);
/// assert_eq!(rc.get(1, 2), 0.0);
/// assert_eq!(rc.get(2, 0), 0.0);
/// ```
pub fn reduced_cost_matrix<D: DistanceOracle + ?Sized>(
    tour: &Tour,
    distances: &D,
) -> Result<DistanceMatrix> {
    tour.ensure_covers(distances.size())?;
    let duals = tour.incoming_costs(distances);
    Ok(DistanceMatrix::from_fn(distances.size(), |i, j| {
        distances.get(i, j) - duals[j]
    }))
}

/// Sum over nodes of their cheapest outgoing arc.
///
/// A lower bound on any tour length, used as the path length limit.
pub fn assignment_bound<D: DistanceOracle + ?Sized>(distances: &D) -> f64 {
    (0..distances.size())
        .filter_map(|i| distances.min_outgoing(i))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RoutingError;
    use crate::test_utils::square_instance;

    #[test]
    fn test_reduced_costs_follow_tour() {
        let (dm, tour) = square_instance();
        let rc = reduced_cost_matrix(&tour, &dm).expect("sizes match");
        // Dual of node 2 is d(1, 2) = 1.
        assert_eq!(rc.get(0, 2), 2.0);
        // Dual of node 0 is d(3, 0) = 2.
        assert_eq!(rc.get(1, 0), -1.0);
        assert_eq!(rc.get(3, 3), -1.0);
    }

    #[test]
    fn test_reduced_costs_size_check() {
        let (dm, _) = square_instance();
        assert!(matches!(
            reduced_cost_matrix(&Tour::identity(3), &dm),
            Err(RoutingError::MatrixSize { .. })
        ));
    }

    #[test]
    fn test_assignment_bound() {
        let (dm, _) = square_instance();
        // Cheapest outgoing arcs: 0→1 = 1, 1→0 = 1, 2→1 = 1, 3→2 = 1.
        assert_eq!(assignment_bound(&dm), 4.0);
        assert_eq!(assignment_bound(&DistanceMatrix::new(1)), 0.0);
    }
}
