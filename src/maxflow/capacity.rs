//! Capacity graphs derived from a tour.

use tracing::{debug, instrument};

use super::{FlowAlgorithm, MaxFlowSolver};
use crate::distance::{DistanceMatrix, DistanceOracle};
use crate::error::Result;
use crate::models::Tour;

/// Scale applied to distances that become capacities.
const CAPACITY_SCALE: f64 = 1000.0;

/// Keeps only arcs longer than the tour arc entering the same node.
///
/// With `t(j) = d(pred(j), j)`, `C[i][j] = d(i, j) / 1000` when
/// `d(i, j) > t(j)`, and `0` otherwise. Tour arcs themselves get no capacity.
///
/// # Errors
///
/// Returns [`RoutingError::MatrixSize`](crate::error::RoutingError::MatrixSize)
/// if the tour and the oracle cover different node counts.
pub fn tour_capacities<D: DistanceOracle + ?Sized>(
    tour: &Tour,
    distances: &D,
) -> Result<DistanceMatrix> {
    tour.ensure_covers(distances.size())?;
    let incoming = tour.incoming_costs(distances);
    Ok(DistanceMatrix::from_fn(distances.size(), |i, j| {
        let d = distances.get(i, j);
        if d > incoming[j] {
            d / CAPACITY_SCALE
        } else {
            0.0
        }
    }))
}

/// Sum of max-flow values from the depot to every other node over
/// [`tour_capacities`], using forward-only Edmonds-Karp.
///
/// # Errors
///
/// Fails under the same conditions as [`tour_capacities`].
///
/// # Examples
///
/// ```
/// use u_tourkit::distance::DistanceMatrix;
/// use u_tourkit::maxflow::maxflow_from_tour;
/// use u_tourkit::models::Tour;
///
/// let dm = DistanceMatrix::from_fn(3, |i, j| if i == j { 0.0 } else { 1000.0 });
/// // Every arc ties its tour arc, so no capacity survives.
/// assert_eq!(maxflow_from_tour(&Tour::identity(3), &dm).unwrap(), 0.0);
/// ```
pub fn maxflow_from_tour<D: DistanceOracle + ?Sized>(tour: &Tour, distances: &D) -> Result<f64> {
    maxflow_from_tour_with(tour, distances, FlowAlgorithm::default())
}

/// [`maxflow_from_tour`] with an explicit [`FlowAlgorithm`].
///
/// # Errors
///
/// Fails under the same conditions as [`tour_capacities`].
#[instrument(skip(tour, distances), fields(nodes = tour.num_nodes()))]
pub fn maxflow_from_tour_with<D: DistanceOracle + ?Sized>(
    tour: &Tour,
    distances: &D,
    algorithm: FlowAlgorithm,
) -> Result<f64> {
    let mut solver = MaxFlowSolver::with_algorithm(tour_capacities(tour, distances)?, algorithm);
    let source = tour.depot();
    let mut total = 0.0;
    for sink in (0..solver.size()).filter(|&v| v != source) {
        total += solver.max_flow(source, sink)?;
    }
    debug!(total, "summed depot flows");
    Ok(total)
}
