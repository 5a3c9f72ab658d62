//! First-improvement 2-opt.
//!
//! # Algorithm
//!
//! For each pair of tour edges (t[p1], t[p1+1]) and (t[p2], t[p2+1]) with
//! p2 ≥ p1 + 2, compare the two edges against the reconnection
//! (t[p1], t[p2]) + (t[p1+1], t[p2+1]):
//!
//! ```text
//! gain = d(t[p1], t[p1+1]) + d(t[p2], t[p2+1]) - d(t[p1], t[p2]) - d(t[p1+1], t[p2+1])
//! ```
//!
//! If gain > 0, reverse positions [p1+1..=p2] and restart the scan from
//! p1 = 0. Pairs are scanned in ascending p1, then ascending p2, so the
//! sequence of applied moves is reproducible.
//!
//! The gain formula ignores the reversed segment's interior, so cost
//! monotonicity only holds for symmetric matrices.
//!
//! # Complexity
//!
//! O(n²) per scan, one scan per accepted move.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use tracing::{debug, instrument};

use crate::distance::DistanceOracle;
use crate::models::Tour;

use super::IMPROVEMENT_EPSILON;

/// Applies 2-opt moves to `tour` until no improving pair remains.
///
/// Returns the number of moves applied. The depot endpoints never move.
///
/// # Examples
///
/// ```
/// use u_tourkit::distance::DistanceMatrix;
/// use u_tourkit::local_search::two_opt;
/// use u_tourkit::models::Tour;
///
/// // Four corners of a unit square, visited in a crossing order.
/// let s = 2f64.sqrt();
/// let dm = DistanceMatrix::from_rows(&[
///     vec![0.0, 1.0, s, 1.0],
///     vec![1.0, 0.0, 1.0, s],
///     vec![s, 1.0, 0.0, 1.0],
///     vec![1.0, s, 1.0, 0.0],
/// ])
/// .unwrap();
/// let mut tour = Tour::new(vec![0, 2, 1, 3, 0]).unwrap();
/// let moves = two_opt(&mut tour, &dm);
/// assert_eq!(moves, 1);
/// assert!((tour.cost(&dm) - 4.0).abs() < 1e-10);
/// ```
#[instrument(skip_all, fields(nodes = tour.num_nodes()))]
pub fn two_opt<D: DistanceOracle + ?Sized>(tour: &mut Tour, distances: &D) -> usize {
    let mut moves = 0;
    while let Some((p1, p2)) = first_improving_pair(tour.nodes(), distances) {
        tour.nodes_mut()[p1 + 1..=p2].reverse();
        moves += 1;
    }
    debug!(moves, "2-opt converged");
    moves
}

/// Cost reduction from replacing edges at positions `p1` and `p2`.
fn two_opt_gain<D: DistanceOracle + ?Sized>(
    nodes: &[usize],
    distances: &D,
    p1: usize,
    p2: usize,
) -> f64 {
    let (a, b) = (nodes[p1], nodes[p1 + 1]);
    let (c, e) = (nodes[p2], nodes[p2 + 1]);
    distances.get(a, b) + distances.get(c, e) - distances.get(a, c) - distances.get(b, e)
}

fn first_improving_pair<D: DistanceOracle + ?Sized>(
    nodes: &[usize],
    distances: &D,
) -> Option<(usize, usize)> {
    let len = nodes.len();
    for p1 in 0..len.saturating_sub(3) {
        for p2 in p1 + 2..len - 1 {
            if two_opt_gain(nodes, distances, p1, p2) > IMPROVEMENT_EPSILON {
                return Some((p1, p2));
            }
        }
    }
    None
}
