//! First-improvement Or-opt.
//!
//! # Algorithm
//!
//! Tries moving segments of 1, 2, or 3 consecutive nodes between the two
//! endpoints of another tour edge. For a segment t[i..i+l] and a target
//! edge (t[p], t[p+1]) outside it:
//!
//! ```text
//! delta = d(t[i-1], t[i+l]) + d(t[p], t[i]) + d(t[i+l-1], t[p+1])
//!       - d(t[p], t[p+1]) - d(t[i-1], t[i]) - d(t[i+l-1], t[i+l])
//! ```
//!
//! Segment starts are scanned ascending, then lengths 1..=3, then target
//! edges before the segment and finally after it. The first negative delta
//! is applied and the scan restarts.
//!
//! # Complexity
//!
//! O(n²) per scan, one scan per accepted move.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use tracing::{debug, instrument};

use crate::distance::DistanceOracle;
use crate::models::Tour;

use super::IMPROVEMENT_EPSILON;

/// Longest segment Or-opt will relocate.
const MAX_SEGMENT_LEN: usize = 3;

/// A segment relocation: move `t[start..start+len]` between `t[target]`
/// and `t[target+1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Relocation {
    start: usize,
    len: usize,
    target: usize,
}

/// Applies Or-opt moves to `tour` until no relocation reduces its cost.
///
/// Returns the number of moves applied.
///
/// # Examples
///
/// ```
/// use u_tourkit::distance::DistanceMatrix;
/// use u_tourkit::local_search::or_opt;
/// use u_tourkit::models::Tour;
///
/// let dm = DistanceMatrix::from_fn(5, |i, j| (i as f64 - j as f64).abs());
/// let mut tour = Tour::new(vec![0, 2, 3, 1, 4, 0]).unwrap();
/// let before = tour.cost(&dm);
/// assert!(or_opt(&mut tour, &dm) > 0);
/// assert!(tour.cost(&dm) < before);
/// ```
#[instrument(skip_all, fields(nodes = tour.num_nodes()))]
pub fn or_opt<D: DistanceOracle + ?Sized>(tour: &mut Tour, distances: &D) -> usize {
    let mut moves = 0;
    while let Some(relocation) = first_improving_relocation(tour.nodes(), distances) {
        apply(tour.nodes_mut(), relocation);
        moves += 1;
    }
    debug!(moves, "Or-opt converged");
    moves
}

fn relocation_delta<D: DistanceOracle + ?Sized>(
    nodes: &[usize],
    distances: &D,
    mv: Relocation,
) -> f64 {
    let Relocation { start: i, len: l, target: p } = mv;
    let (before, first) = (nodes[i - 1], nodes[i]);
    let (last, after) = (nodes[i + l - 1], nodes[i + l]);
    let (p_node, p_succ) = (nodes[p], nodes[p + 1]);

    distances.get(before, after) + distances.get(p_node, first) + distances.get(last, p_succ)
        - distances.get(p_node, p_succ)
        - distances.get(before, first)
        - distances.get(last, after)
}

fn first_improving_relocation<D: DistanceOracle + ?Sized>(
    nodes: &[usize],
    distances: &D,
) -> Option<Relocation> {
    let len = nodes.len();
    for start in 1..len.saturating_sub(1) {
        for seg_len in 1..=MAX_SEGMENT_LEN.min(len - 1 - start) {
            let targets = (0..start - 1).chain(start + seg_len..len - 1);
            for target in targets {
                let mv = Relocation {
                    start,
                    len: seg_len,
                    target,
                };
                if relocation_delta(nodes, distances, mv) < -IMPROVEMENT_EPSILON {
                    return Some(mv);
                }
            }
        }
    }
    None
}

/// Moves the segment, shifting everything between it and the target edge.
fn apply(nodes: &mut [usize], mv: Relocation) {
    let Relocation { start, len, target } = mv;
    if target < start {
        nodes[target + 1..start + len].rotate_right(len);
    } else {
        nodes[start..=target].rotate_left(len);
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::test_utils::{assert_valid_tour, instance_strategy, line_matrix, square_instance};

    #[test]
    fn test_apply_backward() {
        let mut nodes = vec![0, 1, 2, 3, 4, 5, 0];
        // Move [4, 5] between 1 and 2.
        apply(
            &mut nodes,
            Relocation {
                start: 4,
                len: 2,
                target: 1,
            },
        );
        assert_eq!(nodes, vec![0, 1, 4, 5, 2, 3, 0]);
    }

    #[test]
    fn test_apply_forward() {
        let mut nodes = vec![0, 1, 2, 3, 4, 5, 0];
        // Move [1] between 4 and 5.
        apply(
            &mut nodes,
            Relocation {
                start: 1,
                len: 1,
                target: 4,
            },
        );
        assert_eq!(nodes, vec![0, 2, 3, 4, 1, 5, 0]);
    }

    #[test]
    fn test_or_opt_already_optimal() {
        let dm = line_matrix(4);
        let mut tour = Tour::identity(4);
        assert_eq!(or_opt(&mut tour, &dm), 0);
        assert_eq!(tour.nodes(), &[0, 1, 2, 3, 0]);
    }

    #[test]
    fn test_or_opt_relocates_leading_segment() {
        let dm = line_matrix(5);
        // 0 → 2 → 3 → 1 → 4 → 0 costs 2+1+2+3+4 = 12. The first improving move
        // carries the segment [2, 3] past node 1, giving 0 → 1 → 2 → 3 → 4 → 0 at 8.
        let mut tour = Tour::new(vec![0, 2, 3, 1, 4, 0]).expect("valid");
        let first = first_improving_relocation(tour.nodes(), &dm).expect("improving move");
        assert_eq!(
            first,
            Relocation {
                start: 1,
                len: 2,
                target: 3
            }
        );
        or_opt(&mut tour, &dm);
        assert_eq!(tour.cost(&dm), 8.0);
    }

    #[test]
    fn test_or_opt_square_scenario() {
        let (dm, mut tour) = square_instance();
        or_opt(&mut tour, &dm);
        assert!(tour.cost(&dm) <= 5.0);
        assert_valid_tour(&tour, 4);
    }

    #[test]
    fn test_or_opt_tiny_tours() {
        let dm = line_matrix(2);
        let mut tour = Tour::identity(2);
        assert_eq!(or_opt(&mut tour, &dm), 0);
        assert_eq!(tour.nodes(), &[0, 1, 0]);
    }

    proptest! {
        #[test]
        fn prop_or_opt_monotone_and_idempotent((dm, tour) in instance_strategy(2, 12)) {
            let mut tour = tour;
            let before = tour.cost(&dm);
            or_opt(&mut tour, &dm);
            prop_assert!(tour.cost(&dm) <= before + 1e-9);
            assert_valid_tour(&tour, dm.size());
            prop_assert_eq!(or_opt(&mut tour, &dm), 0);
        }
    }
}
