//! Closed tour over every node of an instance.

use serde::{Deserialize, Serialize};

use crate::distance::DistanceOracle;
use crate::error::{Result, RoutingError};

/// An ordered sequence of `n + 1` node indices forming a Hamiltonian cycle.
///
/// The first and last entries are the depot; the interior is a permutation
/// of the remaining `n - 1` nodes. Engines mutate a tour in place but never
/// change its length or its endpoints.
///
/// # Examples
///
/// ```
/// use u_tourkit::models::Tour;
/// use u_tourkit::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(&[
///     vec![0.0, 1.0, 2.0],
///     vec![1.0, 0.0, 1.0],
///     vec![2.0, 1.0, 0.0],
/// ])
/// .unwrap();
/// let tour = Tour::new(vec![0, 1, 2, 0]).unwrap();
/// assert_eq!(tour.num_nodes(), 3);
/// assert_eq!(tour.cost(&dm), 4.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Tour {
    nodes: Vec<usize>,
}

impl Tour {
    /// Validates `nodes` and wraps them as a tour.
    ///
    /// The node count is implied by the sequence: `nodes.len() - 1`.
    ///
    /// # Errors
    ///
    /// Fails when the sequence is shorter than two entries, the endpoints
    /// differ, or the interior is not a permutation of the non-depot nodes.
    pub fn new(nodes: Vec<usize>) -> Result<Self> {
        if nodes.len() < 2 {
            return Err(RoutingError::TourLength {
                expected: 2,
                actual: nodes.len(),
            });
        }
        let size = nodes.len() - 1;
        let depot = nodes[0];
        let last = nodes[size];
        if depot >= size {
            return Err(RoutingError::NodeOutOfRange { node: depot, size });
        }
        if last != depot {
            return Err(RoutingError::TourEndpoints {
                depot,
                first: depot,
                last,
            });
        }

        let mut seen = vec![false; size];
        seen[depot] = true;
        for &node in &nodes[1..size] {
            if node >= size {
                return Err(RoutingError::NodeOutOfRange { node, size });
            }
            if seen[node] {
                return Err(RoutingError::DuplicateNode { node });
            }
            seen[node] = true;
        }
        Ok(Self { nodes })
    }

    /// Builds the tour `depot → interior[0] → … → depot`.
    pub fn from_interior(depot: usize, interior: &[usize]) -> Result<Self> {
        let mut nodes = Vec::with_capacity(interior.len() + 2);
        nodes.push(depot);
        nodes.extend_from_slice(interior);
        nodes.push(depot);
        Self::new(nodes)
    }

    /// Wraps a permutation of the non-depot nodes known to be valid.
    pub(crate) fn from_interior_unchecked(depot: usize, interior: Vec<usize>) -> Self {
        let mut nodes = Vec::with_capacity(interior.len() + 2);
        nodes.push(depot);
        nodes.extend(interior);
        nodes.push(depot);
        debug_assert!(Self::new(nodes.clone()).is_ok());
        Self { nodes }
    }

    /// The tour `0 → 1 → … → n-1 → 0`.
    pub fn identity(size: usize) -> Self {
        let mut nodes: Vec<usize> = (0..size.max(1)).collect();
        nodes.push(0);
        Self { nodes }
    }

    /// Checks that this tour covers exactly the nodes of an oracle of `size`.
    pub fn ensure_covers(&self, size: usize) -> Result<()> {
        if self.num_nodes() != size {
            return Err(RoutingError::MatrixSize {
                expected: self.num_nodes(),
                actual: size,
            });
        }
        Ok(())
    }

    /// The fixed start/end node.
    pub fn depot(&self) -> usize {
        self.nodes[0]
    }

    /// Number of distinct nodes visited (`n`).
    pub fn num_nodes(&self) -> usize {
        self.nodes.len() - 1
    }

    /// The full sequence including both depot endpoints.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Interior positions may be rearranged freely; endpoints must stay put.
    pub(crate) fn nodes_mut(&mut self) -> &mut [usize] {
        &mut self.nodes
    }

    /// Replaces the sequence with one produced by an engine.
    pub(crate) fn replace(&mut self, nodes: Vec<usize>) {
        debug_assert_eq!(nodes.len(), self.nodes.len());
        debug_assert_eq!(nodes.first(), self.nodes.first());
        debug_assert_eq!(nodes.last(), self.nodes.last());
        self.nodes = nodes;
    }

    /// Total cost of the closed tour.
    pub fn cost<D: DistanceOracle + ?Sized>(&self, distances: &D) -> f64 {
        self.nodes
            .windows(2)
            .map(|w| distances.get(w[0], w[1]))
            .sum()
    }

    /// For each node `j`, the cost of the arc entering it in this tour.
    ///
    /// This is the per-node "dual" used to derive auxiliary graphs.
    pub fn incoming_costs<D: DistanceOracle + ?Sized>(&self, distances: &D) -> Vec<f64> {
        let mut incoming = vec![0.0; self.num_nodes()];
        for w in self.nodes.windows(2) {
            incoming[w[1]] = distances.get(w[0], w[1]);
        }
        incoming
    }
}

impl TryFrom<Vec<usize>> for Tour {
    type Error = RoutingError;

    fn try_from(nodes: Vec<usize>) -> Result<Self> {
        Self::new(nodes)
    }
}

impl From<Tour> for Vec<usize> {
    fn from(tour: Tour) -> Self {
        tour.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;

    #[test]
    fn test_valid_tour() {
        let tour = Tour::new(vec![0, 2, 1, 3, 0]).expect("valid");
        assert_eq!(tour.depot(), 0);
        assert_eq!(tour.num_nodes(), 4);
        assert_eq!(tour.nodes(), &[0, 2, 1, 3, 0]);
    }

    #[test]
    fn test_non_zero_depot() {
        let tour = Tour::from_interior(2, &[0, 1]).expect("valid");
        assert_eq!(tour.nodes(), &[2, 0, 1, 2]);
    }

    #[test]
    fn test_rejects_short() {
        assert!(matches!(
            Tour::new(vec![0]),
            Err(RoutingError::TourLength { actual: 1, .. })
        ));
    }

    #[test]
    fn test_rejects_open_tour() {
        assert!(matches!(
            Tour::new(vec![0, 1, 2, 1]),
            Err(RoutingError::TourEndpoints { last: 1, .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate() {
        assert_eq!(
            Tour::new(vec![0, 1, 1, 0]),
            Err(RoutingError::DuplicateNode { node: 1 })
        );
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(
            Tour::new(vec![0, 1, 5, 0]),
            Err(RoutingError::NodeOutOfRange { node: 5, size: 3 })
        );
    }

    #[test]
    fn test_rejects_depot_in_interior() {
        assert_eq!(
            Tour::new(vec![0, 0, 1, 0]),
            Err(RoutingError::DuplicateNode { node: 0 })
        );
    }

    #[test]
    fn test_identity_and_single_node() {
        assert_eq!(Tour::identity(3).nodes(), &[0, 1, 2, 0]);
        let single = Tour::identity(1);
        assert_eq!(single.nodes(), &[0, 0]);
        assert_eq!(single.num_nodes(), 1);
    }

    #[test]
    fn test_cost_and_incoming() {
        let dm = DistanceMatrix::from_fn(3, |i, j| (i * 3 + j) as f64);
        let tour = Tour::new(vec![0, 2, 1, 0]).expect("valid");
        // 0→2 = 2, 2→1 = 7, 1→0 = 3
        assert_eq!(tour.cost(&dm), 12.0);
        assert_eq!(tour.incoming_costs(&dm), vec![3.0, 7.0, 2.0]);
    }

    #[test]
    fn test_ensure_covers() {
        let tour = Tour::identity(3);
        assert!(tour.ensure_covers(3).is_ok());
        assert!(matches!(
            tour.ensure_covers(4),
            Err(RoutingError::MatrixSize {
                expected: 3,
                actual: 4
            })
        ));
    }

    #[test]
    fn test_serde_validates() {
        let tour: Tour = serde_json::from_str("[0, 1, 2, 0]").expect("valid json tour");
        assert_eq!(tour.num_nodes(), 3);
        assert!(serde_json::from_str::<Tour>("[0, 1, 1, 0]").is_err());
        assert_eq!(serde_json::to_string(&tour).expect("serialize"), "[0,1,2,0]");
    }
}
