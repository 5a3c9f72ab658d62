//! Shared fixtures for unit and property tests.

use proptest::prelude::*;

use crate::distance::DistanceMatrix;
use crate::models::Tour;

/// The symmetric four-node instance with the tour `0 → 1 → 2 → 3 → 0` of cost 5.
pub(crate) fn square_instance() -> (DistanceMatrix, Tour) {
    let dm = DistanceMatrix::from_rows(&[
        vec![0.0, 1.0, 3.0, 2.0],
        vec![1.0, 0.0, 1.0, 2.0],
        vec![3.0, 1.0, 0.0, 1.0],
        vec![2.0, 2.0, 1.0, 0.0],
    ])
    .expect("square rows");
    (dm, Tour::identity(4))
}

/// Nodes on a line at x = 0, 1, …, n-1 with |x_i - x_j| distances.
pub(crate) fn line_matrix(n: usize) -> DistanceMatrix {
    DistanceMatrix::from_fn(n, |i, j| (i as f64 - j as f64).abs())
}

/// Rounded Euclidean distances between integer points.
pub(crate) fn euclidean_matrix(points: &[(u32, u32)]) -> DistanceMatrix {
    DistanceMatrix::from_fn(points.len(), |i, j| {
        let dx = points[i].0 as f64 - points[j].0 as f64;
        let dy = points[i].1 as f64 - points[j].1 as f64;
        (dx * dx + dy * dy).sqrt().round()
    })
}

/// Random symmetric instance with `min_nodes..=max_nodes` nodes and a random tour.
pub(crate) fn instance_strategy(
    min_nodes: usize,
    max_nodes: usize,
) -> impl Strategy<Value = (DistanceMatrix, Tour)> {
    (min_nodes..=max_nodes)
        .prop_flat_map(|n| {
            (
                proptest::collection::vec((0u32..50, 0u32..50), n),
                Just((1..n).collect::<Vec<usize>>()).prop_shuffle(),
            )
        })
        .prop_map(|(points, interior)| {
            let tour = Tour::from_interior(0, &interior).expect("shuffled permutation");
            (euclidean_matrix(&points), tour)
        })
}

/// Asserts that `tour` is still a Hamiltonian cycle over `n` nodes.
pub(crate) fn assert_valid_tour(tour: &Tour, n: usize) {
    let rebuilt = Tour::new(tour.nodes().to_vec()).expect("tour stays valid");
    assert_eq!(rebuilt.num_nodes(), n);
}
