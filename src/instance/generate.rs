//! Random instance generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Instance;
use crate::distance::DistanceMatrix;
use crate::models::Tour;

/// Side length of the square the points are drawn from.
const MAP_SIZE: u32 = 100;

/// Distances are Euclidean lengths scaled by this and truncated.
const DISTANCE_SCALE: f64 = 100.0;

/// Random points on a grid map with `tours` random tours from node 0.
///
/// Points have integer coordinates in `[0, 100)`. Each distance is the
/// Euclidean length times 100, truncated, then lowered wherever a
/// single intermediate stop is shorter, one pass in index order. Tours are
/// uniform random permutations of the non-depot nodes.
///
/// `nodes` is raised to one if zero.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use u_tourkit::instance::generate;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let instance = generate(10, 3, &mut rng);
/// assert_eq!(instance.num_nodes(), 10);
/// assert_eq!(instance.tours().len(), 3);
/// ```
pub fn generate<R: Rng>(nodes: usize, tours: usize, rng: &mut R) -> Instance {
    let n = nodes.max(1);
    let points: Vec<(u32, u32)> = (0..n)
        .map(|_| (rng.random_range(0..MAP_SIZE), rng.random_range(0..MAP_SIZE)))
        .collect();

    let mut distances = DistanceMatrix::from_fn(n, |i, j| {
        let dx = points[i].0 as f64 - points[j].0 as f64;
        let dy = points[i].1 as f64 - points[j].1 as f64;
        (dx.hypot(dy) * DISTANCE_SCALE).trunc()
    });
    repair_triangle_inequality(&mut distances);

    let tours = (0..tours).map(|_| random_tour(n, rng)).collect();
    Instance::from_parts(distances, tours)
}

/// [`generate`] with a `StdRng` seeded from `seed`.
pub fn generate_seeded(nodes: usize, tours: usize, seed: u64) -> Instance {
    generate(nodes, tours, &mut StdRng::seed_from_u64(seed))
}

/// Shortcuts `i → k` through `j` whenever that is shorter.
///
/// A single pass; the result is not a full shortest-path closure.
fn repair_triangle_inequality(distances: &mut DistanceMatrix) {
    let n = distances.size();
    for i in 0..n {
        for j in (0..n).filter(|&j| j != i) {
            for k in (0..n).filter(|&k| k != i && k != j) {
                let via = distances.get(i, j) + distances.get(j, k);
                if via < distances.get(i, k) {
                    distances.set(i, k, via);
                }
            }
        }
    }
}

fn random_tour<R: Rng>(n: usize, rng: &mut R) -> Tour {
    let mut interior: Vec<usize> = (1..n).collect();

    // Fisher-Yates shuffle
    for i in (1..interior.len()).rev() {
        let j = rng.random_range(0..=i);
        interior.swap(i, j);
    }

    Tour::from_interior_unchecked(0, interior)
}
