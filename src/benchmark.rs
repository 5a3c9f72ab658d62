//! Named workloads over an [`Instance`] with integer checksums.
//!
//! Each benchmark runs one engine on every tour of an instance and folds
//! the per-tour results into a single integer, so runs can be compared
//! across builds and machines:
//!
//! | Name          | Per-tour value                                             |
//! |---------------|------------------------------------------------------------|
//! | `2-opt`       | improving moves applied                                    |
//! | `Or-opt`      | improving moves applied                                    |
//! | `lns`         | LNS insertion checksum, truncated                          |
//! | `espprc`      | best reduced cost of a priced route (at most 0), truncated |
//! | `espprc-2`    | same with twice the resource capacity                      |
//! | `maxflow`     | summed depot flows (forward-only Edmonds-Karp), truncated  |
//! | `maxflow-RTF` | summed depot flows (relabel-to-front), truncated           |
//!
//! Tours are improved in place, so running a local search benchmark twice
//! on the same instance reports zero the second time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::SolverConfig;
use crate::error::Result;
use crate::espprc::espprc_from_tour;
use crate::instance::Instance;
use crate::local_search::{or_opt, two_opt};
use crate::maxflow::{maxflow_from_tour, maxflow_from_tour_with, FlowAlgorithm};

/// A named workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Benchmark {
    #[serde(rename = "2-opt")]
    TwoOpt,
    #[serde(rename = "Or-opt")]
    OrOpt,
    #[serde(rename = "lns")]
    Lns,
    #[serde(rename = "espprc")]
    Espprc,
    #[serde(rename = "espprc-2")]
    EspprcDoubleCapacity,
    #[serde(rename = "maxflow")]
    MaxFlow,
    #[serde(rename = "maxflow-RTF")]
    MaxFlowRelabelToFront,
}

impl Benchmark {
    pub const ALL: [Benchmark; 7] = [
        Benchmark::TwoOpt,
        Benchmark::OrOpt,
        Benchmark::Lns,
        Benchmark::Espprc,
        Benchmark::EspprcDoubleCapacity,
        Benchmark::MaxFlow,
        Benchmark::MaxFlowRelabelToFront,
    ];

    /// Name used on the command line and in reports.
    pub fn name(self) -> &'static str {
        match self {
            Benchmark::TwoOpt => "2-opt",
            Benchmark::OrOpt => "Or-opt",
            Benchmark::Lns => "lns",
            Benchmark::Espprc => "espprc",
            Benchmark::EspprcDoubleCapacity => "espprc-2",
            Benchmark::MaxFlow => "maxflow",
            Benchmark::MaxFlowRelabelToFront => "maxflow-RTF",
        }
    }
}

impl fmt::Display for Benchmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A benchmark name that matches none of [`Benchmark::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown benchmark: {0:?}")]
pub struct UnknownBenchmark(pub String);

impl FromStr for Benchmark {
    type Err = UnknownBenchmark;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Benchmark::ALL
            .into_iter()
            .find(|b| b.name() == s)
            .ok_or_else(|| UnknownBenchmark(s.to_string()))
    }
}

/// Outcome of one benchmark over one instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub benchmark: Benchmark,
    pub nodes: usize,
    pub solutions: usize,
    pub checksum: i64,
}

/// Runs `benchmark` on every tour of `instance`, in order.
///
/// # Errors
///
/// Propagates [`RoutingError`](crate::error::RoutingError) from the pricing
/// and flow engines; tours of a valid [`Instance`] never trigger them.
///
/// # Examples
///
/// ```
/// use u_tourkit::benchmark::{run_benchmark, Benchmark};
/// use u_tourkit::config::SolverConfig;
/// use u_tourkit::instance::generate_seeded;
///
/// let mut instance = generate_seeded(12, 2, 3);
/// let config = SolverConfig::default();
/// let report = run_benchmark(&mut instance, Benchmark::TwoOpt, &config).unwrap();
/// assert_eq!(report.solutions, 2);
///
/// // Tours are now 2-optimal.
/// let again = run_benchmark(&mut instance, Benchmark::TwoOpt, &config).unwrap();
/// assert_eq!(again.checksum, 0);
/// ```
#[instrument(skip(instance, config), fields(nodes = instance.num_nodes()))]
pub fn run_benchmark(
    instance: &mut Instance,
    benchmark: Benchmark,
    config: &SolverConfig,
) -> Result<BenchmarkReport> {
    let nodes = instance.num_nodes();
    let solutions = instance.tours().len();
    let mut checksum = 0i64;

    let (distances, tours) = instance.split_mut();
    for tour in tours.iter_mut() {
        let value = match benchmark {
            Benchmark::TwoOpt => two_opt(tour, distances) as i64,
            Benchmark::OrOpt => or_opt(tour, distances) as i64,
            Benchmark::Lns => config.lns.run(tour, distances) as i64,
            Benchmark::Espprc | Benchmark::EspprcDoubleCapacity => {
                let mut capacity = config.espprc.capacity;
                if benchmark == Benchmark::EspprcDoubleCapacity {
                    capacity = capacity.saturating_mul(2);
                }
                let solution =
                    espprc_from_tour(tour, distances, config.espprc.resources, capacity)?;
                // The route that never leaves the depot costs 0.
                solution.best_cost().map_or(0.0, |cost| cost.min(0.0)) as i64
            }
            Benchmark::MaxFlow => maxflow_from_tour(tour, distances)? as i64,
            Benchmark::MaxFlowRelabelToFront => {
                maxflow_from_tour_with(tour, distances, FlowAlgorithm::RelabelToFront)? as i64
            }
        };
        checksum += value;
    }

    debug!(checksum, "benchmark finished");
    Ok(BenchmarkReport {
        benchmark,
        nodes,
        solutions,
        checksum,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::generate_seeded;
    use crate::models::Tour;
    use crate::test_utils::square_instance;

    fn square() -> Instance {
        let (dm, tour) = square_instance();
        Instance::new(dm, vec![tour]).expect("sizes match")
    }

    #[test]
    fn test_names_round_trip() {
        for benchmark in Benchmark::ALL {
            assert_eq!(benchmark.to_string().parse::<Benchmark>(), Ok(benchmark));
            let json = serde_json::to_string(&benchmark).expect("serialize");
            assert_eq!(json, format!("\"{}\"", benchmark.name()));
        }
        assert_eq!(
            "3-opt".parse::<Benchmark>(),
            Err(UnknownBenchmark("3-opt".to_string()))
        );
    }

    #[test]
    fn test_square_espprc_checksum() {
        let mut instance = square();
        let report = run_benchmark(&mut instance, Benchmark::Espprc, &SolverConfig::default())
            .expect("valid instance");
        assert_eq!(report.nodes, 4);
        assert_eq!(report.solutions, 1);
        // 0 → 1 → 0 prices at -1 under the default resources.
        assert_eq!(report.checksum, -1);
    }

    #[test]
    fn test_maxflow_truncates_per_tour() {
        let mut instance = square();
        let report = run_benchmark(&mut instance, Benchmark::MaxFlow, &SolverConfig::default())
            .expect("valid instance");
        // Total flow is 0.007.
        assert_eq!(report.checksum, 0);
    }

    #[test]
    fn test_relabel_to_front_benchmark() {
        assert_eq!("maxflow-RTF".parse::<Benchmark>(), Ok(Benchmark::MaxFlowRelabelToFront));
        let mut instance = square();
        let report = run_benchmark(
            &mut instance,
            Benchmark::MaxFlowRelabelToFront,
            &SolverConfig::default(),
        )
        .expect("valid instance");
        assert_eq!(report.solutions, 1);
        assert_eq!(report.checksum, 0);
    }

    #[test]
    fn test_local_search_mutates_tours() {
        let dm = crate::test_utils::line_matrix(6);
        let tour = Tour::new(vec![0, 3, 1, 5, 2, 4, 0]).expect("valid");
        let mut instance = Instance::new(dm, vec![tour]).expect("sizes match");
        let before = instance.tours()[0].cost(instance.distances());

        let first = run_benchmark(&mut instance, Benchmark::TwoOpt, &SolverConfig::default())
            .expect("valid instance");
        assert!(first.checksum > 0);
        assert!(instance.tours()[0].cost(instance.distances()) < before);

        let second = run_benchmark(&mut instance, Benchmark::TwoOpt, &SolverConfig::default())
            .expect("valid instance");
        assert_eq!(second.checksum, 0);
    }

    #[test]
    fn test_lns_checksum_is_reproducible() {
        let config = SolverConfig::default().with_lns_iterations(3);
        let mut a = generate_seeded(10, 3, 8);
        let mut b = a.clone();
        let ra = run_benchmark(&mut a, Benchmark::Lns, &config).expect("valid instance");
        let rb = run_benchmark(&mut b, Benchmark::Lns, &config).expect("valid instance");
        assert_eq!(ra, rb);
        assert_eq!(a, b);
    }

    #[test]
    fn test_more_capacity_never_prices_worse() {
        let instance = generate_seeded(8, 3, 21);
        let config = SolverConfig::default();
        let tight = run_benchmark(&mut instance.clone(), Benchmark::Espprc, &config)
            .expect("valid instance");
        let loose = run_benchmark(
            &mut instance.clone(),
            Benchmark::EspprcDoubleCapacity,
            &config,
        )
        .expect("valid instance");
        assert!(loose.checksum <= tight.checksum);
    }
}
