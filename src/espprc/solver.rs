//! Label-setting driver.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::distance::DistanceOracle;
use crate::error::{Result, RoutingError};

use super::frontier::{Admission, Frontier};
use super::label::{LabelArena, LabelId};
use super::params::{EspprcParams, ResourceDemands};

/// Cheapest feasible depot-to-depot path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EspprcPath {
    /// Accumulated reduced cost.
    pub cost: f64,
    /// Accumulated length.
    pub length: f64,
    /// Visited nodes, depot first and last.
    pub nodes: Vec<usize>,
}

/// Counters describing one solver run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EspprcStats {
    /// Labels created, including the origin.
    pub labels_created: usize,
    /// Extensions dominated on arrival.
    pub labels_rejected: usize,
    /// Labels evicted by a dominating label, together with their descendants.
    pub labels_invalidated: usize,
    /// Node pops from the work queue.
    pub node_visits: usize,
}

/// Result of [`LabelSettingSolver::solve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EspprcSolution {
    /// `None` when no path leaves the depot and returns within the bounds.
    pub best: Option<EspprcPath>,
    pub stats: EspprcStats,
}

impl EspprcSolution {
    /// Cost of the best path, if any.
    pub fn best_cost(&self) -> Option<f64> {
        self.best.as_ref().map(|p| p.cost)
    }
}

/// Exact solver for the elementary shortest path problem with resource
/// constraints.
///
/// Runs a label-setting dynamic program: every node keeps a frontier of
/// non-dominated partial paths, and a FIFO queue of nodes whose frontier
/// changed drives extension until a fixpoint is reached.
///
/// # Examples
///
/// ```
/// use u_tourkit::distance::DistanceMatrix;
/// use u_tourkit::espprc::{EspprcParams, LabelSettingSolver, ResourceDemands};
///
/// let lengths = DistanceMatrix::from_fn(3, |i, j| if i == j { 0.0 } else { 1.0 });
/// // Entering node 1 or 2 pays -2, returning to the depot pays 1.
/// let costs = DistanceMatrix::from_fn(3, |_, j| if j == 0 { 1.0 } else { -2.0 });
/// let demands = ResourceDemands::zero(3, 0);
/// let params = EspprcParams::uniform(0, 10.0, 0, 0);
///
/// let solver = LabelSettingSolver::new(&costs, &lengths, &demands, &params).unwrap();
/// let best = solver.solve().best.unwrap();
/// assert_eq!(best.cost, -3.0);
/// assert_eq!(best.nodes.len(), 4);
/// ```
pub struct LabelSettingSolver<'a, C: ?Sized, L: ?Sized> {
    costs: &'a C,
    lengths: &'a L,
    demands: &'a ResourceDemands,
    params: &'a EspprcParams,
}

impl<'a, C, L> LabelSettingSolver<'a, C, L>
where
    C: DistanceOracle + ?Sized,
    L: DistanceOracle + ?Sized,
{
    /// Checks that all inputs describe the same node set and resource count.
    ///
    /// # Errors
    ///
    /// [`RoutingError::MatrixSize`] when the matrices or demand table differ
    /// in node count, [`RoutingError::NodeOutOfRange`] for a bad depot, and
    /// [`RoutingError::ResourceDimension`] when demands and capacities
    /// disagree on the number of resources.
    pub fn new(
        costs: &'a C,
        lengths: &'a L,
        demands: &'a ResourceDemands,
        params: &'a EspprcParams,
    ) -> Result<Self> {
        let size = costs.size();
        for actual in [lengths.size(), demands.num_nodes()] {
            if actual != size {
                return Err(RoutingError::MatrixSize {
                    expected: size,
                    actual,
                });
            }
        }
        if params.depot >= size {
            return Err(RoutingError::NodeOutOfRange {
                node: params.depot,
                size,
            });
        }
        if demands.num_resources() != params.num_resources() {
            return Err(RoutingError::ResourceDimension {
                expected: params.num_resources(),
                actual: demands.num_resources(),
            });
        }
        Ok(Self {
            costs,
            lengths,
            demands,
            params,
        })
    }

    /// Runs the dynamic program to its fixpoint.
    #[instrument(skip_all, fields(nodes = self.costs.size(), resources = self.params.num_resources()))]
    pub fn solve(&self) -> EspprcSolution {
        let size = self.costs.size();
        let depot = self.params.depot;
        let mut run = Run {
            arena: LabelArena::new(),
            frontiers: vec![Frontier::default(); size],
            queue: VecDeque::with_capacity(size),
            queued: vec![false; size],
            stats: EspprcStats::default(),
        };

        // The origin never joins the depot frontier, which holds closed paths only.
        let origin = run
            .arena
            .origin(depot, size, self.params.num_resources());
        run.queue.push_back(depot);
        run.queued[depot] = true;

        while let Some(node) = run.queue.pop_front() {
            run.queued[node] = false;
            run.stats.node_visits += 1;
            let pending = if node == depot {
                vec![origin]
            } else {
                run.frontiers[node].snapshot()
            };
            trace!(node, labels = pending.len(), "processing node");

            for id in pending {
                let label = &run.arena[id];
                if label.ignored || label.extended {
                    continue;
                }
                self.extend_all(&mut run, id);
                run.arena.mark_extended(id);
            }
        }

        run.stats.labels_created = run.arena.len();
        let best = run.frontiers[depot]
            .live(&run.arena)
            .min_by(|&a, &b| run.arena[a].cost.total_cmp(&run.arena[b].cost))
            .map(|id| EspprcPath {
                cost: run.arena[id].cost,
                length: run.arena[id].length,
                nodes: run.arena.path(id),
            });

        debug!(
            created = run.stats.labels_created,
            rejected = run.stats.labels_rejected,
            invalidated = run.stats.labels_invalidated,
            best = ?best.as_ref().map(|p| p.cost),
            "ESPPRC finished"
        );
        EspprcSolution {
            best,
            stats: run.stats,
        }
    }

    /// Generates every feasible extension of `id` and offers it to the
    /// target node's frontier.
    fn extend_all(&self, run: &mut Run, id: LabelId) {
        let size = self.costs.size();
        let depot = self.params.depot;
        let at = run.arena[id].at;

        for succ in 0..size {
            if succ == at || !self.is_feasible(&run.arena, id, succ) {
                continue;
            }
            let child = run.arena.extend(
                id,
                succ,
                self.costs.get(at, succ),
                self.lengths.get(at, succ),
                self.demands.of(succ),
            );
            match run.frontiers[succ].admit(&mut run.arena, child) {
                Admission::Rejected => run.stats.labels_rejected += 1,
                Admission::Admitted { invalidated } => {
                    run.arena.link(id, child);
                    run.stats.labels_invalidated += invalidated;
                    if !run.queued[succ] && succ != depot {
                        run.queue.push_back(succ);
                        run.queued[succ] = true;
                    }
                }
            }
        }
    }

    /// Whether `id` may move on to `succ` and still return to the depot.
    fn is_feasible(&self, arena: &LabelArena, id: LabelId, succ: usize) -> bool {
        let label = &arena[id];
        if label.visited.contains(succ) {
            return false;
        }
        let depot = self.params.depot;
        let reach = label.length + self.lengths.get(label.at, succ) + self.lengths.get(succ, depot);
        if reach > self.params.max_length {
            return false;
        }
        label
            .usage
            .iter()
            .zip(self.demands.of(succ))
            .zip(&self.params.capacities)
            .all(|((&used, &demand), &capacity)| demand == 0 || used.saturating_add(demand) <= capacity)
    }
}

/// Mutable state of one `solve` call; dropping it frees every label.
struct Run {
    arena: LabelArena,
    frontiers: Vec<Frontier>,
    queue: VecDeque<usize>,
    queued: Vec<bool>,
    stats: EspprcStats,
}
