//! Edmonds-Karp maximum flow on a dense capacity matrix.
//!
//! # Algorithm
//!
//! Repeatedly find a shortest augmenting path by BFS over arcs with positive
//! residual capacity `C[i][j] - F[i][j]`, add the path's bottleneck to `F`
//! along every arc of the path, and stop once the sink is unreachable.
//!
//! With [`FlowAlgorithm::EdmondsKarp`] only forward arcs are updated, so
//! flow once pushed is never withdrawn and the value can fall short of the
//! true maximum. [`FlowAlgorithm::EdmondsKarpResidual`] also sets
//! `F[j][i] = -F[i][j]`; reverse arcs then carry residual capacity and later
//! paths may cancel earlier flow.
//!
//! # Complexity
//!
//! O(V·E) augmentations, each an O(V²) BFS on the dense matrix.
//!
//! # Reference
//!
//! Edmonds, J. & Karp, R.M. (1972). "Theoretical improvements in algorithmic
//! efficiency for network flow problems", *Journal of the ACM* 19(2), 248-264.

use std::collections::VecDeque;

use tracing::{instrument, trace};

use super::FlowAlgorithm;
use crate::distance::DistanceMatrix;
use crate::error::{Result, RoutingError};

/// Residual capacity below this is treated as saturated.
pub(super) const RESIDUAL_EPSILON: f64 = 1e-12;

/// Capacity and flow matrices plus BFS scratch space, reused across runs.
///
/// # Examples
///
/// ```
/// use u_tourkit::distance::DistanceMatrix;
/// use u_tourkit::maxflow::MaxFlowSolver;
///
/// // 0 → 1 → 2 → 3 with capacities 3, 5, 2.
/// let mut capacity = DistanceMatrix::new(4);
/// capacity.set(0, 1, 3.0);
/// capacity.set(1, 2, 5.0);
/// capacity.set(2, 3, 2.0);
///
/// let mut solver = MaxFlowSolver::new(capacity);
/// assert_eq!(solver.max_flow(0, 3).unwrap(), 2.0);
/// assert_eq!(solver.flow().get(1, 2), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct MaxFlowSolver {
    capacity: DistanceMatrix,
    pub(super) flow: DistanceMatrix,
    algorithm: FlowAlgorithm,
    pred: Vec<Option<usize>>,
    queue: VecDeque<usize>,
}

impl MaxFlowSolver {
    /// Creates a forward-only Edmonds-Karp solver over a fixed capacity matrix.
    pub fn new(capacity: DistanceMatrix) -> Self {
        Self::with_algorithm(capacity, FlowAlgorithm::default())
    }

    /// Creates a solver running `algorithm`.
    pub fn with_algorithm(capacity: DistanceMatrix, algorithm: FlowAlgorithm) -> Self {
        let n = capacity.size();
        Self {
            flow: DistanceMatrix::new(n),
            capacity,
            algorithm,
            pred: vec![None; n],
            queue: VecDeque::with_capacity(n),
        }
    }

    /// Number of nodes in the graph.
    pub fn size(&self) -> usize {
        self.capacity.size()
    }

    pub fn algorithm(&self) -> FlowAlgorithm {
        self.algorithm
    }

    /// Flow left by the last [`MaxFlowSolver::max_flow`] call.
    ///
    /// Entry `(i, j)` is the flow pushed from `i` to `j`. Except under
    /// [`FlowAlgorithm::EdmondsKarp`], `(j, i)` holds its negation.
    pub fn flow(&self) -> &DistanceMatrix {
        &self.flow
    }

    /// Computes a `source` → `sink` flow from scratch.
    ///
    /// Returns the flow value; the flow itself is available through
    /// [`MaxFlowSolver::flow`] until the next call.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::NodeOutOfRange`] for an invalid endpoint.
    #[instrument(skip(self), fields(algorithm = ?self.algorithm), level = "trace")]
    pub fn max_flow(&mut self, source: usize, sink: usize) -> Result<f64> {
        let size = self.size();
        for node in [source, sink] {
            if node >= size {
                return Err(RoutingError::NodeOutOfRange { node, size });
            }
        }

        self.flow.fill(0.0);
        if source == sink {
            return Ok(0.0);
        }
        let total = match self.algorithm {
            FlowAlgorithm::EdmondsKarp | FlowAlgorithm::EdmondsKarpResidual => {
                self.augmenting_paths(source, sink)
            }
            FlowAlgorithm::RelabelToFront => self.relabel_to_front(source, sink),
        };
        trace!(total, "max flow found");
        Ok(total)
    }

    /// Nodes reachable from `source` in the residual graph of the last flow.
    ///
    /// After a maximum flow this is the source side of a minimum cut.
    pub fn source_side(&mut self, source: usize) -> Vec<bool> {
        self.bfs(source, None);
        (0..self.size())
            .map(|v| v == source || self.pred[v].is_some())
            .collect()
    }

    pub(super) fn residual(&self, from: usize, to: usize) -> f64 {
        self.capacity.get(from, to) - self.flow.get(from, to)
    }

    fn augmenting_paths(&mut self, source: usize, sink: usize) -> f64 {
        let mut total = 0.0;
        let mut augmentations = 0usize;
        loop {
            self.bfs(source, Some(sink));
            if self.pred[sink].is_none() {
                break;
            }
            let bottleneck = self.bottleneck(sink);
            self.augment(sink, bottleneck);
            total += bottleneck;
            augmentations += 1;
        }
        trace!(augmentations, "augmenting paths exhausted");
        total
    }

    /// BFS from `source`, stopping early once `target` is labelled.
    fn bfs(&mut self, source: usize, target: Option<usize>) {
        let n = self.size();
        self.pred.fill(None);
        self.queue.clear();
        self.queue.push_back(source);
        while let Some(cur) = self.queue.pop_front() {
            for next in 0..n {
                if next == cur || next == source || self.pred[next].is_some() {
                    continue;
                }
                if self.residual(cur, next) > RESIDUAL_EPSILON {
                    self.pred[next] = Some(cur);
                    if Some(next) == target {
                        return;
                    }
                    self.queue.push_back(next);
                }
            }
        }
    }

    fn bottleneck(&self, sink: usize) -> f64 {
        let mut bottleneck = f64::INFINITY;
        let mut v = sink;
        while let Some(u) = self.pred[v] {
            bottleneck = bottleneck.min(self.residual(u, v));
            v = u;
        }
        bottleneck
    }

    fn augment(&mut self, sink: usize, amount: f64) {
        let cancel = self.algorithm == FlowAlgorithm::EdmondsKarpResidual;
        let mut v = sink;
        while let Some(u) = self.pred[v] {
            self.flow.set(u, v, self.flow.get(u, v) + amount);
            if cancel {
                self.flow.set(v, u, self.flow.get(v, u) - amount);
            }
            v = u;
        }
    }
}
