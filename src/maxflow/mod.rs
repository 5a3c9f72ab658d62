//! Maximum flow on dense graphs.
//!
//! - [`MaxFlowSolver`] — Augmenting-path or push-relabel flow with reusable buffers
//! - [`FlowAlgorithm`] — Which update rule a solver runs
//! - [`tour_capacities`] — Capacity graph derived from a tour
//! - [`maxflow_from_tour`] — Depot-to-every-node flows over that graph, summed

mod capacity;
mod edmonds_karp;
mod push_relabel;

pub use capacity::{maxflow_from_tour, maxflow_from_tour_with, tour_capacities};
pub use edmonds_karp::MaxFlowSolver;

use serde::{Deserialize, Serialize};

/// Flow algorithm run by a [`MaxFlowSolver`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowAlgorithm {
    /// Edmonds-Karp updating forward arcs only. Pushed flow is never
    /// withdrawn, so the result is a lower bound on the maximum flow.
    #[default]
    EdmondsKarp,
    /// Edmonds-Karp with skew-symmetric flow. Reverse arcs can cancel
    /// earlier flow and the result is a maximum flow.
    EdmondsKarpResidual,
    /// Relabel-to-front push-relabel. Computes a maximum flow.
    RelabelToFront,
}
