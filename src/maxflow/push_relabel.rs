//! Relabel-to-front push-relabel maximum flow.
//!
//! # Algorithm
//!
//! The source is given height `n` and saturates every arc leaving it. Each
//! other node (sink excepted) is kept in a list and discharged in turn: excess
//! is pushed to lower neighbours along residual arcs, and when no admissible
//! arc remains the node is relabelled to one above its lowest residual
//! neighbour. A node whose height rose moves to the front of the list and the
//! scan resumes behind it. The flow is skew-symmetric throughout.
//!
//! # Complexity
//!
//! O(V³).
//!
//! # Reference
//!
//! Goldberg, A.V. & Tarjan, R.E. (1988). "A new approach to the maximum-flow
//! problem", *Journal of the ACM* 35(4), 921-940.

use tracing::trace;

use super::edmonds_karp::{MaxFlowSolver, RESIDUAL_EPSILON};

/// Per-run node state.
struct Preflow {
    height: Vec<usize>,
    excess: Vec<f64>,
    /// Next neighbour to try when discharging.
    current: Vec<usize>,
}

impl MaxFlowSolver {
    pub(super) fn relabel_to_front(&mut self, source: usize, sink: usize) -> f64 {
        let n = self.size();
        let mut state = Preflow {
            height: vec![0; n],
            excess: vec![0.0; n],
            current: vec![0; n],
        };
        state.height[source] = n;
        state.excess[source] = f64::INFINITY;
        for v in (0..n).filter(|&v| v != source) {
            self.push(&mut state, source, v);
        }

        let mut list: Vec<usize> = (0..n).filter(|&v| v != source && v != sink).collect();
        let mut relabels = 0usize;
        let mut p = 0;
        while p < list.len() {
            let u = list[p];
            let before = state.height[u];
            self.discharge(&mut state, u);
            if state.height[u] > before {
                relabels += 1;
                list[..=p].rotate_right(1);
                p = 1;
            } else {
                p += 1;
            }
        }
        trace!(relabels, "preflow discharged");

        (0..n).map(|v| self.flow.get(source, v)).sum()
    }

    fn push(&mut self, state: &mut Preflow, u: usize, v: usize) {
        let amount = state.excess[u].min(self.residual(u, v));
        if amount <= RESIDUAL_EPSILON {
            return;
        }
        self.flow.set(u, v, self.flow.get(u, v) + amount);
        self.flow.set(v, u, self.flow.get(v, u) - amount);
        state.excess[u] -= amount;
        state.excess[v] += amount;
    }

    fn relabel(&self, state: &mut Preflow, u: usize) -> bool {
        let lowest = (0..self.size())
            .filter(|&v| self.residual(u, v) > RESIDUAL_EPSILON)
            .map(|v| state.height[v])
            .min();
        match lowest {
            Some(h) => {
                state.height[u] = h + 1;
                true
            }
            None => false,
        }
    }

    fn discharge(&mut self, state: &mut Preflow, u: usize) {
        let n = self.size();
        while state.excess[u] > RESIDUAL_EPSILON {
            let v = state.current[u];
            if v >= n {
                if !self.relabel(state, u) {
                    // Excess below the residual threshold on every arc back.
                    state.excess[u] = 0.0;
                    return;
                }
                state.current[u] = 0;
            } else if self.residual(u, v) > RESIDUAL_EPSILON && state.height[u] > state.height[v] {
                self.push(state, u, v);
            } else {
                state.current[u] += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::distance::DistanceMatrix;
    use crate::maxflow::test_support::{brute_force_min_cut, flow_case, graph};
    use crate::maxflow::{FlowAlgorithm, MaxFlowSolver};

    fn solver(capacity: DistanceMatrix) -> MaxFlowSolver {
        MaxFlowSolver::with_algorithm(capacity, FlowAlgorithm::RelabelToFront)
    }

    #[test]
    fn test_single_path_bottleneck() {
        let mut s = solver(graph(4, &[(0, 1, 3.0), (1, 2, 5.0), (2, 3, 2.0)]));
        assert_eq!(s.max_flow(0, 3).expect("valid"), 2.0);
        assert_eq!(s.flow().get(0, 1), 2.0);
        assert_eq!(s.flow().get(2, 3), 2.0);
        assert_eq!(s.flow().get(1, 0), -2.0);
    }

    #[test]
    fn test_routes_around_shared_arc() {
        let capacity = graph(
            7,
            &[
                (0, 1, 1.0),
                (0, 2, 1.0),
                (1, 3, 1.0),
                (1, 4, 1.0),
                (2, 4, 1.0),
                (3, 5, 1.0),
                (4, 6, 1.0),
                (5, 6, 1.0),
            ],
        );
        let mut s = solver(capacity);
        assert_eq!(s.max_flow(0, 6).expect("valid"), 2.0);
        assert!(!s.source_side(0)[6]);
    }

    #[test]
    fn test_excess_returns_to_source() {
        // Node 1 receives 5 but can forward only 1.
        let mut s = solver(graph(3, &[(0, 1, 5.0), (1, 2, 1.0)]));
        assert_eq!(s.max_flow(0, 2).expect("valid"), 1.0);
        assert_eq!(s.flow().get(0, 1), 1.0);
    }

    #[test]
    fn test_direct_arc_and_unreachable_sink() {
        let mut s = solver(graph(3, &[(0, 2, 4.0), (0, 1, 1.0)]));
        assert_eq!(s.max_flow(0, 2).expect("valid"), 4.0);
        assert_eq!(s.max_flow(2, 0).expect("valid"), 0.0);
        assert_eq!(s.max_flow(1, 1).expect("valid"), 0.0);
    }

    proptest! {
        #[test]
        fn prop_relabel_to_front_equals_min_cut(capacity in flow_case()) {
            let n = capacity.size();
            let sink = n - 1;
            let expected = brute_force_min_cut(&capacity, 0, sink);
            let mut s = solver(capacity.clone());
            let value = s.max_flow(0, sink).expect("valid");
            prop_assert!((value - expected).abs() < 1e-9);

            // Conservation at every inner node.
            for v in 1..sink {
                let net: f64 = (0..n).map(|u| s.flow().get(u, v)).sum();
                prop_assert!(net.abs() < 1e-9);
            }

            let mut residual =
                MaxFlowSolver::with_algorithm(capacity, FlowAlgorithm::EdmondsKarpResidual);
            let other = residual.max_flow(0, sink).expect("valid");
            prop_assert!((value - other).abs() < 1e-9);
        }
    }
}
