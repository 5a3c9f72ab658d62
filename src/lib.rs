//! # u-tourkit
//!
//! Tour optimization kernels over a dense distance matrix: local search,
//! large neighborhood search, resource-constrained shortest path pricing,
//! and maximum flow.
//!
//! ## Modules
//!
//! - [`distance`] — Distance oracle trait and dense matrix
//! - [`models`] — Validated closed [`Tour`](models::Tour)
//! - [`local_search`] — First-improvement 2-opt and Or-opt
//! - [`lns`] — Destroy and greedy cheapest-insertion repair
//! - [`espprc`] — Label-setting ESPPRC with dominance and cascading invalidation
//! - [`maxflow`] — Edmonds-Karp and relabel-to-front on tour-derived capacities
//! - [`instance`] — Instance text format and random generation
//! - [`benchmark`] — Named workloads with integer checksums
//! - [`config`] — Serde-backed run configuration
//! - [`error`] — Error types
//!
//! All engines are deterministic and single-threaded. Diagnostics are
//! emitted through `tracing`; install a subscriber to see them.

pub mod benchmark;
pub mod config;
pub mod distance;
pub mod error;
pub mod espprc;
pub mod instance;
pub mod lns;
pub mod local_search;
pub mod maxflow;
pub mod models;

#[cfg(test)]
mod test_utils;
