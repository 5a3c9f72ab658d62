//! Precondition failures raised by the optimization core.

use thiserror::Error;

/// Structural precondition violated by input handed to the core.
///
/// Running out of improving moves or augmenting paths is normal termination
/// and never surfaces as an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    #[error("distance matrix expects {expected} entries for {size} nodes, got {actual}")]
    MatrixData {
        size: usize,
        expected: usize,
        actual: usize,
    },

    #[error("matrix covers {actual} nodes but {expected} were declared")]
    MatrixSize { expected: usize, actual: usize },

    #[error("tour must hold {expected} node indices, got {actual}")]
    TourLength { expected: usize, actual: usize },

    #[error("tour must start and end at depot {depot}, got {first} .. {last}")]
    TourEndpoints {
        depot: usize,
        first: usize,
        last: usize,
    },

    #[error("node {node} is out of range for {size} nodes")]
    NodeOutOfRange { node: usize, size: usize },

    #[error("node {node} appears more than once in the tour")]
    DuplicateNode { node: usize },

    #[error("resource dimension mismatch: expected {expected}, got {actual}")]
    ResourceDimension { expected: usize, actual: usize },
}

/// Convenience alias for core results.
pub type Result<T> = std::result::Result<T, RoutingError>;
