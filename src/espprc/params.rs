//! ESPPRC instance parameters and per-node resource demands.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RoutingError};

/// Bounds a path must respect.
///
/// The number of resources is `capacities.len()`; it must match the
/// [`ResourceDemands`] handed to the solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EspprcParams {
    /// Start and end node of every path.
    pub depot: usize,
    /// Upper bound on cumulative length.
    pub max_length: f64,
    /// Upper bound on cumulative consumption of each resource.
    pub capacities: Vec<u32>,
}

impl EspprcParams {
    /// Parameters with `resources` dimensions sharing one capacity.
    pub fn uniform(depot: usize, max_length: f64, resources: usize, capacity: u32) -> Self {
        Self {
            depot,
            max_length,
            capacities: vec![capacity; resources],
        }
    }

    /// Number of resource dimensions.
    pub fn num_resources(&self) -> usize {
        self.capacities.len()
    }
}

/// Units of each resource consumed on arrival at each node.
///
/// # Examples
///
/// ```
/// use u_tourkit::espprc::ResourceDemands;
///
/// // Node 6 = 0b110 consumes resources 1 and 2.
/// let demands = ResourceDemands::from_index_bits(8, 3);
/// assert_eq!(demands.of(6), &[0, 1, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDemands {
    data: Vec<u32>,
    nodes: usize,
    resources: usize,
}

impl ResourceDemands {
    /// Wraps an explicit row-major `nodes × resources` table.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::ResourceDimension`] if `data` has the wrong length.
    pub fn new(nodes: usize, resources: usize, data: Vec<u32>) -> Result<Self> {
        if data.len() != nodes * resources {
            return Err(RoutingError::ResourceDimension {
                expected: nodes * resources,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            nodes,
            resources,
        })
    }

    /// No node consumes anything.
    pub fn zero(nodes: usize, resources: usize) -> Self {
        Self {
            data: vec![0; nodes * resources],
            nodes,
            resources,
        }
    }

    /// Node `v` consumes one unit of resource `r` iff bit `r` of `v` is set.
    pub fn from_index_bits(nodes: usize, resources: usize) -> Self {
        let mut data = Vec::with_capacity(nodes * resources);
        for node in 0..nodes {
            for r in 0..resources {
                let bit = u32::try_from(r)
                    .ok()
                    .and_then(|shift| node.checked_shr(shift))
                    .map_or(0, |v| v & 1);
                data.push(bit as u32);
            }
        }
        Self {
            data,
            nodes,
            resources,
        }
    }

    /// Number of nodes covered.
    pub fn num_nodes(&self) -> usize {
        self.nodes
    }

    /// Number of resource dimensions.
    pub fn num_resources(&self) -> usize {
        self.resources
    }

    /// Demand vector of `node`.
    pub fn of(&self, node: usize) -> &[u32] {
        &self.data[node * self.resources..(node + 1) * self.resources]
    }
}
