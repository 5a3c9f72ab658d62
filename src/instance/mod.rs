//! Benchmark instances: a distance matrix plus starting tours.
//!
//! # Format
//!
//! Whitespace-separated text; `#` starts a comment that runs to the end of
//! the line.
//!
//! ```text
//! # n n_solutions
//! 4 1
//! # n x n distance matrix
//! 0 1 3 2
//! 1 0 1 2
//! 3 1 0 1
//! 2 2 1 0
//! # set of given starting solutions
//! 0 1 2 3 0
//! ```
//!
//! The header gives the node count `n` and the number of tours. The matrix
//! follows in row-major order, then each tour as `n + 1` node indices.
//! Line breaks carry no meaning.

mod generate;
mod parse;

pub use generate::{generate, generate_seeded};
pub use parse::ParseError;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::error::{Result, RoutingError};
use crate::models::Tour;

/// A distance matrix with a set of tours over its nodes.
///
/// # Examples
///
/// ```
/// use u_tourkit::instance::Instance;
///
/// let instance: Instance = "2 1\n0 5\n5 0\n0 1 0".parse().unwrap();
/// assert_eq!(instance.num_nodes(), 2);
/// assert_eq!(instance.tours()[0].cost(instance.distances()), 10.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "InstanceRepr")]
pub struct Instance {
    distances: DistanceMatrix,
    tours: Vec<Tour>,
}

#[derive(Deserialize)]
struct InstanceRepr {
    distances: DistanceMatrix,
    tours: Vec<Tour>,
}

impl TryFrom<InstanceRepr> for Instance {
    type Error = RoutingError;

    fn try_from(repr: InstanceRepr) -> Result<Self> {
        Self::new(repr.distances, repr.tours)
    }
}

impl Instance {
    /// Pairs a matrix with tours over its nodes.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::MatrixSize`] if any tour covers a different
    /// node count than the matrix.
    pub fn new(distances: DistanceMatrix, tours: Vec<Tour>) -> Result<Self> {
        for tour in &tours {
            tour.ensure_covers(distances.size())?;
        }
        Ok(Self { distances, tours })
    }

    pub(crate) fn from_parts(distances: DistanceMatrix, tours: Vec<Tour>) -> Self {
        debug_assert!(tours.iter().all(|t| t.num_nodes() == distances.size()));
        Self { distances, tours }
    }

    /// Reads an instance from text.
    pub fn parse(text: &str) -> std::result::Result<Self, ParseError> {
        parse::parse(text)
    }

    /// Reads an instance file.
    pub fn from_file(path: impl AsRef<Path>) -> std::result::Result<Self, ParseError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.distances.size()
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    pub fn tours(&self) -> &[Tour] {
        &self.tours
    }

    /// The matrix alongside mutable tours, for improving tours against it.
    ///
    /// Tours may be changed in place; their node set cannot change.
    pub fn split_mut(&mut self) -> (&DistanceMatrix, &mut [Tour]) {
        (&self.distances, &mut self.tours)
    }
}

impl FromStr for Instance {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, ParseError> {
        Self::parse(s)
    }
}

/// Writes the text format, readable back with [`Instance::parse`].
impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# n n_solutions")?;
        writeln!(f, "{} {}", self.num_nodes(), self.tours.len())?;
        writeln!(f, "# n x n distance matrix")?;
        for i in 0..self.num_nodes() {
            write_row(f, self.distances.row(i))?;
        }
        writeln!(f, "# set of given starting solutions")?;
        for tour in &self.tours {
            write_row(f, tour.nodes())?;
        }
        Ok(())
    }
}

fn write_row<T: fmt::Display>(f: &mut fmt::Formatter<'_>, values: &[T]) -> fmt::Result {
    for (k, value) in values.iter().enumerate() {
        if k > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{value}")?;
    }
    writeln!(f)
}
