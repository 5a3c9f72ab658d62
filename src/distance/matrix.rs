//! Dense distance matrix.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RoutingError};

use super::DistanceOracle;

/// A dense n×n cost matrix stored in row-major order.
///
/// Holds travel distances as well as the auxiliary graphs derived from a
/// tour (reduced costs, arc capacities, flows), so entries may be negative.
///
/// # Examples
///
/// ```
/// use u_tourkit::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(&[
///     vec![0.0, 5.0, 8.0],
///     vec![5.0, 0.0, 4.0],
///     vec![8.0, 4.0, 0.0],
/// ])
/// .unwrap();
/// assert_eq!(dm.get(0, 1), 5.0);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Creates a distance matrix from an explicit row-major n×n grid.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::MatrixData`] if the data length doesn't match
    /// `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self> {
        let expected = size * size;
        if data.len() != expected {
            return Err(RoutingError::MatrixData {
                size,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, size })
    }

    /// Creates a distance matrix from nested rows.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::MatrixSize`] if any row length differs from
    /// the number of rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for row in rows {
            if row.len() != size {
                return Err(RoutingError::MatrixSize {
                    expected: size,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self { data, size })
    }

    /// Builds a matrix by evaluating `f(i, j)` for every ordered pair.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(size * size);
        for i in 0..size {
            for j in 0..size {
                data.push(f(i, j));
            }
        }
        Self { data, size }
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    #[inline]
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Overwrites every entry with `value`.
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns row `from` as a slice.
    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.size..(from + 1) * self.size]
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}

impl TryFrom<Vec<Vec<f64>>> for DistanceMatrix {
    type Error = RoutingError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::from_rows(&rows)
    }
}

impl From<DistanceMatrix> for Vec<Vec<f64>> {
    fn from(matrix: DistanceMatrix) -> Self {
        (0..matrix.size).map(|i| matrix.row(i).to_vec()).collect()
    }
}

impl DistanceOracle for DistanceMatrix {
    #[inline]
    fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn get(&self, from: usize, to: usize) -> f64 {
        DistanceMatrix::get(self, from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DistanceMatrix {
        DistanceMatrix::from_rows(&[
            vec![0.0, 5.0, 8.0],
            vec![5.0, 0.0, 4.0],
            vec![8.0, 4.0, 0.0],
        ])
        .expect("square rows")
    }

    #[test]
    fn test_from_rows() {
        let dm = sample();
        assert_eq!(dm.size(), 3);
        assert_eq!(dm.get(0, 2), 8.0);
        assert_eq!(dm.row(1), &[5.0, 0.0, 4.0]);
    }

    #[test]
    fn test_from_rows_ragged() {
        let err = DistanceMatrix::from_rows(&[vec![0.0, 1.0], vec![1.0]]).unwrap_err();
        assert_eq!(
            err,
            RoutingError::MatrixSize {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_symmetric() {
        assert!(sample().is_symmetric(1e-10));
    }

    #[test]
    fn test_from_data() {
        let dm = DistanceMatrix::from_data(2, vec![0.0, 5.0, 5.0, 0.0]).expect("valid");
        assert_eq!(dm.get(0, 1), 5.0);
        assert_eq!(dm.get(1, 0), 5.0);
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert!(matches!(
            DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0]),
            Err(RoutingError::MatrixData { expected: 4, .. })
        ));
    }

    #[test]
    fn test_set_get_fill() {
        let mut dm = DistanceMatrix::new(3);
        dm.set(0, 1, 42.0);
        assert_eq!(dm.get(0, 1), 42.0);
        assert_eq!(dm.get(1, 0), 0.0);
        dm.fill(1.5);
        assert_eq!(dm.get(2, 2), 1.5);
    }

    #[test]
    fn test_min_outgoing() {
        let dm = sample();
        assert_eq!(dm.min_outgoing(0), Some(5.0));
        assert_eq!(dm.min_outgoing(2), Some(4.0));
        assert_eq!(DistanceMatrix::new(1).min_outgoing(0), None);
    }

    #[test]
    fn test_serde_as_rows() {
        let json = serde_json::to_string(&sample()).expect("serialize");
        assert_eq!(json, "[[0.0,5.0,8.0],[5.0,0.0,4.0],[8.0,4.0,0.0]]");
        let back: DistanceMatrix = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, sample());
        assert!(serde_json::from_str::<DistanceMatrix>("[[0.0],[1.0]]").is_err());
    }

    #[test]
    fn test_asymmetric_matrix() {
        let dm = DistanceMatrix::from_fn(2, |i, j| if i < j { 10.0 } else { 15.0 });
        assert!(!dm.is_symmetric(1e-10));
    }
}
