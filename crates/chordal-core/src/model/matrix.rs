//! Dense square strength matrix.

use super::ModelError;

/// A dense, row-major `N×N` matrix of pairwise strengths.
///
/// Values may be signed. The matrix is conceptually symmetric, but symmetry is
/// not enforced: each row describes its own entity, and layout code reads
/// `M[i][j]` for entity `i` and `M[j][i]` for entity `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct StrengthMatrix {
    dim: usize,
    values: Vec<f64>,
}

impl StrengthMatrix {
    /// Creates a matrix from `dim * dim` row-major values.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ValueCount`] if the value count is wrong and
    /// [`ModelError::NonFinite`] if any value is NaN or infinite.
    pub fn new(dim: usize, values: Vec<f64>) -> Result<Self, ModelError> {
        let expected = dim * dim;
        if values.len() != expected {
            return Err(ModelError::ValueCount {
                dim,
                expected,
                actual: values.len(),
            });
        }

        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(ModelError::NonFinite {
                row: pos / dim,
                column: pos % dim,
            });
        }

        Ok(Self { dim, values })
    }

    /// Creates a matrix from nested rows.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotSquare`] if any row length differs from the
    /// number of rows, and [`ModelError::NonFinite`] for NaN or infinite values.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ModelError> {
        let dim = rows.len();
        let mut values = Vec::with_capacity(dim * dim);
        for (row, cells) in rows.into_iter().enumerate() {
            if cells.len() != dim {
                return Err(ModelError::NotSquare {
                    row,
                    expected: dim,
                    actual: cells.len(),
                });
            }
            values.extend(cells);
        }
        Self::new(dim, values)
    }

    /// Creates a `dim × dim` matrix of zeros.
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            values: vec![0.0; dim * dim],
        }
    }

    /// Builds a matrix by evaluating `f(row, column)` for every cell.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NonFinite`] if `f` produces NaN or infinity.
    pub fn from_fn(dim: usize, mut f: impl FnMut(usize, usize) -> f64) -> Result<Self, ModelError> {
        let values = (0..dim * dim).map(|pos| f(pos / dim, pos % dim)).collect();
        Self::new(dim, values)
    }

    /// Number of rows (and columns).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Value at `(row, column)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, row: usize, column: usize) -> f64 {
        assert!(
            row < self.dim && column < self.dim,
            "matrix index ({row}, {column}) out of bounds for dimension {}",
            self.dim
        );
        self.values[row * self.dim + column]
    }

    /// The values of one row.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    pub fn row(&self, row: usize) -> &[f64] {
        assert!(
            row < self.dim,
            "matrix row {row} out of bounds for dimension {}",
            self.dim
        );
        &self.values[row * self.dim..(row + 1) * self.dim]
    }

    /// Sum of absolute values in `row`, diagonal included.
    pub fn row_flow(&self, row: usize) -> f64 {
        self.row(row).iter().map(|v| v.abs()).sum()
    }

    /// Per-row flow for every entity.
    pub fn flows(&self) -> Vec<f64> {
        (0..self.dim).map(|row| self.row_flow(row)).collect()
    }

    /// Returns `true` if `|M[i][j] - M[j][i]| <= tolerance` for every pair.
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        (0..self.dim).all(|i| {
            (i + 1..self.dim).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tolerance)
        })
    }

    /// Extracts the sub-matrix over `indices`, rows and columns alike.
    ///
    /// Callers guarantee every index is in bounds.
    pub(crate) fn select(&self, indices: &[usize]) -> Self {
        let dim = indices.len();
        let mut values = Vec::with_capacity(dim * dim);
        for &row in indices {
            values.extend(indices.iter().map(|&column| self.get(row, column)));
        }
        Self { dim, values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let err = StrengthMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]).unwrap_err();
        assert_eq!(
            err,
            ModelError::NotSquare {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_new_rejects_wrong_value_count() {
        let err = StrengthMatrix::new(2, vec![0.0; 3]).unwrap_err();
        assert!(matches!(
            err,
            ModelError::ValueCount {
                expected: 4,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_new_rejects_non_finite() {
        let err = StrengthMatrix::new(2, vec![0.0, 1.0, f64::NAN, 0.0]).unwrap_err();
        assert_eq!(err, ModelError::NonFinite { row: 1, column: 0 });
    }

    #[test]
    #[should_panic(expected = "matrix row 0 out of bounds for dimension 0")]
    fn test_row_out_of_bounds_panics() {
        StrengthMatrix::zeros(0).row(0);
    }

    #[test]
    fn test_row_flow_uses_absolute_values() {
        let matrix =
            StrengthMatrix::from_rows(vec![vec![1.0, -2.0, 3.0], vec![-2.0, 0.0, 0.0], vec![3.0, 0.0, 0.0]])
                .unwrap();

        assert_eq!(matrix.row_flow(0), 6.0);
        assert_eq!(matrix.flows(), vec![6.0, 2.0, 3.0]);
    }

    #[test]
    fn test_is_symmetric() {
        let symmetric = StrengthMatrix::from_rows(vec![vec![0.0, 2.0], vec![2.0, 0.0]]).unwrap();
        let skewed = StrengthMatrix::from_rows(vec![vec![0.0, 2.0], vec![3.0, 0.0]]).unwrap();

        assert!(symmetric.is_symmetric(0.0));
        assert!(!skewed.is_symmetric(0.5));
        assert!(skewed.is_symmetric(1.0));
    }

    #[test]
    fn test_select_slices_rows_and_columns() {
        let matrix = StrengthMatrix::from_fn(3, |r, c| (r * 3 + c) as f64).unwrap();
        let sub = matrix.select(&[0, 2]);

        assert_eq!(sub.dim(), 2);
        assert_eq!(sub.row(0), &[0.0, 2.0]);
        assert_eq!(sub.row(1), &[6.0, 8.0]);
    }

    #[test]
    fn test_zeros() {
        let matrix = StrengthMatrix::zeros(3);
        assert_eq!(matrix.dim(), 3);
        assert!(matrix.flows().iter().all(|&f| f == 0.0));
    }
}
