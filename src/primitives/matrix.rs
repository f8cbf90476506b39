//! Matrix type for 2D numeric data.

use super::Vector;
use serde::{Deserialize, Serialize};

/// A 2D matrix of values (row-major storage).
///
/// Throughout the attack pipeline a matrix is a batch: row i is sample i,
/// and stays sample i for the whole run. The same type carries per-class
/// score matrices (`n_samples × n_classes`) and one-hot label matrices.
///
/// # Examples
///
/// ```
/// use adversario::primitives::Matrix;
///
/// let batch = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
/// assert_eq!(batch.shape(), (2, 3));
/// assert_eq!(batch.row(1).as_slice(), &[4.0, 5.0, 6.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Copy> Matrix<T> {
    /// Creates a new matrix from a vector of data.
    ///
    /// # Errors
    ///
    /// Returns an error if data length doesn't match rows * cols.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, &'static str> {
        if data.len() != rows * cols {
            return Err("Data length must equal rows * cols");
        }
        Ok(Self { data, rows, cols })
    }

    /// Returns the shape as (rows, cols).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// Gets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    /// Sets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.cols + col] = value;
    }

    /// Returns a row as a Vector.
    ///
    /// # Panics
    ///
    /// Panics if `row_idx` is out of bounds.
    #[must_use]
    pub fn row(&self, row_idx: usize) -> Vector<T> {
        let start = row_idx * self.cols;
        let end = start + self.cols;
        Vector::from_slice(&self.data[start..end])
    }

    /// Overwrites a row from a slice.
    ///
    /// # Panics
    ///
    /// Panics if `row_idx` is out of bounds or the slice length differs
    /// from the column count.
    pub fn set_row(&mut self, row_idx: usize, values: &[T]) {
        assert_eq!(values.len(), self.cols, "set_row: length mismatch");
        let start = row_idx * self.cols;
        self.data[start..start + self.cols].copy_from_slice(values);
    }

    /// Returns the underlying data as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns the underlying data as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl Matrix<f32> {
    /// Creates a matrix of zeros.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Element-wise addition.
    ///
    /// # Errors
    ///
    /// Returns an error if shapes don't match.
    pub fn add(&self, other: &Self) -> Result<Self, &'static str> {
        if self.shape() != other.shape() {
            return Err("Matrix shapes don't match for addition");
        }
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a + b)
            .collect();
        Ok(Self {
            data,
            rows: self.rows,
            cols: self.cols,
        })
    }

    /// Element-wise subtraction.
    ///
    /// # Errors
    ///
    /// Returns an error if shapes don't match.
    pub fn sub(&self, other: &Self) -> Result<Self, &'static str> {
        if self.shape() != other.shape() {
            return Err("Matrix shapes don't match for subtraction");
        }
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a - b)
            .collect();
        Ok(Self {
            data,
            rows: self.rows,
            cols: self.cols,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec_shape() {
        let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.n_rows(), 2);
        assert_eq!(m.n_cols(), 3);
    }

    #[test]
    fn test_from_vec_rejects_bad_length() {
        let result = Matrix::from_vec(2, 3, vec![1.0, 2.0]);
        assert!(result.is_err());
    }

    #[test]
    fn test_get_set() {
        let mut m = Matrix::zeros(2, 2);
        m.set(1, 0, 7.0);
        assert_eq!(m.get(1, 0), 7.0);
        assert_eq!(m.get(0, 0), 0.0);
    }

    #[test]
    fn test_row_roundtrip() {
        let mut m = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(m.row(0).as_slice(), &[1.0, 2.0]);
        m.set_row(0, &[9.0, 8.0]);
        assert_eq!(m.row(0).as_slice(), &[9.0, 8.0]);
        assert_eq!(m.row(1).as_slice(), &[3.0, 4.0]);
    }

    #[test]
    #[should_panic(expected = "set_row: length mismatch")]
    fn test_set_row_length_mismatch_panics() {
        let mut m = Matrix::zeros(1, 3);
        m.set_row(0, &[1.0]);
    }

    #[test]
    fn test_add() {
        let a = Matrix::from_vec(1, 2, vec![1.0, 2.0]).unwrap();
        let b = Matrix::from_vec(1, 2, vec![0.5, -0.5]).unwrap();
        let sum = a.add(&b).unwrap();
        assert_eq!(sum.as_slice(), &[1.5, 1.5]);
    }

    #[test]
    fn test_sub() {
        let a = Matrix::from_vec(2, 2, vec![5.0, 5.0, 5.0, 5.0]).unwrap();
        let b = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let diff = a.sub(&b).unwrap();
        assert_eq!(diff.as_slice(), &[4.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_sub_shape_mismatch() {
        let a = Matrix::zeros(2, 2);
        let b = Matrix::zeros(2, 3);
        assert!(a.sub(&b).is_err());
    }

    #[test]
    fn test_clone_is_independent() {
        let a = Matrix::from_vec(1, 2, vec![1.0, 2.0]).unwrap();
        let mut b = a.clone();
        b.set(0, 0, 99.0);
        assert_eq!(a.get(0, 0), 1.0);
    }
}
