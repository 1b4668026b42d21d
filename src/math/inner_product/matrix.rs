//! Dense row-major matrix and the inner product test case.

use crate::error::KernelError;
use crate::math::Element;

/// Dense matrix stored row by row.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Element> Matrix<T> {
    /// Matrix of default (zero) values.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![T::default(); rows * cols],
        }
    }

    /// Build from `f(i, j)` for every cell.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self { rows, cols, data }
    }

    /// Build from nested rows; every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, KernelError> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(KernelError::RaggedMatrix {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            data.extend_from_slice(values);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }
}

impl<T> Matrix<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> &T {
        &self.data[i * self.cols + j]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

/// A matrix and the vector it is multiplied with.
#[derive(Clone, Debug, PartialEq)]
pub struct TestCase<T> {
    pub mat: Matrix<T>,
    pub vec: Vec<T>,
}

impl<T> TestCase<T> {
    /// Fails unless the matrix has one column per vector element.
    pub fn check_dimensions(&self) -> Result<(), KernelError> {
        if self.mat.cols != self.vec.len() {
            return Err(KernelError::DimensionMismatch {
                cols: self.mat.cols,
                len: self.vec.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let m = Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        assert_eq!((m.rows(), m.cols()), (2, 3));
        assert_eq!(m.row(1), &[4, 5, 6]);
        assert_eq!(*m.get(0, 2), 3);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            KernelError::RaggedMatrix {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_from_rows_empty() {
        let m = Matrix::<f64>::from_rows(Vec::new()).unwrap();
        assert_eq!((m.rows(), m.cols()), (0, 0));
    }

    #[test]
    fn test_check_dimensions() {
        let case = TestCase {
            mat: Matrix::<i32>::zeros(2, 3),
            vec: vec![0; 2],
        };
        assert_eq!(
            case.check_dimensions(),
            Err(KernelError::DimensionMismatch { cols: 3, len: 2 })
        );
    }
}
