//! A dense, row-major two-dimensional matrix of reals.
//!
//! Every constructor and combinator validates shapes and reports violations
//! through [`Error`]; transformations return new matrices and never touch
//! their operands. Conversions to and from `nalgebra::DMatrix<f64>` are
//! provided for interoperability.

use nalgebra::DMatrix;
use nk_core::{
    ensure,
    errors::{Error, Result},
    Real,
};
use std::ops::{Index, IndexMut, Mul, Neg};

/// A dynamically-sized dense matrix of `Real` values stored row-major.
///
/// The element `(i, j)` lives at `data[i * cols + j]`, and
/// `data.len() == rows * cols` holds for every value of this type.
///
/// A `Matrix` is a plain value: sharing one between threads is fine, but
/// mutating it through `set`/`IndexMut` from several callers needs external
/// synchronization.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "MatrixRepr", into = "MatrixRepr")
)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Real>,
}

impl Matrix {
    /// Create a zero-filled `rows × cols` matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Create an identity matrix of size `n × n`.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        m
    }

    /// Create a square matrix with `diag` on the diagonal.
    pub fn from_diagonal(diag: &[Real]) -> Self {
        let n = diag.len();
        let mut m = Self::zeros(n, n);
        for (i, &d) in diag.iter().enumerate() {
            m.data[i * n + i] = d;
        }
        m
    }

    /// Take ownership of row-major `data` as a `rows × cols` matrix.
    ///
    /// Fails with [`Error::DimensionMismatch`] if `data.len() != rows * cols`,
    /// including when `rows * cols` overflows.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<Real>) -> Result<Self> {
        ensure!(
            rows.checked_mul(cols) == Some(data.len()),
            Error::DimensionMismatch {
                expected: (rows, cols),
                found: (data.len(), 1),
            }
        );
        Ok(Self { rows, cols, data })
    }

    /// Create from a row-major data slice.
    pub fn from_row_slice(rows: usize, cols: usize, data: &[Real]) -> Result<Self> {
        Self::from_vec(rows, cols, data.to_vec())
    }

    /// Create from a slice of rows; every row must have the same length.
    pub fn from_rows<R: AsRef<[Real]>>(rows: &[R]) -> Result<Self> {
        let n = rows.len();
        let m = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(n * m);
        for row in rows {
            let row = row.as_ref();
            ensure!(
                row.len() == m,
                Error::DimensionMismatch {
                    expected: (1, m),
                    found: (1, row.len()),
                }
            );
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: n,
            cols: m,
            data,
        })
    }

    /// Create an `n × 1` column vector.
    pub fn column_vector(values: &[Real]) -> Self {
        Self {
            rows: values.len(),
            cols: 1,
            data: values.to_vec(),
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Return `true` if the matrix is square.
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Return `true` if the matrix is square and equal to its transpose,
    /// compared element by element without tolerance.
    pub fn is_symmetric(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.rows;
        (0..n).all(|i| (i + 1..n).all(|j| self.data[i * n + j] == self.data[j * n + i]))
    }

    /// Row-major elements.
    pub fn as_slice(&self) -> &[Real] {
        &self.data
    }

    /// Consume and return the row-major elements.
    pub fn into_vec(self) -> Vec<Real> {
        self.data
    }

    /// Copy into one `Vec` per row.
    pub fn to_rows(&self) -> Vec<Vec<Real>> {
        (0..self.rows).map(|i| self.row_slice(i).to_vec()).collect()
    }

    fn check_index(&self, row: usize, col: usize) -> Result<usize> {
        ensure!(
            row < self.rows && col < self.cols,
            Error::IndexOutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            }
        );
        Ok(row * self.cols + col)
    }

    /// Element `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<Real> {
        let k = self.check_index(row, col)?;
        Ok(self.data[k])
    }

    /// Overwrite element `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: Real) -> Result<()> {
        let k = self.check_index(row, col)?;
        self.data[k] = value;
        Ok(())
    }

    /// Copy of row `i`.
    pub fn row(&self, i: usize) -> Result<Vec<Real>> {
        self.check_index(i, 0)?;
        Ok(self.row_slice(i).to_vec())
    }

    /// Copy of column `j`.
    pub fn column(&self, j: usize) -> Result<Vec<Real>> {
        self.check_index(0, j)?;
        Ok((0..self.rows).map(|i| self.data[i * self.cols + j]).collect())
    }

    /// Borrow row `i`. Panics if `i` is out of range.
    pub(crate) fn row_slice(&self, i: usize) -> &[Real] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Swap rows `a` and `b` in place. Panics if either is out of range.
    pub(crate) fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let c = self.cols;
        let (head, tail) = self.data.split_at_mut(hi * c);
        head[lo * c..(lo + 1) * c].swap_with_slice(&mut tail[..c]);
    }

    /// Transpose.
    pub fn transpose(&self) -> Self {
        let mut t = Self::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                t.data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        t
    }

    fn ensure_same_shape(&self, other: &Matrix) -> Result<()> {
        ensure!(
            self.shape() == other.shape(),
            Error::DimensionMismatch {
                expected: self.shape(),
                found: other.shape(),
            }
        );
        Ok(())
    }

    /// Element-wise sum `self + other`.
    pub fn add(&self, other: &Matrix) -> Result<Self> {
        self.ensure_same_shape(other)?;
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| a + b)
            .collect();
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    /// Element-wise difference `self - other`.
    pub fn subtract(&self, other: &Matrix) -> Result<Self> {
        self.ensure_same_shape(other)?;
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| a - b)
            .collect();
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    /// Multiply every element by `scalar`.
    pub fn scale(&self, scalar: Real) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|x| x * scalar).collect(),
        }
    }

    /// Matrix product `self · other`.
    ///
    /// Fails with [`Error::DimensionMismatch`] if `self.cols() != other.rows()`.
    pub fn multiply(&self, other: &Matrix) -> Result<Self> {
        ensure!(
            self.cols == other.rows,
            Error::DimensionMismatch {
                expected: (self.cols, other.cols),
                found: other.shape(),
            }
        );
        let mut out = Self::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.data[i * self.cols + k];
                if a == 0.0 {
                    continue;
                }
                let src = other.row_slice(k);
                let dst = &mut out.data[i * other.cols..(i + 1) * other.cols];
                for (d, s) in dst.iter_mut().zip(src) {
                    *d += a * s;
                }
            }
        }
        Ok(out)
    }

    /// Matrix-vector product `self · v`.
    pub fn mul_vec(&self, v: &[Real]) -> Result<Vec<Real>> {
        ensure!(
            self.cols == v.len(),
            Error::DimensionMismatch {
                expected: (self.cols, 1),
                found: (v.len(), 1),
            }
        );
        Ok((0..self.rows)
            .map(|i| self.row_slice(i).iter().zip(v).map(|(a, x)| a * x).sum())
            .collect())
    }

    /// Diagonal elements.
    pub fn diagonal(&self) -> Vec<Real> {
        let n = self.rows.min(self.cols);
        (0..n).map(|i| self.data[i * self.cols + i]).collect()
    }

    /// Trace (sum of diagonal elements).
    pub fn trace(&self) -> Real {
        self.diagonal().iter().sum()
    }

    /// Copy into a column-major `nalgebra::DMatrix`.
    pub fn to_dmatrix(&self) -> DMatrix<Real> {
        DMatrix::from_row_slice(self.rows, self.cols, &self.data)
    }
}

/// Cross product of two 3-vectors.
pub fn cross(a: &[Real], b: &[Real]) -> Result<[Real; 3]> {
    ensure!(
        a.len() == 3 && b.len() == 3,
        Error::DimensionMismatch {
            expected: (3, 1),
            found: (if a.len() != 3 { a.len() } else { b.len() }, 1),
        }
    );
    Ok([
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ])
}

// ── From / Into ───────────────────────────────────────────────────────────────

impl From<DMatrix<Real>> for Matrix {
    fn from(m: DMatrix<Real>) -> Self {
        let (rows, cols) = m.shape();
        // nalgebra is column-major; its transpose's storage is our row-major order
        let data = m.transpose().as_slice().to_vec();
        Self { rows, cols, data }
    }
}

impl From<&Matrix> for DMatrix<Real> {
    fn from(m: &Matrix) -> Self {
        m.to_dmatrix()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct MatrixRepr {
    rows: usize,
    cols: usize,
    data: Vec<Real>,
}

#[cfg(feature = "serde")]
impl TryFrom<MatrixRepr> for Matrix {
    type Error = Error;
    fn try_from(r: MatrixRepr) -> Result<Self> {
        Matrix::from_vec(r.rows, r.cols, r.data)
    }
}

#[cfg(feature = "serde")]
impl From<Matrix> for MatrixRepr {
    fn from(m: Matrix) -> Self {
        Self {
            rows: m.rows,
            cols: m.cols,
            data: m.data,
        }
    }
}

// ── Indexing ──────────────────────────────────────────────────────────────────

impl Index<(usize, usize)> for Matrix {
    type Output = Real;
    /// Unchecked-by-`Result` access; panics when out of range.
    fn index(&self, (i, j): (usize, usize)) -> &Real {
        assert!(
            i < self.rows && j < self.cols,
            "index ({i}, {j}) out of range for {}×{} matrix",
            self.rows,
            self.cols
        );
        &self.data[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Real {
        assert!(
            i < self.rows && j < self.cols,
            "index ({i}, {j}) out of range for {}×{} matrix",
            self.rows,
            self.cols
        );
        &mut self.data[i * self.cols + j]
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────────

impl Mul<Real> for &Matrix {
    type Output = Matrix;
    fn mul(self, rhs: Real) -> Matrix {
        self.scale(rhs)
    }
}

impl Mul<Real> for Matrix {
    type Output = Matrix;
    fn mul(self, rhs: Real) -> Matrix {
        self.scale(rhs)
    }
}

impl Neg for &Matrix {
    type Output = Matrix;
    fn neg(self) -> Matrix {
        self.scale(-1.0)
    }
}

impl Neg for Matrix {
    type Output = Matrix;
    fn neg(self) -> Matrix {
        self.scale(-1.0)
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

impl std::fmt::Display for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.rows {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[")?;
            for j in 0..self.cols {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.data[i * self.cols + j])?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}
