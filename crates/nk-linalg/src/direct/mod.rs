//! Direct solvers for dense linear systems.
//!
//! * [`solve`], [`determinant`], [`inverse`]: Gaussian elimination with
//!   column partial pivoting
//! * [`LuDecomposition`]: Doolittle factorisation `A = L·U`
//! * [`CholeskyDecomposition`]: `A = L·Lᵗ` for symmetric positive-definite `A`
//!
//! All entry points borrow their inputs and eliminate on private copies.

use crate::matrix::Matrix;
use crate::norms::norm_inf;
use nk_core::{
    ensure,
    errors::{Error, Result},
    Real,
};

mod cholesky;
mod gauss;
mod lu;

pub use cholesky::CholeskyDecomposition;
pub use gauss::{determinant, determinant_or_zero, inverse, solve, solve_matrix};
pub use lu::LuDecomposition;

/// Relative size below which a pivot counts as zero: a pivot `p` taken
/// from original row `r` is rejected when `|p| <= PIVOT_EPSILON · max_j |a[r][j]|`.
///
/// Each row is judged on its own scale, so one large entry elsewhere in the
/// matrix cannot mask a healthy pivot.
pub const PIVOT_EPSILON: Real = 1e-13;

/// Side length of a square matrix, or `NonSquareMatrix`.
pub(crate) fn ensure_square(a: &Matrix) -> Result<usize> {
    ensure!(
        a.is_square(),
        Error::NonSquareMatrix {
            rows: a.rows(),
            cols: a.cols(),
        }
    );
    Ok(a.rows())
}

/// Check that a right-hand side has `n` entries.
pub(crate) fn ensure_rhs(n: usize, b: &[Real]) -> Result<()> {
    ensure!(
        b.len() == n,
        Error::DimensionMismatch {
            expected: (n, 1),
            found: (b.len(), 1),
        }
    );
    Ok(())
}

/// Largest absolute entry of every row: the scale each pivot is judged
/// against.
pub(crate) fn row_scales(a: &Matrix) -> Vec<Real> {
    (0..a.rows()).map(|i| norm_inf(a.row_slice(i))).collect()
}

pub(crate) fn is_negligible_pivot(pivot: Real, scale: Real) -> bool {
    pivot.abs() <= PIVOT_EPSILON * scale
}

/// Solve `L·y = b` for lower-triangular `L`, reading ones on the diagonal
/// when `unit_diagonal` is set.
fn forward_substitute(l: &Matrix, b: &[Real], unit_diagonal: bool) -> Vec<Real> {
    let n = b.len();
    let mut y = vec![0.0; n];
    for i in 0..n {
        let row = l.row_slice(i);
        let s: Real = row[..i].iter().zip(&y).map(|(a, v)| a * v).sum();
        y[i] = if unit_diagonal {
            b[i] - s
        } else {
            (b[i] - s) / row[i]
        };
    }
    y
}

/// Solve `U·x = y` for upper-triangular `U`, from the last row upwards.
fn back_substitute(u: &Matrix, y: &[Real]) -> Vec<Real> {
    let n = y.len();
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let row = u.row_slice(i);
        let s: Real = row[i + 1..].iter().zip(&x[i + 1..]).map(|(a, v)| a * v).sum();
        x[i] = (y[i] - s) / row[i];
    }
    x
}

/// Solve `Lᵗ·x = y` reading the lower-triangular `L` directly.
fn back_substitute_transposed(l: &Matrix, y: &[Real]) -> Vec<Real> {
    let n = y.len();
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let s: Real = (i + 1..n).map(|j| l[(j, i)] * x[j]).sum();
        x[i] = (y[i] - s) / l[(i, i)];
    }
    x
}
