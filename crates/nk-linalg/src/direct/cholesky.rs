//! Cholesky (square-root) factorisation of symmetric positive-definite
//! matrices.

use super::{back_substitute_transposed, ensure_rhs, ensure_square, forward_substitute};
use crate::matrix::Matrix;
use nk_core::{
    errors::{Error, Result},
    Real,
};

/// `A = L·Lᵗ` with lower-triangular `L`.
#[derive(Debug, Clone, PartialEq)]
pub struct CholeskyDecomposition {
    l: Matrix,
}

impl CholeskyDecomposition {
    /// Factorise `a`, which must be symmetric positive-definite.
    ///
    /// Symmetry is not checked: only the lower triangle of `a` is read.
    /// A non-positive radicand under `L[k][k] = √(A[k][k] − Σ_{m<k} L[k][m]²)`
    /// is how an indefinite matrix shows itself.
    ///
    /// # Errors
    /// `NonSquareMatrix`, and `NotPositiveDefinite { index: k }` for the
    /// first diagonal whose radicand is not positive.
    pub fn new(a: &Matrix) -> Result<Self> {
        let n = ensure_square(a)?;
        let mut l = Matrix::zeros(n, n);

        for k in 0..n {
            let radicand = a[(k, k)] - (0..k).map(|m| l[(k, m)] * l[(k, m)]).sum::<Real>();
            if !(radicand > 0.0) {
                log::debug!("cholesky: radicand {radicand} at diagonal {k}");
                return Err(Error::NotPositiveDefinite { index: k });
            }
            let lkk = radicand.sqrt();
            l[(k, k)] = lkk;
            for j in k + 1..n {
                let s: Real = (0..k).map(|m| l[(k, m)] * l[(j, m)]).sum();
                l[(j, k)] = (a[(j, k)] - s) / lkk;
            }
        }

        Ok(Self { l })
    }

    /// Lower-triangular factor.
    pub fn l(&self) -> &Matrix {
        &self.l
    }

    /// Consume into `L`.
    pub fn into_l(self) -> Matrix {
        self.l
    }

    /// Solve `A·x = b` via `L·y = b` then `Lᵗ·x = y`.
    pub fn solve(&self, b: &[Real]) -> Result<Vec<Real>> {
        ensure_rhs(self.l.rows(), b)?;
        let y = forward_substitute(&self.l, b, false);
        Ok(back_substitute_transposed(&self.l, &y))
    }
}
