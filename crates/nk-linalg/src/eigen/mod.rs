//! Eigenvalue solvers.
//!
//! * [`eigen_jacobi`]: classical Jacobi: rotate away the largest
//!   off-diagonal element each iteration
//! * [`eigen_jacobi_threshold`]: threshold ("pass") Jacobi: sweep and
//!   rotate every element above a shrinking threshold
//! * [`power_iteration`]: dominant eigenpair of a general square matrix
//!
//! The Jacobi methods accept symmetric matrices only and return an
//! [`EigenDecomposition`] `A ≈ V·D·Vᵗ`.

use crate::direct::ensure_square;
use crate::matrix::Matrix;
use nk_core::{
    ensure,
    errors::{Error, Result},
    Real,
};

mod jacobi;
mod power;

pub use jacobi::{eigen_jacobi, eigen_jacobi_threshold, ROTATION_RATIO_THRESHOLD};
pub use power::{power_iteration, PowerIteration};

// ─── Result type ──────────────────────────────────────────────────────────────

/// Eigenvalues and eigenvectors of a symmetric matrix.
///
/// `values` is the rotated matrix `D = Vᵗ·A·V`, diagonal up to the
/// convergence tolerance; column `i` of `vectors` pairs with `D[i][i]`.
/// Eigenvalues come out in no particular order.
#[derive(Debug, Clone, PartialEq)]
pub struct EigenDecomposition {
    values: Matrix,
    vectors: Matrix,
    iterations: usize,
}

impl EigenDecomposition {
    /// Eigenvalues, the diagonal of `D`.
    pub fn eigenvalues(&self) -> Vec<Real> {
        self.values.diagonal()
    }

    /// Eigenvalue matrix `D`.
    pub fn values(&self) -> &Matrix {
        &self.values
    }

    /// Orthogonal eigenvector matrix `V`.
    pub fn vectors(&self) -> &Matrix {
        &self.vectors
    }

    /// Rotations (classical) or sweeps (threshold) performed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// `V·D·Vᵗ`, which recovers the input matrix.
    pub fn reconstruct(&self) -> Result<Matrix> {
        self.vectors
            .multiply(&self.values)?
            .multiply(&self.vectors.transpose())
    }

    /// Consume into `(D, V)`.
    pub fn into_parts(self) -> (Matrix, Matrix) {
        (self.values, self.vectors)
    }
}

// ─── Shared helpers ───────────────────────────────────────────────────────────

/// Side length of a square symmetric matrix, else `NonSquareMatrix` /
/// `NotSymmetric`.
fn ensure_symmetric(a: &Matrix) -> Result<usize> {
    let n = ensure_square(a)?;
    ensure!(a.is_symmetric(), Error::NotSymmetric);
    Ok(n)
}

/// Sum of squares of the off-diagonal elements of a symmetric matrix.
fn off_diagonal_sq(b: &Matrix) -> Real {
    let n = b.rows();
    let mut sum = 0.0;
    for i in 0..n {
        for j in i + 1..n {
            sum += b[(i, j)] * b[(i, j)];
        }
    }
    2.0 * sum
}

/// Plane rotation `R'`: the identity except `R'[p][p] = R'[q][q] = cos`,
/// `R'[p][q] = sin`, `R'[q][p] = −sin`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Rotation {
    p: usize,
    q: usize,
    cos: Real,
    sin: Real,
}

impl Rotation {
    /// Rotation that annihilates `b[p][q]` in `R'·B·R'ᵗ` (`p < q`).
    ///
    /// A zero `b[p][q]` gives the identity.
    fn annihilating(b: &Matrix, p: usize, q: usize) -> Self {
        let (apq, app, aqq) = (b[(p, q)], b[(p, p)], b[(q, q)]);
        let (cos, sin) = if apq == 0.0 {
            (1.0, 0.0)
        } else if app == aqq {
            let h = std::f64::consts::FRAC_1_SQRT_2;
            (h, h.copysign(apq))
        } else {
            let tan = if ROTATION_RATIO_THRESHOLD * apq.abs() < (app - aqq).abs() {
                let d = 2.0 * apq / (app - aqq);
                d / (1.0 + (1.0 + d * d).sqrt())
            } else {
                let c = (app - aqq) / (2.0 * apq);
                (1.0 / (c.abs() + (1.0 + c * c).sqrt())).copysign(c)
            };
            let cos = 1.0 / (1.0 + tan * tan).sqrt();
            (cos, tan * cos)
        };
        Self { p, q, cos, sin }
    }

    fn is_identity(&self) -> bool {
        self.sin == 0.0
    }

    /// `B ← R'·B·R'ᵗ` and `V ← V·R'ᵗ`, touching only rows/columns `p`, `q`.
    fn apply(&self, b: &mut Matrix, v: &mut Matrix) {
        let Self { p, q, cos, sin } = *self;
        let n = b.rows();
        for k in 0..n {
            let (bp, bq) = (b[(p, k)], b[(q, k)]);
            b[(p, k)] = cos * bp + sin * bq;
            b[(q, k)] = -sin * bp + cos * bq;
        }
        for k in 0..n {
            let (bp, bq) = (b[(k, p)], b[(k, q)]);
            b[(k, p)] = cos * bp + sin * bq;
            b[(k, q)] = -sin * bp + cos * bq;
            let (vp, vq) = (v[(k, p)], v[(k, q)]);
            v[(k, p)] = cos * vp + sin * vq;
            v[(k, q)] = -sin * vp + cos * vq;
        }
    }
}
