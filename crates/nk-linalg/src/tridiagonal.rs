//! Tridiagonal systems and the Thomas ("chasing") algorithm.
//!
//! * [`TridiagonalSystem`]: banded storage with an O(n) solver
//! * [`solve_tridiagonal`]: convenience entry point for a dense matrix
//!
//! The forward sweep has no pivoting, so the coefficient matrix should be
//! strictly diagonally dominant; other inputs may lose accuracy.

use crate::direct::{ensure_rhs, ensure_square, is_negligible_pivot};
use crate::matrix::Matrix;
use nk_core::{
    ensure,
    errors::{Error, Result},
    Real,
};

// ─── Banded storage ───────────────────────────────────────────────────────────

/// A tridiagonal matrix held as three bands of equal length `n`.
///
/// Row `i` reads `lower[i]·x[i−1] + diag[i]·x[i] + upper[i]·x[i+1]`, so
/// `lower[0]` and `upper[n−1]` are never used.
#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalSystem {
    lower: Vec<Real>,
    diag: Vec<Real>,
    upper: Vec<Real>,
}

impl TridiagonalSystem {
    /// Build from three bands of equal length.
    pub fn from_bands(lower: Vec<Real>, diag: Vec<Real>, upper: Vec<Real>) -> Result<Self> {
        let n = diag.len();
        for band in [&lower, &upper] {
            ensure!(
                band.len() == n,
                Error::DimensionMismatch {
                    expected: (n, 1),
                    found: (band.len(), 1),
                }
            );
        }
        Ok(Self { lower, diag, upper })
    }

    /// Read the sub-, main and super-diagonal of a square matrix; every
    /// other entry is ignored.
    pub fn from_matrix(a: &Matrix) -> Result<Self> {
        let n = ensure_square(a)?;
        let mut system = Self {
            lower: vec![0.0; n],
            diag: vec![0.0; n],
            upper: vec![0.0; n],
        };
        for i in 0..n {
            system.diag[i] = a[(i, i)];
            if i > 0 {
                system.lower[i] = a[(i, i - 1)];
            }
            if i + 1 < n {
                system.upper[i] = a[(i, i + 1)];
            }
        }
        Ok(system)
    }

    /// Size (number of rows/columns).
    pub fn size(&self) -> usize {
        self.diag.len()
    }

    /// Sub-diagonal band (`lower[0]` unused).
    pub fn lower(&self) -> &[Real] {
        &self.lower
    }

    /// Main diagonal.
    pub fn diag(&self) -> &[Real] {
        &self.diag
    }

    /// Super-diagonal band (`upper[n−1]` unused).
    pub fn upper(&self) -> &[Real] {
        &self.upper
    }

    /// Dense copy.
    pub fn to_matrix(&self) -> Matrix {
        let n = self.size();
        let mut a = Matrix::zeros(n, n);
        for i in 0..n {
            a[(i, i)] = self.diag[i];
            if i > 0 {
                a[(i, i - 1)] = self.lower[i];
            }
            if i + 1 < n {
                a[(i, i + 1)] = self.upper[i];
            }
        }
        a
    }

    /// Apply the operator: `y = A·x`.
    pub fn apply(&self, x: &[Real]) -> Result<Vec<Real>> {
        let n = self.size();
        ensure_rhs(n, x)?;
        Ok((0..n)
            .map(|i| {
                let mut y = self.diag[i] * x[i];
                if i > 0 {
                    y += self.lower[i] * x[i - 1];
                }
                if i + 1 < n {
                    y += self.upper[i] * x[i + 1];
                }
                y
            })
            .collect())
    }

    /// Solve `A·x = rhs` with the Thomas algorithm in O(n).
    ///
    /// Forward sweep: `γ₀ = d₀`, `δ₀ = u₀/γ₀`, `γᵢ = dᵢ − lᵢ·δᵢ₋₁`,
    /// `δᵢ = uᵢ/γᵢ`, with `yᵢ = (rhsᵢ − lᵢ·yᵢ₋₁)/γᵢ`. Back substitution:
    /// `xₙ₋₁ = yₙ₋₁`, `xᵢ = yᵢ − δᵢ·xᵢ₊₁`.
    ///
    /// # Errors
    /// `DimensionMismatch` if `rhs.len() != size()`, `SingularMatrix` if
    /// some `γᵢ` vanishes relative to the entries of row `i`.
    pub fn solve(&self, rhs: &[Real]) -> Result<Vec<Real>> {
        let n = self.size();
        ensure_rhs(n, rhs)?;
        if n == 0 {
            return Ok(Vec::new());
        }
        let mut delta = vec![0.0; n];
        let mut y = vec![0.0; n];
        for i in 0..n {
            let (gamma, carried) = if i == 0 {
                (self.diag[0], rhs[0])
            } else {
                (
                    self.diag[i] - self.lower[i] * delta[i - 1],
                    rhs[i] - self.lower[i] * y[i - 1],
                )
            };
            let mut scale = self.diag[i].abs();
            if i > 0 {
                scale = scale.max(self.lower[i].abs());
            }
            if i + 1 < n {
                scale = scale.max(self.upper[i].abs());
            }
            if is_negligible_pivot(gamma, scale) {
                return Err(Error::SingularMatrix { pivot: i });
            }
            if i + 1 < n {
                delta[i] = self.upper[i] / gamma;
            }
            y[i] = carried / gamma;
        }

        let mut x = y;
        for i in (0..n - 1).rev() {
            x[i] -= delta[i] * x[i + 1];
        }
        Ok(x)
    }
}

/// Solve `A·x = b` for a tridiagonal square `a`, reading only its three
/// central bands.
///
/// # Example
/// ```
/// use nk_linalg::{tridiagonal::solve_tridiagonal, Matrix};
/// let a = Matrix::from_row_slice(3, 3, &[4.0, -1.0, 0.0, -1.0, 4.0, -1.0, 0.0, -1.0, 4.0]).unwrap();
/// let x = solve_tridiagonal(&a, &[1.0, 4.0, -3.0]).unwrap();
/// assert!((x[0] - 0.5).abs() < 1e-12);
/// assert!((x[1] - 1.0).abs() < 1e-12);
/// assert!((x[2] + 0.5).abs() < 1e-12);
/// ```
pub fn solve_tridiagonal(a: &Matrix, b: &[Real]) -> Result<Vec<Real>> {
    TridiagonalSystem::from_matrix(a)?.solve(b)
}
