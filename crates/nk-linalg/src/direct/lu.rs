//! Doolittle LU factorisation.

use super::{
    back_substitute, ensure_rhs, ensure_square, forward_substitute, is_negligible_pivot,
    row_scales,
};
use crate::matrix::Matrix;
use nk_core::{
    errors::{Error, Result},
    Real,
};

/// `A = L·U` with unit lower-triangular `L` and upper-triangular `U`,
/// computed without pivoting.
#[derive(Debug, Clone, PartialEq)]
pub struct LuDecomposition {
    l: Matrix,
    u: Matrix,
}

impl LuDecomposition {
    /// Factorise a square matrix.
    ///
    /// Row `k` of `U` and column `k` of `L` are produced in turn:
    /// `U[k][j] = A[k][j] − Σ_{m<k} L[k][m]·U[m][j]` for `j ≥ k`, then
    /// `L[i][k] = (A[i][k] − Σ_{m<k} L[i][m]·U[m][k]) / U[k][k]` for `i > k`.
    ///
    /// # Errors
    /// `NonSquareMatrix`, and `SingularMatrix { pivot: k }` when `U[k][k]`
    /// is numerically zero relative to row `k` of `A`. Matrices that need row exchanges to factorise
    /// land here too; use [`solve`](super::solve) for those.
    pub fn new(a: &Matrix) -> Result<Self> {
        let n = ensure_square(a)?;
        let scales = row_scales(a);
        let mut l = Matrix::identity(n);
        let mut u = Matrix::zeros(n, n);

        for k in 0..n {
            for j in k..n {
                let s: Real = (0..k).map(|m| l[(k, m)] * u[(m, j)]).sum();
                u[(k, j)] = a[(k, j)] - s;
            }
            let pivot = u[(k, k)];
            if is_negligible_pivot(pivot, scales[k]) {
                return Err(Error::SingularMatrix { pivot: k });
            }
            for i in k + 1..n {
                let s: Real = (0..k).map(|m| l[(i, m)] * u[(m, k)]).sum();
                l[(i, k)] = (a[(i, k)] - s) / pivot;
            }
        }

        Ok(Self { l, u })
    }

    /// Unit lower-triangular factor.
    pub fn l(&self) -> &Matrix {
        &self.l
    }

    /// Upper-triangular factor.
    pub fn u(&self) -> &Matrix {
        &self.u
    }

    /// Consume into `(L, U)`.
    pub fn into_parts(self) -> (Matrix, Matrix) {
        (self.l, self.u)
    }

    /// Solve `A·x = b` by forward substitution on `L` and back substitution
    /// on `U`.
    pub fn solve(&self, b: &[Real]) -> Result<Vec<Real>> {
        ensure_rhs(self.u.rows(), b)?;
        let y = forward_substitute(&self.l, b, true);
        Ok(back_substitute(&self.u, &y))
    }

    /// `det(A)`, the product of `U`'s diagonal.
    pub fn determinant(&self) -> Real {
        self.u.diagonal().iter().product()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::matrices_close;
    use approx::assert_abs_diff_eq;

    #[test]
    fn factorises_textbook_example() {
        let a = Matrix::from_row_slice(3, 3, &[2.0, 1.0, 1.0, 4.0, 3.0, 3.0, 8.0, 7.0, 9.0]).unwrap();
        let lu = LuDecomposition::new(&a).unwrap();
        let expected_l =
            Matrix::from_row_slice(3, 3, &[1.0, 0.0, 0.0, 2.0, 1.0, 0.0, 4.0, 3.0, 1.0]).unwrap();
        let expected_u =
            Matrix::from_row_slice(3, 3, &[2.0, 1.0, 1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 2.0]).unwrap();
        assert!(matrices_close(lu.l(), &expected_l, 1e-12));
        assert!(matrices_close(lu.u(), &expected_u, 1e-12));
        assert!(matrices_close(&lu.l().multiply(lu.u()).unwrap(), &a, 1e-12));
        assert_abs_diff_eq!(lu.determinant(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn solve_with_factors() {
        let a = Matrix::from_row_slice(2, 2, &[4.0, 3.0, 6.0, 3.0]).unwrap();
        let lu = LuDecomposition::new(&a).unwrap();
        let x = lu.solve(&[10.0, 12.0]).unwrap();
        assert_abs_diff_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], 2.0, epsilon = 1e-12);
        assert!(lu.solve(&[1.0]).is_err());
    }

    #[test]
    fn badly_scaled_diagonal_factorises() {
        let a = Matrix::from_row_slice(2, 2, &[1e14, 0.0, 0.0, 1.0]).unwrap();
        let lu = LuDecomposition::new(&a).unwrap();
        assert_eq!(lu.determinant(), 1e14);
        assert_eq!(lu.solve(&[2e14, 5.0]).unwrap(), vec![2.0, 5.0]);

        let dominant = Matrix::from_row_slice(2, 2, &[1e14, 1.0, 1.0, 2.0]).unwrap();
        let lu = LuDecomposition::new(&dominant).unwrap();
        assert_abs_diff_eq!(lu.u()[(1, 1)], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn rejects_zero_pivots_and_rectangles() {
        let needs_swap = Matrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 0.0]).unwrap();
        assert_eq!(
            LuDecomposition::new(&needs_swap),
            Err(Error::SingularMatrix { pivot: 0 })
        );
        let singular = Matrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]).unwrap();
        assert_eq!(
            LuDecomposition::new(&singular),
            Err(Error::SingularMatrix { pivot: 1 })
        );
        assert!(matches!(
            LuDecomposition::new(&Matrix::zeros(2, 3)),
            Err(Error::NonSquareMatrix { rows: 2, cols: 3 })
        ));
    }
}
