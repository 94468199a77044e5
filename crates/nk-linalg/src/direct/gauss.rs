//! Gaussian elimination with column partial pivoting.

use super::{back_substitute, ensure_rhs, ensure_square, is_negligible_pivot, row_scales};
use crate::matrix::Matrix;
use crate::norms::max_abs;
use nk_core::{
    ensure,
    errors::{Error, Result},
    Real,
};

/// Upper-triangular factor and transformed right-hand sides produced by
/// forward elimination.
struct Elimination {
    upper: Matrix,
    rhs: Matrix,
    swaps: usize,
}

/// Reduce copies of `a` and `rhs` to upper-triangular form.
///
/// For pivot column `i` the row in `[i, n)` with the largest `|a[r][i]|`
/// (the first one on ties) is swapped into place in both the matrix and
/// the right-hand sides. The pivot is judged against the scale of the row
/// it came from.
fn eliminate(a: &Matrix, rhs: &Matrix) -> Result<Elimination> {
    let n = a.rows();
    let mut scales = row_scales(a);
    let mut upper = a.clone();
    let mut rhs = rhs.clone();
    let mut swaps = 0;

    for i in 0..n {
        let column: Vec<Real> = (i..n).map(|r| upper[(r, i)]).collect();
        let (offset, pivot) = max_abs(&column).unwrap_or((0, 0.0));
        if is_negligible_pivot(pivot, scales[i + offset]) {
            log::debug!("gaussian elimination: zero pivot in column {i} of {n}×{n} system");
            return Err(Error::SingularMatrix { pivot: i });
        }
        if offset != 0 {
            upper.swap_rows(i, i + offset);
            rhs.swap_rows(i, i + offset);
            scales.swap(i, i + offset);
            swaps += 1;
        }

        for j in i + 1..n {
            let factor = upper[(j, i)] / upper[(i, i)];
            if factor == 0.0 {
                continue;
            }
            for k in i..n {
                upper[(j, k)] -= factor * upper[(i, k)];
            }
            for k in 0..rhs.cols() {
                rhs[(j, k)] -= factor * rhs[(i, k)];
            }
        }
    }

    Ok(Elimination { upper, rhs, swaps })
}

/// Solve `A·x = b` by Gaussian elimination with partial pivoting.
///
/// Neither `a` nor `b` is modified.
///
/// # Errors
/// `NonSquareMatrix`, `DimensionMismatch` if `b.len() != a.rows()`, and
/// `SingularMatrix` when a pivot is numerically zero.
///
/// # Example
/// ```
/// use nk_linalg::{direct, Matrix};
/// let a = Matrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0]).unwrap();
/// let x = direct::solve(&a, &[3.0, 5.0]).unwrap();
/// assert!((x[0] - 0.8).abs() < 1e-12);
/// assert!((x[1] - 1.4).abs() < 1e-12);
/// ```
pub fn solve(a: &Matrix, b: &[Real]) -> Result<Vec<Real>> {
    let n = ensure_square(a)?;
    ensure_rhs(n, b)?;
    let e = eliminate(a, &Matrix::column_vector(b))?;
    Ok(back_substitute(&e.upper, e.rhs.as_slice()))
}

/// Solve `A·X = B` for every column of `B` at once.
pub fn solve_matrix(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    let n = ensure_square(a)?;
    ensure!(
        b.rows() == n,
        Error::DimensionMismatch {
            expected: (n, b.cols()),
            found: b.shape(),
        }
    );
    let e = eliminate(a, b)?;
    let mut x = Matrix::zeros(n, b.cols());
    for k in 0..b.cols() {
        let y: Vec<Real> = (0..n).map(|i| e.rhs[(i, k)]).collect();
        for (i, v) in back_substitute(&e.upper, &y).into_iter().enumerate() {
            x[(i, k)] = v;
        }
    }
    Ok(x)
}

/// Determinant: product of the elimination pivots times `(-1)^swaps`.
///
/// # Errors
/// `NonSquareMatrix`, and `SingularMatrix` when elimination meets a zero
/// pivot; use [`determinant_or_zero`] to read that case as `0.0`.
pub fn determinant(a: &Matrix) -> Result<Real> {
    let n = ensure_square(a)?;
    let e = eliminate(a, &Matrix::zeros(n, 0))?;
    let sign = if e.swaps % 2 == 0 { 1.0 } else { -1.0 };
    Ok(sign * e.upper.diagonal().iter().product::<Real>())
}

/// Like [`determinant`], but a singular matrix yields `Ok(0.0)`.
pub fn determinant_or_zero(a: &Matrix) -> Result<Real> {
    match determinant(a) {
        Err(Error::SingularMatrix { .. }) => Ok(0.0),
        other => other,
    }
}

/// Inverse, obtained by solving against every column of the identity.
pub fn inverse(a: &Matrix) -> Result<Matrix> {
    let n = ensure_square(a)?;
    solve_matrix(a, &Matrix::identity(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::matrices_close;
    use approx::assert_abs_diff_eq;

    fn m(rows: usize, cols: usize, data: &[Real]) -> Matrix {
        Matrix::from_row_slice(rows, cols, data).unwrap()
    }

    #[test]
    fn solve_needs_pivoting() {
        // zero leading entry forces a row swap
        let a = m(3, 3, &[0.0, 2.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0, 3.0]);
        let x_true = [1.0, -1.0, 2.0];
        let b = a.mul_vec(&x_true).unwrap();
        let x = solve(&a, &b).unwrap();
        for i in 0..3 {
            assert_abs_diff_eq!(x[i], x_true[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn solve_does_not_touch_inputs() {
        let a = m(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let b = vec![5.0, 6.0];
        let (a0, b0) = (a.clone(), b.clone());
        solve(&a, &b).unwrap();
        assert_eq!(a, a0);
        assert_eq!(b, b0);
    }

    #[test]
    fn singular_and_shape_errors() {
        let singular = m(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        assert_eq!(
            solve(&singular, &[1.0, 2.0]),
            Err(Error::SingularMatrix { pivot: 1 })
        );
        let rank2 = m(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert!(matches!(
            solve(&rank2, &[1.0, 2.0, 3.0]),
            Err(Error::SingularMatrix { .. })
        ));
        assert!(matches!(
            solve(&Matrix::zeros(2, 3), &[1.0, 2.0]),
            Err(Error::NonSquareMatrix { .. })
        ));
        assert!(matches!(
            solve(&Matrix::identity(2), &[1.0]),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn determinant_tracks_swap_sign() {
        let a = m(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        assert_abs_diff_eq!(determinant(&a).unwrap(), -2.0, epsilon = 1e-12);
        let p = m(3, 3, &[0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
        assert_abs_diff_eq!(determinant(&p).unwrap(), -1.0, epsilon = 1e-12);
        let a = m(3, 3, &[2.0, -1.0, 0.0, -1.0, 2.0, -1.0, 0.0, -1.0, 2.0]);
        assert_abs_diff_eq!(determinant(&a).unwrap(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn determinant_of_singular_matrix() {
        let a = m(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        assert!(matches!(determinant(&a), Err(Error::SingularMatrix { .. })));
        assert_eq!(determinant_or_zero(&a), Ok(0.0));
        assert!(determinant_or_zero(&Matrix::zeros(1, 2)).is_err());
    }

    #[test]
    fn inverse_roundtrip() {
        let a = m(3, 3, &[4.0, 7.0, 2.0, 3.0, 6.0, 1.0, 2.0, 5.0, 3.0]);
        let inv = inverse(&a).unwrap();
        let prod = a.multiply(&inv).unwrap();
        assert!(matrices_close(&prod, &Matrix::identity(3), 1e-12));
        assert!(matches!(
            inverse(&m(2, 2, &[1.0, 1.0, 1.0, 1.0])),
            Err(Error::SingularMatrix { .. })
        ));
    }

    #[test]
    fn multiple_right_hand_sides() {
        let a = m(2, 2, &[2.0, 0.0, 0.0, 4.0]);
        let b = m(2, 2, &[2.0, 4.0, 8.0, 12.0]);
        let x = solve_matrix(&a, &b).unwrap();
        assert_eq!(x, m(2, 2, &[1.0, 2.0, 2.0, 3.0]));
        assert!(solve_matrix(&a, &Matrix::zeros(3, 1)).is_err());
    }

    #[test]
    fn badly_scaled_rows_are_not_singular() {
        let diag = m(2, 2, &[1e14, 0.0, 0.0, 1.0]);
        let x = solve(&diag, &[1e14, 3.0]).unwrap();
        assert_abs_diff_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], 3.0, epsilon = 1e-12);
        assert_eq!(determinant(&diag), Ok(1e14));

        // second pivot ≈ 2, determinant ≈ 2e14
        let dominant = m(2, 2, &[1e14, 1.0, 1.0, 2.0]);
        let x = solve(&dominant, &[1.0, 1.0]).unwrap();
        let r = dominant.mul_vec(&x).unwrap();
        assert_abs_diff_eq!(r[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(r[1], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(determinant(&dominant).unwrap(), 2e14 - 1.0, epsilon = 1e2);
        assert!(inverse(&dominant).is_ok());
    }

    #[test]
    fn empty_system() {
        let a = Matrix::zeros(0, 0);
        assert_eq!(solve(&a, &[]), Ok(vec![]));
        assert_eq!(determinant(&a), Ok(1.0));
    }
}
