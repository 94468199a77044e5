//! Jacobi rotation methods for symmetric matrices.

use super::{ensure_symmetric, off_diagonal_sq, EigenDecomposition, Rotation};
use crate::config::Convergence;
use crate::matrix::Matrix;
use nk_core::{
    errors::{Error, Result},
    Real,
};

/// When `ROTATION_RATIO_THRESHOLD · |b_pq| < |b_pp − b_qq|` the rotation
/// angle is computed from `d = 2·b_pq / (b_pp − b_qq)` instead of its
/// reciprocal.
pub const ROTATION_RATIO_THRESHOLD: Real = 1000.0;

/// Decomposition with no rotation applied, if `a` already meets the
/// tolerance.
fn already_diagonal(a: &Matrix, n: usize, conv: &Convergence) -> Option<EigenDecomposition> {
    (off_diagonal_sq(a) <= conv.tolerance).then(|| EigenDecomposition {
        values: a.clone(),
        vectors: Matrix::identity(n),
        iterations: 0,
    })
}

/// Largest `|b[p][q]|` above the diagonal; the first one in row-major order
/// wins ties.
fn largest_off_diagonal(b: &Matrix) -> Option<(usize, usize)> {
    let n = b.rows();
    let mut best: Option<(usize, usize, Real)> = None;
    for p in 0..n {
        for q in p + 1..n {
            let v = b[(p, q)].abs();
            if best.map_or(true, |(_, _, m)| v > m) {
                best = Some((p, q, v));
            }
        }
    }
    best.map(|(p, q, _)| (p, q))
}

/// All eigenvalues and eigenvectors of a symmetric matrix by the classical
/// Jacobi method.
///
/// Each iteration zeroes the largest off-diagonal element with one plane
/// rotation. The run has converged once the sum of squares of all
/// off-diagonal elements is at most `conv.tolerance`; `conv.max_iterations`
/// bounds the number of rotations. An input that already meets the
/// tolerance is returned with zero iterations, whatever the budget.
///
/// # Errors
/// `NonSquareMatrix`, `NotSymmetric` (exact element comparison), and
/// `NotConvergent` when the rotation budget runs out.
///
/// # Example
/// ```
/// use nk_linalg::{eigen::eigen_jacobi, Convergence, Matrix};
/// let a = Matrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 2.0]).unwrap();
/// let eig = eigen_jacobi(&a, &Convergence::new(1e-20, 10).unwrap()).unwrap();
/// let mut values = eig.eigenvalues();
/// values.sort_by(|x, y| x.total_cmp(y));
/// assert!((values[0] - 1.0).abs() < 1e-12);
/// assert!((values[1] - 3.0).abs() < 1e-12);
/// ```
pub fn eigen_jacobi(a: &Matrix, conv: &Convergence) -> Result<EigenDecomposition> {
    let n = ensure_symmetric(a)?;
    if let Some(eig) = already_diagonal(a, n, conv) {
        return Ok(eig);
    }
    let mut b = a.clone();
    let mut v = Matrix::identity(n);

    for k in 1..=conv.max_iterations {
        if let Some((p, q)) = largest_off_diagonal(&b) {
            let rotation = Rotation::annihilating(&b, p, q);
            if !rotation.is_identity() {
                log::trace!(
                    "jacobi: rotation {k} at ({p}, {q}), cos = {}, sin = {}",
                    rotation.cos,
                    rotation.sin
                );
                rotation.apply(&mut b, &mut v);
            }
        }
        let off = off_diagonal_sq(&b);
        if off <= conv.tolerance {
            log::debug!("jacobi: converged after {k} rotations (off-diagonal {off:e})");
            return Ok(EigenDecomposition {
                values: b,
                vectors: v,
                iterations: k,
            });
        }
    }

    log::warn!(
        "jacobi: off-diagonal mass still {:e} after {} rotations",
        off_diagonal_sq(&b),
        conv.max_iterations
    );
    Err(Error::NotConvergent {
        iterations: conv.max_iterations,
    })
}

/// Threshold ("pass") Jacobi method.
///
/// Starts from the threshold `v₁ = v₀/n`, `v₀` being the Frobenius norm of
/// the off-diagonal part. Every sweep visits the upper triangle in row-major
/// order and rotates away each element with `|b[p][q]| > v₁`. A sweep that
/// rotates nothing divides the threshold by `n`. Converged, and bounded, as
/// [`eigen_jacobi`], except that `conv.max_iterations` counts sweeps.
pub fn eigen_jacobi_threshold(a: &Matrix, conv: &Convergence) -> Result<EigenDecomposition> {
    let n = ensure_symmetric(a)?;
    if let Some(eig) = already_diagonal(a, n, conv) {
        return Ok(eig);
    }
    let mut b = a.clone();
    let mut v = Matrix::identity(n);
    let mut threshold = off_diagonal_sq(&b).sqrt() / n.max(1) as Real;

    for sweep in 1..=conv.max_iterations {
        let mut rotated = 0usize;
        for p in 0..n {
            for q in p + 1..n {
                if b[(p, q)].abs() > threshold {
                    Rotation::annihilating(&b, p, q).apply(&mut b, &mut v);
                    rotated += 1;
                }
            }
        }
        let off = off_diagonal_sq(&b);
        log::trace!("jacobi threshold: sweep {sweep}, {rotated} rotations, threshold {threshold:e}");
        if off <= conv.tolerance {
            log::debug!("jacobi threshold: converged after {sweep} sweeps (off-diagonal {off:e})");
            return Ok(EigenDecomposition {
                values: b,
                vectors: v,
                iterations: sweep,
            });
        }
        if rotated == 0 {
            threshold /= n as Real;
        }
    }

    log::warn!(
        "jacobi threshold: off-diagonal mass still {:e} after {} sweeps",
        off_diagonal_sq(&b),
        conv.max_iterations
    );
    Err(Error::NotConvergent {
        iterations: conv.max_iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::matrices_close;
    use approx::assert_abs_diff_eq;

    fn laplacian() -> Matrix {
        Matrix::from_row_slice(3, 3, &[2.0, -1.0, 0.0, -1.0, 2.0, -1.0, 0.0, -1.0, 2.0]).unwrap()
    }

    fn sorted(mut v: Vec<Real>) -> Vec<Real> {
        v.sort_by(|x, y| x.total_cmp(y));
        v
    }

    fn check_decomposition(a: &Matrix, eig: &EigenDecomposition) {
        let n = a.rows();
        assert!(matrices_close(&eig.reconstruct().unwrap(), a, 1e-8));
        let vtv = eig.vectors().transpose().multiply(eig.vectors()).unwrap();
        assert!(matrices_close(&vtv, &Matrix::identity(n), 1e-10));
    }

    #[test]
    fn classical_laplacian() {
        let a = laplacian();
        let eig = eigen_jacobi(&a, &Convergence::new(1e-18, 100).unwrap()).unwrap();
        let s = std::f64::consts::SQRT_2;
        let values = sorted(eig.eigenvalues());
        assert_abs_diff_eq!(values[0], 2.0 - s, epsilon = 1e-8);
        assert_abs_diff_eq!(values[1], 2.0, epsilon = 1e-8);
        assert_abs_diff_eq!(values[2], 2.0 + s, epsilon = 1e-8);
        check_decomposition(&a, &eig);
    }

    #[test]
    fn threshold_laplacian() {
        let a = laplacian();
        let eig = eigen_jacobi_threshold(&a, &Convergence::new(1e-18, 50).unwrap()).unwrap();
        let classical = eigen_jacobi(&a, &Convergence::new(1e-18, 100).unwrap()).unwrap();
        let (t, c) = (sorted(eig.eigenvalues()), sorted(classical.eigenvalues()));
        for i in 0..3 {
            assert_abs_diff_eq!(t[i], c[i], epsilon = 1e-8);
        }
        check_decomposition(&a, &eig);
    }

    #[test]
    fn eigenvector_columns_satisfy_definition() {
        let a = Matrix::from_row_slice(3, 3, &[4.0, 1.0, 2.0, 1.0, 3.0, 0.5, 2.0, 0.5, 1.0]).unwrap();
        let eig = eigen_jacobi(&a, &Convergence::new(1e-20, 200).unwrap()).unwrap();
        for (i, lambda) in eig.eigenvalues().into_iter().enumerate() {
            let col = eig.vectors().column(i).unwrap();
            let av = a.mul_vec(&col).unwrap();
            for k in 0..3 {
                assert_abs_diff_eq!(av[k], lambda * col[k], epsilon = 1e-8);
            }
        }
    }

    #[test]
    fn diagonal_input_converges_at_once() {
        let a = Matrix::from_diagonal(&[3.0, -1.0, 7.0]);
        let conv = Convergence::new(0.0, 5).unwrap();
        let eig = eigen_jacobi(&a, &conv).unwrap();
        assert_eq!(eig.iterations(), 0);
        assert_eq!(eig.eigenvalues(), vec![3.0, -1.0, 7.0]);
        assert_eq!(eig.vectors(), &Matrix::identity(3));
        assert_eq!(eigen_jacobi_threshold(&a, &conv).unwrap().iterations(), 0);
    }

    #[test]
    fn converged_input_needs_no_budget() {
        let no_budget = Convergence::new(1e-12, 0).unwrap();
        let diag = Matrix::from_diagonal(&[2.0, 5.0]);
        let one = Matrix::from_row_slice(1, 1, &[4.0]).unwrap();
        for a in [&diag, &one] {
            assert_eq!(eigen_jacobi(a, &no_budget).unwrap().values(), a);
            assert_eq!(eigen_jacobi_threshold(a, &no_budget).unwrap().iterations(), 0);
        }
        assert_eq!(
            eigen_jacobi(&laplacian(), &no_budget),
            Err(Error::NotConvergent { iterations: 0 })
        );
    }

    #[test]
    fn budget_exhaustion_and_bad_input() {
        let conv = Convergence::new(1e-30, 1).unwrap();
        assert_eq!(
            eigen_jacobi(&laplacian(), &conv),
            Err(Error::NotConvergent { iterations: 1 })
        );
        let asym = Matrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(eigen_jacobi(&asym, &conv), Err(Error::NotSymmetric));
        assert_eq!(eigen_jacobi_threshold(&asym, &conv), Err(Error::NotSymmetric));
        assert!(matches!(
            eigen_jacobi(&Matrix::zeros(2, 3), &conv),
            Err(Error::NonSquareMatrix { .. })
        ));
    }

    #[test]
    fn pivot_search_prefers_first_on_ties() {
        let a = Matrix::from_row_slice(3, 3, &[0.0, 1.0, -1.0, 1.0, 0.0, 0.5, -1.0, 0.5, 0.0]).unwrap();
        assert_eq!(largest_off_diagonal(&a), Some((0, 1)));
        assert_eq!(largest_off_diagonal(&Matrix::identity(1)), None);
    }
}
