//! Power method for the dominant eigenpair.

use crate::config::Convergence;
use crate::direct::{ensure_rhs, ensure_square};
use crate::matrix::Matrix;
use crate::norms::max_abs;
use nk_core::{
    errors::{Error, Result},
    fail, Real,
};

/// Dominant eigenvalue with its eigenvector.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerIteration {
    /// Eigenvalue of largest magnitude.
    pub value: Real,
    /// Eigenvector scaled so that its largest-magnitude component is `1`.
    pub vector: Vec<Real>,
    /// Matrix-vector products performed.
    pub iterations: usize,
}

/// Dominant eigenvalue (largest in magnitude) and eigenvector of a square
/// matrix, starting from `x0`.
///
/// Each step forms `w = A·u` and rescales it by its largest-magnitude
/// component `m`, which is the current eigenvalue estimate. Converged when
/// two successive estimates differ by less than `conv.tolerance`.
///
/// `a` need not be symmetric, but the dominant eigenvalue must be real and
/// strictly larger in magnitude than the others, and `x0` must not be
/// orthogonal to its eigenvector.
///
/// # Errors
/// * `NonSquareMatrix`, `DimensionMismatch` for bad shapes
/// * `InvalidArgument` if `x0` is zero or an iterate vanishes
/// * `NotConvergent` when the budget runs out
pub fn power_iteration(a: &Matrix, x0: &[Real], conv: &Convergence) -> Result<PowerIteration> {
    let n = ensure_square(a)?;
    ensure_rhs(n, x0)?;
    let scale = match max_abs(x0) {
        Some((_, m)) if m != 0.0 => m,
        _ => fail!("start vector must be non-zero"),
    };
    let mut u: Vec<Real> = x0.iter().map(|x| x / scale).collect();
    let mut previous: Option<Real> = None;

    for k in 1..=conv.max_iterations {
        let w = a.mul_vec(&u)?;
        let m = match max_abs(&w) {
            Some((_, m)) if m != 0.0 => m,
            _ => fail!("iterate vanished after {k} steps; start vector lies in a null space"),
        };
        u = w.into_iter().map(|x| x / m).collect();
        if previous.is_some_and(|p| (m - p).abs() < conv.tolerance) {
            log::debug!("power iteration: eigenvalue {m} after {k} steps");
            return Ok(PowerIteration {
                value: m,
                vector: u,
                iterations: k,
            });
        }
        previous = Some(m);
    }

    log::warn!(
        "power iteration: no convergence within {} steps",
        conv.max_iterations
    );
    Err(Error::NotConvergent {
        iterations: conv.max_iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn non_symmetric_dominant_pair() {
        // eigenvalues 45, 15, -6
        let a = Matrix::from_row_slice(
            3,
            3,
            &[6.0, -12.0, 6.0, -21.0, -3.0, 24.0, -12.0, -12.0, 51.0],
        )
        .unwrap();
        let conv = Convergence::new(1e-10, 500).unwrap();
        let r = power_iteration(&a, &[1.0, 1.0, 1.0], &conv).unwrap();
        assert_abs_diff_eq!(r.value, 45.0, epsilon = 1e-8);
        assert_abs_diff_eq!(r.vector[0], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(r.vector[1], 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(r.vector[2], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn symmetric_and_negative_dominant() {
        let conv = Convergence::new(1e-12, 200).unwrap();
        let a = Matrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 2.0]).unwrap();
        let r = power_iteration(&a, &[1.0, 0.0], &conv).unwrap();
        assert_abs_diff_eq!(r.value, 3.0, epsilon = 1e-10);
        assert_abs_diff_eq!(r.vector[1], 1.0, epsilon = 1e-6);

        let d = Matrix::from_diagonal(&[-5.0, 1.0]);
        let r = power_iteration(&d, &[1.0, 1.0], &conv).unwrap();
        assert_eq!(r.value, -5.0);
    }

    #[test]
    fn errors() {
        let conv = Convergence::new(1e-8, 10).unwrap();
        let a = Matrix::identity(2);
        assert!(matches!(
            power_iteration(&a, &[0.0, 0.0], &conv),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            power_iteration(&Matrix::zeros(2, 2), &[1.0, 1.0], &conv),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            power_iteration(&a, &[1.0], &conv),
            Err(Error::DimensionMismatch { .. })
        ));
        // eigenvalues ±i: the estimate alternates between 1 and -1
        let quarter_turn = Matrix::from_row_slice(2, 2, &[0.0, -1.0, 1.0, 0.0]).unwrap();
        assert_eq!(
            power_iteration(&quarter_turn, &[1.0, 0.0], &conv),
            Err(Error::NotConvergent { iterations: 10 })
        );
    }
}
