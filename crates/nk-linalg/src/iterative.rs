//! Stationary iterative solvers for `A·x = b`.
//!
//! * [`solve_jacobi`]: `x_new = B·x_old + g`
//! * [`solve_seidel`]: Gauss–Seidel, reusing components already updated in
//!   the current sweep
//! * [`solve_sor`]: successive over-relaxation with factor `ω`
//!
//! One iteration is one full sweep over the unknowns. A run has converged
//! when `max |x_new − x_old| < tolerance`; running out of sweeps is
//! reported as [`Error::NotConvergent`], never as a partial answer.

use crate::comparison::max_abs_diff;
use crate::config::Convergence;
use crate::direct::{ensure_rhs, ensure_square};
use crate::matrix::Matrix;
use crate::norms::{matrix_norm_1, matrix_norm_inf};
use nk_core::{
    errors::{Error, Result},
    fail, Real,
};

/// Converged iterate and the number of sweeps it took.
#[derive(Debug, Clone, PartialEq)]
pub struct IterativeSolution {
    /// Solution vector.
    pub x: Vec<Real>,
    /// Sweeps performed, including the one that met the tolerance.
    pub iterations: usize,
}

// ─── Shared machinery ─────────────────────────────────────────────────────────

/// Validate shapes and the diagonal; returns the system size.
fn check_system(a: &Matrix, b: &[Real], x0: &[Real]) -> Result<usize> {
    let n = ensure_square(a)?;
    ensure_rhs(n, b)?;
    ensure_rhs(n, x0)?;
    if let Some(i) = (0..n).find(|&i| a[(i, i)] == 0.0) {
        return Err(Error::SingularMatrix { pivot: i });
    }
    Ok(n)
}

/// Iteration matrix `B[i][j] = −A[i][j]/A[i][i]` (zero diagonal) and
/// `g[i] = b[i]/A[i][i]`.
fn jacobi_form(a: &Matrix, b: &[Real]) -> (Matrix, Vec<Real>) {
    let n = a.rows();
    let mut bm = Matrix::zeros(n, n);
    let mut g = vec![0.0; n];
    for i in 0..n {
        let aii = a[(i, i)];
        for j in 0..n {
            if j != i {
                bm[(i, j)] = -a[(i, j)] / aii;
            }
        }
        g[i] = b[i] / aii;
    }
    (bm, g)
}

/// Reject the system when neither `‖B‖₁ < 1` nor `‖B‖∞ < 1`.
///
/// Passing is no guarantee of convergence; the sweep budget still applies.
fn check_contraction(method: &str, bm: &Matrix) -> Result<()> {
    let (n1, ninf) = (matrix_norm_1(bm), matrix_norm_inf(bm));
    if n1 < 1.0 || ninf < 1.0 {
        return Ok(());
    }
    log::warn!("{method}: iteration matrix is not a contraction (‖B‖₁ = {n1}, ‖B‖∞ = {ninf})");
    Err(Error::NotConvergent { iterations: 0 })
}

/// Drive `sweep` from `x0` until successive iterates agree to within the
/// tolerance. `sweep(old, new)` receives `new` pre-filled with `old`.
fn iterate<F>(method: &str, x0: &[Real], conv: &Convergence, mut sweep: F) -> Result<IterativeSolution>
where
    F: FnMut(&[Real], &mut [Real]),
{
    let mut x = x0.to_vec();
    let mut next = x.clone();
    for k in 1..=conv.max_iterations {
        next.copy_from_slice(&x);
        sweep(&x, &mut next);
        let change = max_abs_diff(&next, &x);
        std::mem::swap(&mut x, &mut next);
        if change < conv.tolerance {
            log::debug!("{method}: converged after {k} sweeps (last change {change:e})");
            return Ok(IterativeSolution { x, iterations: k });
        }
    }
    log::warn!(
        "{method}: no convergence within {} sweeps (tolerance {:e})",
        conv.max_iterations,
        conv.tolerance
    );
    Err(Error::NotConvergent {
        iterations: conv.max_iterations,
    })
}

// ─── Solvers ──────────────────────────────────────────────────────────────────

/// Jacobi iteration `x_new = B·x_old + g`.
///
/// # Errors
/// * `NonSquareMatrix`, `DimensionMismatch` for bad shapes
/// * `SingularMatrix` if a diagonal entry of `a` is zero
/// * `NotConvergent { iterations: 0 }` if neither `‖B‖₁` nor `‖B‖∞` is
///   below one
/// * `NotConvergent { iterations }` when the sweep budget runs out
///
/// # Example
/// ```
/// use nk_linalg::{iterative::solve_jacobi, Convergence, Matrix};
/// let a = Matrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]).unwrap();
/// let conv = Convergence::new(1e-10, 200).unwrap();
/// let sol = solve_jacobi(&a, &[1.0, 2.0], &[0.0, 0.0], &conv).unwrap();
/// assert!((sol.x[0] - 1.0 / 11.0).abs() < 1e-9);
/// assert!((sol.x[1] - 7.0 / 11.0).abs() < 1e-9);
/// ```
pub fn solve_jacobi(
    a: &Matrix,
    b: &[Real],
    x0: &[Real],
    conv: &Convergence,
) -> Result<IterativeSolution> {
    let n = check_system(a, b, x0)?;
    let (bm, g) = jacobi_form(a, b);
    check_contraction("jacobi", &bm)?;
    iterate("jacobi", x0, conv, |old, new| {
        for i in 0..n {
            let row = bm.row_slice(i);
            new[i] = g[i] + row.iter().zip(old).map(|(bij, xj)| bij * xj).sum::<Real>();
        }
    })
}

/// Gauss–Seidel iteration: component `i` of a sweep already sees the new
/// values of components `0..i`.
///
/// Same errors as [`solve_jacobi`], including the contraction pre-check.
pub fn solve_seidel(
    a: &Matrix,
    b: &[Real],
    x0: &[Real],
    conv: &Convergence,
) -> Result<IterativeSolution> {
    let n = check_system(a, b, x0)?;
    let (bm, g) = jacobi_form(a, b);
    check_contraction("seidel", &bm)?;
    iterate("seidel", x0, conv, |_, x| {
        for i in 0..n {
            let row = bm.row_slice(i);
            x[i] = g[i] + row.iter().zip(x.iter()).map(|(bij, xj)| bij * xj).sum::<Real>();
        }
    })
}

/// Successive over-relaxation:
/// `xᵢ ← (1−ω)·xᵢ + ω·(bᵢ − Σ_{j<i} aᵢⱼxⱼ_new − Σ_{j>i} aᵢⱼxⱼ_old)/aᵢᵢ`.
///
/// `ω = 1` is Gauss–Seidel. No contraction pre-check is made.
///
/// # Errors
/// `InvalidArgument` unless `0 < ω < 2`, otherwise as [`solve_jacobi`]
/// minus the pre-check.
pub fn solve_sor(
    a: &Matrix,
    b: &[Real],
    x0: &[Real],
    conv: &Convergence,
    omega: Real,
) -> Result<IterativeSolution> {
    if !(omega > 0.0 && omega < 2.0) {
        fail!("relaxation factor must lie in (0, 2), got {omega}");
    }
    let n = check_system(a, b, x0)?;
    iterate("sor", x0, conv, |old, x| {
        for i in 0..n {
            let row = a.row_slice(i);
            let s: Real = row
                .iter()
                .zip(x.iter())
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, (aij, xj))| aij * xj)
                .sum();
            x[i] = (1.0 - omega) * old[i] + omega * (b[i] - s) / row[i];
        }
    })
}
