//! # numkernel
//!
//! Dense linear-algebra kernel for numerical analysis.
//!
//! This crate is a **façade** over the workspace crates. Application code
//! should depend on it rather than on `nk-core` / `nk-linalg` directly.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! numkernel = "0.1"
//! ```
//!
//! ```rust
//! use numkernel::linalg::{tridiagonal, Matrix};
//!
//! let a = Matrix::from_rows(&[[4.0, -1.0, 0.0], [-1.0, 4.0, -1.0], [0.0, -1.0, 4.0]])?;
//! let x = tridiagonal::solve_tridiagonal(&a, &[1.0, 4.0, -3.0])?;
//! assert!((x[1] - 1.0).abs() < 1e-12);
//! # Ok::<(), numkernel::core::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Scalar aliases, error taxonomy, and early-return macros.
pub use nk_core as core;

/// Matrix type, norms, and the solver families.
pub use nk_linalg as linalg;

/// Commonly used items in one import.
pub mod prelude {
    pub use nk_core::{Error, Real, Result};
    pub use nk_linalg::{
        direct, eigen, iterative, tridiagonal, Convergence, EigenDecomposition,
        IterativeSolution, Matrix, Norm,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn prelude_covers_a_full_solve() {
        let a = Matrix::from_rows(&[[10.0, -2.0, -1.0], [-2.0, 10.0, -1.0], [-1.0, -2.0, 5.0]])
            .unwrap();
        let b = [3.0, 15.0, 10.0];
        let direct = direct::solve(&a, &b).unwrap();
        let conv = Convergence::new(1e-10, 200).unwrap();
        let seidel: IterativeSolution = iterative::solve_seidel(&a, &b, &[0.0; 3], &conv).unwrap();
        for i in 0..3 {
            assert_abs_diff_eq!(direct[i], seidel.x[i], epsilon = 1e-8);
        }
        let err: Result<Real> = direct::determinant(&Matrix::zeros(2, 2));
        assert!(matches!(err, Err(Error::SingularMatrix { pivot: 0 })));
    }
}
