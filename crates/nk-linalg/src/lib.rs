//! # nk-linalg
//!
//! Dense linear algebra over `f64`: a row-major [`Matrix`], vector and
//! matrix norms, and the solver families built on them.
//!
//! | module | contents |
//! |---|---|
//! | [`direct`] | Gaussian elimination, determinant, inverse, LU, Cholesky |
//! | [`tridiagonal`] | Thomas algorithm |
//! | [`iterative`] | Jacobi, Gauss–Seidel, SOR |
//! | [`eigen`] | Jacobi rotation methods, power iteration |
//!
//! Every solver borrows its inputs and reports failure through
//! [`nk_core::Error`]. Iterative and eigen solvers take a caller-supplied
//! [`Convergence`] rule.
//!
//! ```
//! use nk_linalg::{direct, eigen, Convergence, Matrix};
//!
//! let a = Matrix::from_rows(&[[4.0, 1.0], [1.0, 3.0]]).unwrap();
//! let x = direct::solve(&a, &[1.0, 2.0]).unwrap();
//! let r = a.mul_vec(&x).unwrap();
//! assert!((r[0] - 1.0).abs() < 1e-12 && (r[1] - 2.0).abs() < 1e-12);
//!
//! let eig = eigen::eigen_jacobi(&a, &Convergence::new(1e-20, 50).unwrap()).unwrap();
//! assert!((eig.eigenvalues().iter().sum::<f64>() - a.trace()).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Floating-point comparison utilities.
pub mod comparison;

/// Stopping rules for iterative methods.
pub mod config;

/// Direct solvers and factorisations.
pub mod direct;

/// Symmetric eigen-solvers and the power method.
pub mod eigen;

/// Stationary iterative solvers.
pub mod iterative;

/// Dense row-major matrix.
pub mod matrix;

/// Vector and matrix norms.
pub mod norms;

/// Tridiagonal systems.
pub mod tridiagonal;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use config::Convergence;
pub use direct::{CholeskyDecomposition, LuDecomposition};
pub use eigen::{EigenDecomposition, PowerIteration};
pub use iterative::IterativeSolution;
pub use matrix::Matrix;
pub use norms::Norm;
pub use tridiagonal::TridiagonalSystem;
