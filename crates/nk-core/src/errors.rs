//! Error types for numkernel.
//!
//! Every failure a kernel routine can report is a variant of the single
//! `thiserror`-derived [`Error`] enum. Shape and precondition violations are
//! detected before any work is done; iteration-budget exhaustion is reported
//! as [`Error::NotConvergent`] so callers can retry with other parameters.
//! The [`ensure!`](crate::ensure) and [`fail!`](crate::fail) macros are the
//! early-return helpers used throughout the kernel.

use thiserror::Error;

/// The error type used throughout numkernel.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Operand shapes are incompatible, or flat data does not fill the
    /// requested shape.
    #[error("dimension mismatch: expected {}×{}, found {}×{}", .expected.0, .expected.1, .found.0, .found.1)]
    DimensionMismatch {
        /// Shape the operation required (`rows`, `cols`).
        expected: (usize, usize),
        /// Shape that was supplied.
        found: (usize, usize),
    },

    /// A square matrix was required.
    #[error("matrix must be square, got {rows}×{cols}")]
    NonSquareMatrix {
        /// Number of rows of the offending matrix.
        rows: usize,
        /// Number of columns of the offending matrix.
        cols: usize,
    },

    /// A symmetric matrix was required.
    #[error("matrix is not symmetric")]
    NotSymmetric,

    /// A zero (or numerically negligible) pivot was met during elimination
    /// or factorisation.
    #[error("matrix is singular: zero pivot in column {pivot}")]
    SingularMatrix {
        /// Column (or diagonal position) whose pivot vanished.
        pivot: usize,
    },

    /// A Cholesky radicand was not positive.
    #[error("matrix is not positive-definite: non-positive radicand at diagonal {index}")]
    NotPositiveDefinite {
        /// Diagonal position whose radicand was not positive.
        index: usize,
    },

    /// The iteration budget was exhausted (or a pre-check proved the
    /// iteration cannot converge) before the tolerance was met.
    #[error("no convergence after {iterations} iterations")]
    NotConvergent {
        /// Iterations performed before giving up.
        iterations: usize,
    },

    /// Element index outside the matrix bounds.
    #[error("index ({row}, {col}) out of range for {rows}×{cols} matrix")]
    IndexOutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Number of rows of the matrix.
        rows: usize,
        /// Number of columns of the matrix.
        cols: usize,
    },

    /// A scalar parameter is outside its admissible range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Return `true` for failures a caller may retry with different
    /// iteration parameters.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::NotConvergent { .. })
    }
}

/// Shorthand `Result` type used throughout numkernel.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err($err)` from the enclosing function unless `$cond` holds.
///
/// # Example
/// ```
/// use nk_core::{ensure, errors::{Error, Result}};
/// fn square_side(rows: usize, cols: usize) -> Result<usize> {
///     ensure!(rows == cols, Error::NonSquareMatrix { rows, cols });
///     Ok(rows)
/// }
/// assert_eq!(square_side(3, 3), Ok(3));
/// assert!(square_side(2, 3).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err.into());
        }
    };
}

/// Return `Err(Error::InvalidArgument(...))` built from a format string.
///
/// # Example
/// ```
/// use nk_core::{fail, errors::{Error, Result}};
/// fn reject(omega: f64) -> Result<()> {
///     fail!("relaxation factor must lie in (0, 2), got {omega}");
/// }
/// assert!(matches!(reject(3.0), Err(Error::InvalidArgument(_))));
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::InvalidArgument(format!($($msg)*)))
    };
}
