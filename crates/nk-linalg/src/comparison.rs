//! Floating-point comparison utilities for scalars, vectors and matrices.

use crate::matrix::Matrix;
use nk_core::Real;

/// Largest element-wise `|a[i] - b[i]|` over the common prefix.
pub fn max_abs_diff(a: &[Real], b: &[Real]) -> Real {
    a.iter()
        .zip(b)
        .fold(0.0, |m, (x, y)| m.max((x - y).abs()))
}

/// Return `true` if both matrices have the same shape and every pair of
/// elements is within `epsilon`.
pub fn matrices_close(a: &Matrix, b: &Matrix, epsilon: Real) -> bool {
    a.shape() == b.shape() && max_abs_diff(a.as_slice(), b.as_slice()) <= epsilon
}
