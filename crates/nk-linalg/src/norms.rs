//! Vector and matrix norms, and first-maximum searches.
//!
//! The searches return the *first* index attaining the maximum, which is the
//! tie-break partial pivoting relies on.

use crate::matrix::Matrix;
use nk_core::{errors::Result, fail, Real};

/// Which vector norm to compute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Norm {
    /// Sum of absolute values.
    One,
    /// Euclidean norm.
    Two,
    /// Largest absolute value.
    Inf,
    /// `(Σ |xᵢ|ᵖ)^(1/p)` for `p ≥ 1`; `p = ∞` is [`Norm::Inf`].
    P(Real),
}

/// `‖v‖₁`.
pub fn norm_1(v: &[Real]) -> Real {
    v.iter().map(|x| x.abs()).sum()
}

/// `‖v‖₂`.
pub fn norm_2(v: &[Real]) -> Real {
    v.iter().map(|x| x * x).sum::<Real>().sqrt()
}

/// `‖v‖∞`; zero for an empty vector.
pub fn norm_inf(v: &[Real]) -> Real {
    v.iter().fold(0.0, |m, x| m.max(x.abs()))
}

/// Vector norm selected by `norm`.
///
/// Fails with `InvalidArgument` for `Norm::P(p)` with `p < 1` or `p` NaN.
pub fn vector_norm(v: &[Real], norm: Norm) -> Result<Real> {
    Ok(match norm {
        Norm::One => norm_1(v),
        Norm::Two => norm_2(v),
        Norm::Inf => norm_inf(v),
        Norm::P(p) if p.is_infinite() && p > 0.0 => norm_inf(v),
        Norm::P(p) if p >= 1.0 => v
            .iter()
            .map(|x| x.abs().powf(p))
            .sum::<Real>()
            .powf(1.0 / p),
        Norm::P(p) => fail!("p-norm requires p >= 1, got {p}"),
    })
}

/// Induced 1-norm: largest absolute column sum.
pub fn matrix_norm_1(a: &Matrix) -> Real {
    let mut sums = vec![0.0; a.cols()];
    for i in 0..a.rows() {
        for (s, x) in sums.iter_mut().zip(a.row_slice(i)) {
            *s += x.abs();
        }
    }
    sums.into_iter().fold(0.0, Real::max)
}

/// Induced ∞-norm: largest absolute row sum.
pub fn matrix_norm_inf(a: &Matrix) -> Real {
    (0..a.rows())
        .map(|i| norm_1(a.row_slice(i)))
        .fold(0.0, Real::max)
}

/// Frobenius norm.
pub fn frobenius_norm(a: &Matrix) -> Real {
    norm_2(a.as_slice())
}

/// First maximum of `v` and its index, or `None` if `v` is empty.
pub fn max(v: &[Real]) -> Option<(usize, Real)> {
    let (&first, rest) = v.split_first()?;
    let mut best = (0, first);
    for (i, &x) in rest.iter().enumerate() {
        if x > best.1 {
            best = (i + 1, x);
        }
    }
    Some(best)
}

/// First element of largest magnitude (returned with its sign) and its
/// index, or `None` if `v` is empty.
pub fn max_abs(v: &[Real]) -> Option<(usize, Real)> {
    let (&first, rest) = v.split_first()?;
    let mut best = (0, first);
    for (i, &x) in rest.iter().enumerate() {
        if x.abs() > best.1.abs() {
            best = (i + 1, x);
        }
    }
    Some(best)
}
