//! Stopping rules for the iterative and eigen solvers.

use nk_core::{errors::Result, fail, Real};

/// Caller-supplied stopping rule: an absolute tolerance and an iteration
/// budget.
///
/// No `Default`: the kernel imposes no tolerance or bound of its own. What
/// an "iteration" is and what the tolerance is compared against is
/// documented on each solver.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Convergence {
    /// Absolute tolerance of the convergence test.
    pub tolerance: Real,
    /// Maximum number of iterations (sweeps, rotations) before giving up.
    pub max_iterations: usize,
}

impl Convergence {
    /// Create a stopping rule.
    ///
    /// Fails with `InvalidArgument` if `tolerance` is negative or not finite.
    pub fn new(tolerance: Real, max_iterations: usize) -> Result<Self> {
        if !(tolerance.is_finite() && tolerance >= 0.0) {
            fail!("tolerance must be finite and non-negative, got {tolerance}");
        }
        Ok(Self {
            tolerance,
            max_iterations,
        })
    }

    /// Same rule with a different tolerance.
    pub fn with_tolerance(self, tolerance: Real) -> Result<Self> {
        Self::new(tolerance, self.max_iterations)
    }

    /// Same rule with a different iteration budget.
    pub fn with_max_iterations(self, max_iterations: usize) -> Self {
        Self {
            max_iterations,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_tolerances() {
        assert!(Convergence::new(1e-8, 100).is_ok());
        assert!(Convergence::new(0.0, 1).is_ok());
        assert!(Convergence::new(-1e-8, 100).is_err());
        assert!(Convergence::new(Real::NAN, 100).is_err());
        assert!(Convergence::new(Real::INFINITY, 100).is_err());
    }

    #[test]
    fn builders() {
        let c = Convergence::new(1e-6, 50).unwrap();
        let c2 = c.with_max_iterations(500);
        assert_eq!(c2.max_iterations, 500);
        assert_eq!(c2.tolerance, 1e-6);
        assert!(c.with_tolerance(-1.0).is_err());
        assert_eq!(c.with_tolerance(1e-3).unwrap().tolerance, 1e-3);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn loads_from_json() {
        let c: Convergence =
            serde_json::from_str(r#"{"tolerance":1e-6,"max_iterations":200}"#).unwrap();
        assert_eq!(c, Convergence::new(1e-6, 200).unwrap());
    }
}
