//! Error types for structured error handling.
//!
//! This module provides:
//! - `SolverError`: Errors from the nonlinear system solver

use thiserror::Error;

/// Nonlinear system solver errors.
///
/// Provides structured error handling for solver operations with
/// descriptive context for each failure mode.
///
/// Running out of iterations is deliberately *not* an error: the solver
/// reports it through the `converged` flag on its result, so callers can
/// distinguish "did not converge" from "could not run at all".
///
/// # Variants
/// - `EmptySystem`: No equations were supplied
/// - `DimensionMismatch`: Residual count differs from unknown count
/// - `SingularJacobian`: Linear step could not be computed
/// - `NumericalInstability`: Iteration produced non-finite values
///
/// # Examples
/// ```
/// use merton_core::types::SolverError;
///
/// let err = SolverError::SingularJacobian { iteration: 4 };
/// assert!(format!("{}", err).contains("iteration 4"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// No equations were supplied to the solver.
    #[error("Empty system: no equations to solve")]
    EmptySystem,

    /// The residual vector length does not match the number of unknowns.
    #[error("Dimension mismatch: {equations} equations for {unknowns} unknowns")]
    DimensionMismatch {
        /// Number of residuals returned by the system function
        equations: usize,
        /// Number of unknowns in the parameter vector
        unknowns: usize,
    },

    /// The Jacobian was singular (or numerically so) and no Newton step
    /// could be computed.
    #[error("Singular Jacobian at iteration {iteration}")]
    SingularJacobian {
        /// Iteration at which the singular Jacobian was encountered
        iteration: usize,
    },

    /// Numerical instability during iteration.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_system_display() {
        let err = SolverError::EmptySystem;
        assert_eq!(format!("{}", err), "Empty system: no equations to solve");
    }

    #[test]
    fn test_dimension_mismatch_display() {
        let err = SolverError::DimensionMismatch {
            equations: 3,
            unknowns: 2,
        };
        assert_eq!(
            format!("{}", err),
            "Dimension mismatch: 3 equations for 2 unknowns"
        );
    }

    #[test]
    fn test_singular_jacobian_display() {
        let err = SolverError::SingularJacobian { iteration: 7 };
        assert_eq!(format!("{}", err), "Singular Jacobian at iteration 7");
    }

    #[test]
    fn test_numerical_instability_display() {
        let err = SolverError::NumericalInstability("residual overflow".to_string());
        assert_eq!(
            format!("{}", err),
            "Numerical instability: residual overflow"
        );
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = SolverError::EmptySystem;
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_clone_and_equality() {
        let err1 = SolverError::SingularJacobian { iteration: 2 };
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
