//! Calibration error types.

use thiserror::Error;

/// Errors from the validating calibration path.
///
/// The plain [`calibrate`](crate::AssetCalibrator::calibrate) path
/// reports failure as an absent result; this type exists for
/// [`calibrate_with_validation`](crate::AssetCalibrator::calibrate_with_validation),
/// which promises a descriptive diagnostic instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    /// The base calibration produced no admissible solution
    /// (invalid inputs, non-convergence, or a solution outside the
    /// economic gate).
    #[error("Calibration rejected: no admissible (V, sigma_V) for the observed inputs")]
    Rejected,

    /// The solution failed the self-consistency check: recomputing the
    /// observable from the calibrated state moved it by more than the
    /// permitted relative error.
    #[error(
        "Self-consistency check failed for {quantity}: implied {implied:.6}, \
         observed {observed:.6} (relative error {relative_error:.4})"
    )]
    SelfConsistency {
        /// Which observable failed ("equity value" or "equity volatility")
        quantity: &'static str,
        /// Value recomputed from the calibrated state
        implied: f64,
        /// Value observed in the market
        observed: f64,
        /// Relative error between the two
        relative_error: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_display() {
        let err = CalibrationError::Rejected;
        assert!(format!("{}", err).contains("no admissible"));
    }

    #[test]
    fn test_self_consistency_display() {
        let err = CalibrationError::SelfConsistency {
            quantity: "equity value",
            implied: 148.2,
            observed: 150.0,
            relative_error: 0.012,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("equity value"));
        assert!(msg.contains("0.0120"));
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = CalibrationError::Rejected;
        let _: &dyn std::error::Error = &err;
    }
}
