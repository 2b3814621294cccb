//! Exponential smoothing of default probability series.
//!
//! Raw per-day default probabilities are noisy; the smoother stabilises
//! a firm's series with an exponentially weighted moving average.
//!
//! ## Weighting convention
//!
//! This module uses the **adjusted** (bias-corrected) convention: the
//! smoothed value at index i is the weighted mean of all observations up
//! to i with weights (1−α)^(i−j),
//!
//! ```text
//! s_i = Σ_{j≤i} (1−α)^(i−j)·x_j / Σ_{j≤i} (1−α)^(i−j)
//! ```
//!
//! so early values are proper means of the available history rather than
//! being anchored to the first observation. The smoother is strictly
//! causal: s_i depends only on present and past raw values. Each firm's
//! series restarts the recursion independently.

use thiserror::Error;

/// Smoothing configuration errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SmoothingError {
    /// The decay parameter lies outside (0, 1].
    #[error("Invalid smoothing parameter alpha = {alpha}: must lie in (0, 1]")]
    InvalidAlpha {
        /// The rejected alpha value
        alpha: f64,
    },
}

/// Configuration for exponential smoothing.
///
/// # Example
///
/// ```
/// use merton_risk::smoothing::SmoothingConfig;
///
/// let config = SmoothingConfig::default();
/// assert!((config.alpha - 0.1).abs() < 1e-12);
///
/// // Out-of-range alpha is rejected
/// assert!(SmoothingConfig::new(0.0).is_err());
/// assert!(SmoothingConfig::new(1.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingConfig {
    /// Decay parameter α ∈ (0, 1]. Smaller values smooth harder;
    /// α = 1 reproduces the raw series.
    pub alpha: f64,
}

impl Default for SmoothingConfig {
    /// Default α = 0.1 (heavy smoothing).
    fn default() -> Self {
        Self { alpha: 0.1 }
    }
}

impl SmoothingConfig {
    /// Create a configuration, validating the decay parameter.
    ///
    /// # Errors
    ///
    /// [`SmoothingError::InvalidAlpha`] when `alpha` is not in (0, 1]
    /// or not finite.
    pub fn new(alpha: f64) -> Result<Self, SmoothingError> {
        if !alpha.is_finite() || alpha <= 0.0 || alpha > 1.0 {
            return Err(SmoothingError::InvalidAlpha { alpha });
        }
        Ok(Self { alpha })
    }
}

/// Exponentially weighted moving average smoother.
///
/// # Example
///
/// ```
/// use merton_risk::smoothing::{ExponentialSmoother, SmoothingConfig};
///
/// let smoother = ExponentialSmoother::new(SmoothingConfig::default());
/// let smoothed = smoother.smooth(&[0.1, 0.1, 0.1]);
///
/// // Constant input stays constant for any alpha
/// for value in smoothed {
///     assert!((value - 0.1).abs() < 1e-12);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExponentialSmoother {
    config: SmoothingConfig,
}

impl ExponentialSmoother {
    /// Create a smoother with the given configuration.
    pub fn new(config: SmoothingConfig) -> Self {
        Self { config }
    }

    /// Create a smoother with the default configuration.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &SmoothingConfig {
        &self.config
    }

    /// Smooth a chronologically ordered series.
    ///
    /// Runs the adjusted-weight recursion with numerator and denominator
    /// accumulators; an empty input yields an empty output.
    pub fn smooth(&self, series: &[f64]) -> Vec<f64> {
        let decay = 1.0 - self.config.alpha;

        let mut numerator = 0.0;
        let mut denominator = 0.0;

        series
            .iter()
            .map(|&raw| {
                numerator = raw + decay * numerator;
                denominator = 1.0 + decay * denominator;
                numerator / denominator
            })
            .collect()
    }
}
