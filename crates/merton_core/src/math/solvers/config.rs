//! Solver configuration types.

/// Configuration for the nonlinear system solver.
///
/// Provides convergence settings shared by every solve: the residual
/// tolerance, a hard iteration cap, and the finite-difference step used
/// for Jacobian approximation.
///
/// # Example
///
/// ```
/// use merton_core::math::solvers::SystemSolverConfig;
///
/// // Use default configuration
/// let config = SystemSolverConfig::default();
/// assert!((config.tolerance - 1e-6).abs() < 1e-12);
/// assert_eq!(config.max_iterations, 100);
///
/// // Custom configuration
/// let custom = SystemSolverConfig::new(1e-8, 200);
/// assert_eq!(custom.max_iterations, 200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SystemSolverConfig {
    /// Convergence tolerance on the residual infinity norm.
    ///
    /// The solver stops when `max_i |F_i(x)| < tolerance`.
    pub tolerance: f64,

    /// Maximum number of Newton iterations before giving up.
    ///
    /// The cap is unconditional: a non-convergent solve terminates here
    /// and reports `converged = false` rather than looping indefinitely.
    pub max_iterations: usize,

    /// Relative step for forward-difference Jacobian columns.
    ///
    /// The actual step for unknown `j` is `fd_step * max(|x_j|, 1)`.
    pub fd_step: f64,
}

impl Default for SystemSolverConfig {
    /// Create a default configuration with sensible values.
    ///
    /// Default values:
    /// - `tolerance`: 1e-6
    /// - `max_iterations`: 100
    /// - `fd_step`: 1e-8
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 100,
            fd_step: 1e-8,
        }
    }
}

impl SystemSolverConfig {
    /// Create a new configuration with specified values.
    ///
    /// # Arguments
    ///
    /// * `tolerance` - Convergence tolerance (must be positive)
    /// * `max_iterations` - Maximum iteration count (must be > 0)
    ///
    /// # Panics
    ///
    /// Panics if `tolerance <= 0` or `max_iterations == 0`.
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        assert!(tolerance > 0.0, "tolerance must be positive");
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            tolerance,
            max_iterations,
            ..Default::default()
        }
    }

    /// Create a configuration with tighter tolerance (1e-10) and a larger
    /// iteration budget (500) for cases requiring extra precision.
    pub fn high_precision() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 500,
            ..Default::default()
        }
    }
}
