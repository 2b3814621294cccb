//! Root-finding for square nonlinear systems.
//!
//! This module provides the numerical machinery behind structural model
//! calibration: a damped Newton method that drives a vector of residuals
//! F(x) to zero for as many unknowns as equations.
//!
//! ## Available Solvers
//!
//! - [`NewtonSystemSolver`]: Damped Newton iteration with a
//!   finite-difference Jacobian and backtracking step control
//!
//! ## Configuration
//!
//! The solver uses [`SystemSolverConfig`] for configuring:
//! - `tolerance`: Convergence tolerance on the residual infinity norm
//!   (default: 1e-6)
//! - `max_iterations`: Hard iteration cap (default: 100); the solver
//!   always terminates, converged or not
//! - `fd_step`: Relative step for finite-difference Jacobians
//!
//! ## Convergence Reporting
//!
//! Convergence is reported explicitly via [`SystemSolverResult::converged`].
//! A run that exhausts its iteration budget returns `Ok` with
//! `converged = false`; `Err` is reserved for structural faults (empty
//! systems, dimension mismatches, singular Jacobians, non-finite values).
//!
//! ## Example
//!
//! ```
//! use merton_core::math::solvers::{NewtonSystemSolver, SystemSolverConfig};
//!
//! // Solve x² + y² = 25, x·y = 12
//! let system = |p: &[f64]| {
//!     vec![p[0] * p[0] + p[1] * p[1] - 25.0, p[0] * p[1] - 12.0]
//! };
//!
//! let solver = NewtonSystemSolver::new(SystemSolverConfig::default());
//! let result = solver.solve(system, vec![2.0, 5.0]).unwrap();
//!
//! assert!(result.converged);
//! assert!((result.params[0] - 3.0).abs() < 1e-6);
//! assert!((result.params[1] - 4.0).abs() < 1e-6);
//! ```

mod config;
mod newton_system;

pub use config::SystemSolverConfig;
pub use newton_system::{NewtonSystemSolver, SystemSolverResult};
