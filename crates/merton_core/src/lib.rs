//! # merton_core: Numerical Foundation for Structural Credit Modelling
//!
//! ## Layer 1 (Foundation) Role
//!
//! merton_core serves as the bottom layer of the workspace, providing:
//! - A damped Newton solver for square nonlinear systems (`math::solvers`)
//! - Structured error types: `SolverError` (`types::error`)
//!
//! The calibration layer uses the solver to invert the Merton
//! observable-to-latent map; nothing in this crate knows about option
//! pricing or credit risk.
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other merton_* crates, with minimal
//! external dependencies:
//! - thiserror: Structured error types
//! - serde: Serialisation support (optional)
//!
//! ## Usage Example
//!
//! ```rust
//! use merton_core::math::solvers::{NewtonSystemSolver, SystemSolverConfig};
//!
//! // Solve x + y = 3, x - y = 1
//! let system = |p: &[f64]| vec![p[0] + p[1] - 3.0, p[0] - p[1] - 1.0];
//!
//! let solver = NewtonSystemSolver::new(SystemSolverConfig::default());
//! let result = solver.solve(system, vec![0.0, 0.0]).unwrap();
//!
//! assert!(result.converged);
//! assert!((result.params[0] - 2.0).abs() < 1e-6);
//! assert!((result.params[1] - 1.0).abs() < 1e-6);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for solver configuration and errors

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
