//! Analytical pricing formulas for the Merton model.
//!
//! This module provides the closed-form machinery the calibration layer
//! inverts:
//! - Black-Scholes European call value and delta (equity as a call on
//!   firm assets)
//! - Standard normal CDF/PDF
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: Supports `f64` and `f32`
//! - **Numerical Stability**: Uses an erfc-based CDF accurate to 1.5e-7;
//!   the calibration solver's convergence is sensitive to CDF accuracy

pub mod black_scholes;
pub mod distributions;

pub use black_scholes::{black_scholes_call, black_scholes_delta, d1, d2};
pub use distributions::{norm_cdf, norm_pdf};
