//! # merton_calibration
//!
//! Inversion of the Merton observable-to-latent map.
//!
//! A firm's asset value V and asset volatility σ_V are not observable;
//! its equity value E and equity volatility σ_E are. Under the Merton
//! model the two pairs are linked by a simultaneous system:
//!
//! ```text
//! E       = BlackScholesCall(V, D, T, r, σ_V)
//! σ_E · E = Φ(d₁) · σ_V · V
//! ```
//!
//! Neither equation is invertible in closed form, so this crate solves
//! the system numerically per firm-day and gates the solution on
//! economic admissibility.
//!
//! ## Architecture Position
//!
//! Sits between the models layer and the risk layer: depends on
//! `merton_core` (solver) and `merton_models` (pricing primitives),
//! produces the [`CalibratedAssetState`] the risk measures consume.
//!
//! ## Failure Contract
//!
//! Domain-level failure (invalid inputs, non-convergence, economically
//! inadmissible solutions) is an absent result, never a panic or error:
//! [`AssetCalibrator::calibrate`] returns `Option`. The validation
//! wrapper returns a descriptive [`CalibrationError`] instead, for
//! callers that want diagnostics.
//!
//! ## Example
//!
//! ```rust
//! use merton_calibration::AssetCalibrator;
//!
//! let calibrator = AssetCalibrator::with_defaults();
//! let state = calibrator.calibrate(150.0, 0.35, 100.0, 1.0, 0.02).unwrap();
//!
//! assert!(state.asset_value > 150.0 * 1.01);
//! assert!(state.asset_vol > 0.0001 && state.asset_vol < 2.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

mod calibrator;
mod error;
mod state;

pub use calibrator::{calibrate_asset_parameters, AssetCalibrator, CalibratorConfig};
pub use error::CalibrationError;
pub use state::CalibratedAssetState;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        calibrate_asset_parameters, AssetCalibrator, CalibratedAssetState, CalibrationError,
        CalibratorConfig,
    };
}
