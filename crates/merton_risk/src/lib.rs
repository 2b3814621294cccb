//! # Merton Risk
//!
//! Credit risk measures and the per-firm-day batch pipeline.
//!
//! This crate provides:
//! - Distance-to-default and default probability from a calibrated asset
//!   state (`measures`)
//! - Exponential smoothing of per-firm default probability series
//!   (`smoothing`)
//! - The per-firm-day output row (`record`)
//! - A rayon-parallel batch engine tying calibration, measures and
//!   smoothing together (`pipeline`)
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │              merton_risk                 │
//! ├──────────────────────────────────────────┤
//! │  measures/   - DD, PD                    │
//! │  smoothing/  - per-firm EWMA             │
//! │  record/     - CalibrationRecord rows    │
//! │  pipeline/   - parallel batch engine     │
//! └──────────────────────────────────────────┘
//!          ↓
//! ┌──────────────────────────────────────────┐
//! │          merton_calibration              │
//! │  (V, σ_V) from (E, σ_E, D, T, r)         │
//! └──────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//!
//! Each firm-day is pure and stateless, so the batch engine calibrates
//! observations in parallel with no synchronisation. Only the smoothing
//! pass is serial, and only within a single firm's chronology.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use merton_models::MarketObservation;
//! use merton_risk::{BatchEngine, PipelineConfig};
//!
//! let observations = vec![
//!     MarketObservation::new(
//!         NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(),
//!         "AAPL",
//!         150.0,
//!         0.35,
//!         100.0,
//!         0.02,
//!     ),
//! ];
//!
//! let engine = BatchEngine::new(PipelineConfig::default());
//! let records = engine.run(&observations);
//!
//! assert!(records[0].success);
//! assert!(records[0].pd_raw.unwrap() > 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod measures;
pub mod pipeline;
pub mod record;
pub mod smoothing;

// Re-export commonly used types
pub use measures::{compute_risk_measures, default_probability, distance_to_default, RiskMeasures};
pub use pipeline::{BatchEngine, PipelineConfig, PipelineStats};
pub use record::CalibrationRecord;
pub use smoothing::{ExponentialSmoother, SmoothingConfig, SmoothingError};
