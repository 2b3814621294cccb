//! # Merton Models
//!
//! Option-pricing primitives and market observation types for the
//! structural credit workspace.
//!
//! This crate provides:
//! - Black-Scholes call value and delta as free functions (`analytical`)
//! - Standard normal distribution functions (`analytical::distributions`)
//! - Per-firm-day market observations with provenance tags (`observation`)
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`** for the pricing formulas
//! - **Free functions, no model object**: the Merton valuation carries no
//!   state beyond its arguments, so there is nothing for a struct to hold
//! - **Edge cases are values, not errors**: degenerate inputs map to
//!   well-defined prices (see `analytical::black_scholes`)

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod observation;

pub use observation::{DataSource, MarketObservation, DEFAULT_MATURITY};
