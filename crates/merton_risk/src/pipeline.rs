//! Batch pipeline: observations in, records out.
//!
//! Ties the three stages together per firm-day:
//!
//! 1. validate the observation; not-calibratable rows short-circuit to a
//!    failure record without attempting a solve
//! 2. calibrate (V, σ_V) and compute risk measures
//! 3. smooth each firm's successful default probability series in
//!    chronological order
//!
//! Stage 2 is embarrassingly parallel (every firm-day is pure and
//! stateless) and runs on rayon when enabled. Stage 3 is an inherently
//! serial scan, but only within one firm; firms are independent of each
//! other.

use rayon::prelude::*;
use tracing::debug;

use merton_calibration::{AssetCalibrator, CalibratorConfig};
use merton_models::observation::MarketObservation;

use crate::measures::compute_risk_measures;
use crate::record::CalibrationRecord;
use crate::smoothing::{ExponentialSmoother, SmoothingConfig};

/// Configuration for the batch pipeline.
///
/// An explicit configuration object: the pipeline takes no module-level
/// toggles, so two engines with different settings can coexist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    /// Calibrator settings.
    pub calibrator: CalibratorConfig,
    /// Smoothing settings for the per-firm post-processing pass.
    pub smoothing: SmoothingConfig,
    /// Whether to calibrate observations on the rayon thread pool.
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            calibrator: CalibratorConfig::default(),
            smoothing: SmoothingConfig::default(),
            parallel: true,
        }
    }
}

/// Counters for one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Total observations fed in.
    pub observations: usize,
    /// Observations that passed validation and reached the solver.
    pub attempted: usize,
    /// Successful calibrations.
    pub succeeded: usize,
    /// Failed or never-attempted observations.
    pub failed: usize,
}

impl PipelineStats {
    /// Fraction of observations that calibrated successfully.
    pub fn success_rate(&self) -> f64 {
        if self.observations == 0 {
            0.0
        } else {
            self.succeeded as f64 / self.observations as f64
        }
    }
}

/// The batch engine.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use merton_models::MarketObservation;
/// use merton_risk::{BatchEngine, PipelineConfig};
///
/// let date = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
/// let observations = vec![
///     MarketObservation::new(date, "AAPL", 150.0, 0.35, 100.0, 0.02),
///     // Invalid row: zero equity blocks the attempt
///     MarketObservation::new(date, "AAPL", 0.0, 0.35, 100.0, 0.02),
/// ];
///
/// let engine = BatchEngine::new(PipelineConfig::default());
/// let (records, stats) = engine.run_with_stats(&observations);
///
/// assert_eq!(records.len(), 2);
/// assert!(records[0].success);
/// assert!(!records[1].success);
/// assert_eq!(stats.succeeded, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BatchEngine {
    config: PipelineConfig,
    calibrator: AssetCalibrator,
    smoother: ExponentialSmoother,
}

impl BatchEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            calibrator: AssetCalibrator::new(config.calibrator),
            smoother: ExponentialSmoother::new(config.smoothing),
            config,
        }
    }

    /// Create an engine with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(PipelineConfig::default())
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process a batch of observations into records, smoothing included.
    ///
    /// Output order matches input order regardless of the parallelism
    /// setting.
    pub fn run(&self, observations: &[MarketObservation]) -> Vec<CalibrationRecord> {
        self.run_with_stats(observations).0
    }

    /// Like [`run`](Self::run), additionally returning run counters.
    pub fn run_with_stats(
        &self,
        observations: &[MarketObservation],
    ) -> (Vec<CalibrationRecord>, PipelineStats) {
        let mut records: Vec<CalibrationRecord> = if self.config.parallel {
            observations
                .par_iter()
                .map(|obs| self.process_one(obs))
                .collect()
        } else {
            observations
                .iter()
                .map(|obs| self.process_one(obs))
                .collect()
        };

        self.apply_smoothing(&mut records);

        let attempted = observations
            .iter()
            .filter(|obs| obs.is_calibratable())
            .count();
        let succeeded = records.iter().filter(|r| r.success).count();
        let stats = PipelineStats {
            observations: observations.len(),
            attempted,
            succeeded,
            failed: observations.len() - succeeded,
        };

        debug!(
            observations = stats.observations,
            attempted = stats.attempted,
            succeeded = stats.succeeded,
            "batch calibration finished"
        );

        (records, stats)
    }

    /// Calibrate one observation into a record.
    fn process_one(&self, obs: &MarketObservation) -> CalibrationRecord {
        if !obs.is_calibratable() {
            return CalibrationRecord::failure(obs);
        }

        match self.calibrator.calibrate_observation(obs) {
            Some(state) => {
                let measures = compute_risk_measures(
                    state.asset_value,
                    obs.debt,
                    obs.maturity,
                    obs.rate,
                    state.asset_vol,
                );
                CalibrationRecord::success(obs, state, measures)
            }
            None => CalibrationRecord::failure(obs),
        }
    }

    /// Fill `pd_smoothed` per firm over the successful rows.
    ///
    /// Each firm's successful records feed the smoother in chronological
    /// order; the smoothed values are written back to their original
    /// positions, so the output retains input order.
    fn apply_smoothing(&self, records: &mut [CalibrationRecord]) {
        let mut firms: Vec<String> = Vec::new();
        for record in records.iter() {
            if !firms.contains(&record.firm_id) {
                firms.push(record.firm_id.clone());
            }
        }

        for firm_id in firms {
            let mut indices: Vec<usize> = records
                .iter()
                .enumerate()
                .filter(|(_, r)| r.firm_id == firm_id && r.success)
                .map(|(i, _)| i)
                .collect();
            indices.sort_by_key(|&i| records[i].date);

            if indices.is_empty() {
                continue;
            }

            let raw: Vec<f64> = indices
                .iter()
                .map(|&i| records[i].pd_raw.unwrap_or(f64::NAN))
                .collect();
            let smoothed = self.smoother.smooth(&raw);

            for (&i, value) in indices.iter().zip(smoothed) {
                records[i].pd_smoothed = Some(value);
            }

            debug!(firm = %firm_id, rows = indices.len(), "smoothed firm series");
        }
    }
}
