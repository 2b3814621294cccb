//! Per-firm-day calibration records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use merton_calibration::CalibratedAssetState;
use merton_models::observation::{DataSource, MarketObservation};

use crate::measures::RiskMeasures;

/// One output row: the observation, the calibrated state (when present),
/// the risk measures (when present), and a success flag.
///
/// Records are created once per firm-day and never mutated afterwards,
/// with a single exception: the smoothing pass fills `pd_smoothed` over
/// a firm's chronologically ordered successful rows.
///
/// Serialised field names follow the tabular output contract consumed
/// downstream (`E`, `sigma_E`, `D`, `r`, `V`, `sigma_V`, `DD`, `PD_raw`,
/// `PD_smoothed`, `success`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationRecord {
    /// Observation date.
    pub date: NaiveDate,
    /// Firm identifier.
    pub firm_id: String,
    /// Observed equity value.
    #[serde(rename = "E")]
    pub equity_value: f64,
    /// Observed equity volatility.
    #[serde(rename = "sigma_E")]
    pub equity_vol: f64,
    /// Debt face value.
    #[serde(rename = "D")]
    pub debt: f64,
    /// Risk-free rate.
    #[serde(rename = "r")]
    pub rate: f64,
    /// Implied asset value; absent when calibration failed.
    #[serde(rename = "V")]
    pub asset_value: Option<f64>,
    /// Implied asset volatility; absent when calibration failed.
    #[serde(rename = "sigma_V")]
    pub asset_vol: Option<f64>,
    /// Distance-to-default; absent when calibration failed.
    #[serde(rename = "DD")]
    pub distance_to_default: Option<f64>,
    /// Raw default probability; absent when calibration failed.
    #[serde(rename = "PD_raw")]
    pub pd_raw: Option<f64>,
    /// Smoothed default probability; filled by the smoothing pass for
    /// successful rows.
    #[serde(rename = "PD_smoothed")]
    pub pd_smoothed: Option<f64>,
    /// Whether calibration succeeded for this row.
    pub success: bool,
    /// Provenance of the underlying market data.
    pub source: DataSource,
}

impl CalibrationRecord {
    /// Record for an observation that failed or was never attempted.
    pub fn failure(obs: &MarketObservation) -> Self {
        Self {
            date: obs.date,
            firm_id: obs.firm_id.clone(),
            equity_value: obs.equity_value,
            equity_vol: obs.equity_vol,
            debt: obs.debt,
            rate: obs.rate,
            asset_value: None,
            asset_vol: None,
            distance_to_default: None,
            pd_raw: None,
            pd_smoothed: None,
            success: false,
            source: obs.source,
        }
    }

    /// Record for a successful calibration.
    pub fn success(
        obs: &MarketObservation,
        state: CalibratedAssetState,
        measures: RiskMeasures,
    ) -> Self {
        Self {
            date: obs.date,
            firm_id: obs.firm_id.clone(),
            equity_value: obs.equity_value,
            equity_vol: obs.equity_vol,
            debt: obs.debt,
            rate: obs.rate,
            asset_value: Some(state.asset_value),
            asset_vol: Some(state.asset_vol),
            distance_to_default: Some(measures.distance_to_default),
            pd_raw: Some(measures.default_probability),
            pd_smoothed: None,
            success: true,
            source: obs.source,
        }
    }
}
