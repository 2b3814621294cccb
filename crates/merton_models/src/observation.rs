//! Per-firm-day market observations.
//!
//! A [`MarketObservation`] bundles the observable inputs the calibration
//! layer consumes: equity value, equity volatility, debt face value and
//! the risk-free rate, dated and tagged with the firm they belong to.
//! Observations are immutable once constructed.

use chrono::NaiveDate;

/// Module-wide time to maturity in years.
///
/// The reference system evaluates the Merton model at a fixed one-year
/// horizon; observations default to this constant.
pub const DEFAULT_MATURITY: f64 = 1.0;

/// Provenance of the market data behind an observation.
///
/// Rate providers are not always reachable; when the loading layer falls
/// back to approximate rates it tags the data so downstream consumers
/// (including tests) can assert on provenance instead of parsing log
/// output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DataSource {
    /// Data obtained from the live provider.
    #[default]
    Live,
    /// Data reconstructed from an approximate fallback source.
    Approximate,
}

/// One firm-day of observable market data.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use merton_models::observation::MarketObservation;
///
/// let obs = MarketObservation::new(
///     NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(),
///     "AAPL",
///     150.0, // equity value
///     0.35,  // equity volatility
///     100.0, // debt face value
///     0.02,  // risk-free rate
/// );
///
/// assert!(obs.is_calibratable());
/// assert_eq!(obs.maturity, 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketObservation {
    /// Observation date.
    pub date: NaiveDate,
    /// Firm identifier (e.g. ticker).
    pub firm_id: String,
    /// Market value of equity (E).
    pub equity_value: f64,
    /// Annualised equity volatility (σ_E).
    pub equity_vol: f64,
    /// Face value of debt due at maturity (D).
    pub debt: f64,
    /// Annualised risk-free rate (r).
    pub rate: f64,
    /// Time to maturity in years (T).
    pub maturity: f64,
    /// Data provenance tag.
    pub source: DataSource,
}

impl MarketObservation {
    /// Create an observation with the default maturity and live provenance.
    pub fn new(
        date: NaiveDate,
        firm_id: impl Into<String>,
        equity_value: f64,
        equity_vol: f64,
        debt: f64,
        rate: f64,
    ) -> Self {
        Self {
            date,
            firm_id: firm_id.into(),
            equity_value,
            equity_vol,
            debt,
            rate,
            maturity: DEFAULT_MATURITY,
            source: DataSource::Live,
        }
    }

    /// Override the time to maturity.
    pub fn with_maturity(mut self, maturity: f64) -> Self {
        self.maturity = maturity;
        self
    }

    /// Override the provenance tag.
    pub fn with_source(mut self, source: DataSource) -> Self {
        self.source = source;
        self
    }

    /// Whether calibration should be attempted for this observation.
    ///
    /// Requires E > 0, σ_E > 0, D > 0 and T > 0, with every numeric field
    /// finite. Violations short-circuit to a not-attempted result rather
    /// than an error.
    pub fn is_calibratable(&self) -> bool {
        let finite = self.equity_value.is_finite()
            && self.equity_vol.is_finite()
            && self.debt.is_finite()
            && self.rate.is_finite()
            && self.maturity.is_finite();

        finite
            && self.equity_value > 0.0
            && self.equity_vol > 0.0
            && self.debt > 0.0
            && self.maturity > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 3, 1).unwrap()
    }

    #[test]
    fn test_new_defaults() {
        let obs = MarketObservation::new(date(), "JPM", 120.0, 0.3, 80.0, 0.015);
        assert_eq!(obs.maturity, DEFAULT_MATURITY);
        assert_eq!(obs.source, DataSource::Live);
        assert_eq!(obs.firm_id, "JPM");
    }

    #[test]
    fn test_builders() {
        let obs = MarketObservation::new(date(), "F", 30.0, 0.5, 100.0, 0.01)
            .with_maturity(0.5)
            .with_source(DataSource::Approximate);
        assert_eq!(obs.maturity, 0.5);
        assert_eq!(obs.source, DataSource::Approximate);
    }

    #[test]
    fn test_is_calibratable() {
        let obs = MarketObservation::new(date(), "XOM", 90.0, 0.25, 60.0, 0.02);
        assert!(obs.is_calibratable());
    }

    #[test]
    fn test_non_positive_fields_block_calibration() {
        let base = MarketObservation::new(date(), "TSLA", 200.0, 0.6, 50.0, 0.02);

        let mut obs = base.clone();
        obs.equity_value = 0.0;
        assert!(!obs.is_calibratable());

        let mut obs = base.clone();
        obs.equity_vol = -0.1;
        assert!(!obs.is_calibratable());

        let mut obs = base.clone();
        obs.debt = 0.0;
        assert!(!obs.is_calibratable());

        let mut obs = base;
        obs.maturity = 0.0;
        assert!(!obs.is_calibratable());
    }

    #[test]
    fn test_non_finite_fields_block_calibration() {
        let mut obs = MarketObservation::new(date(), "AAPL", 150.0, 0.35, 100.0, 0.02);
        obs.rate = f64::NAN;
        assert!(!obs.is_calibratable());

        let mut obs = MarketObservation::new(date(), "AAPL", 150.0, 0.35, 100.0, 0.02);
        obs.debt = f64::INFINITY;
        assert!(!obs.is_calibratable());
    }

    #[test]
    fn test_negative_rate_is_calibratable() {
        let obs = MarketObservation::new(date(), "AAPL", 150.0, 0.35, 100.0, -0.005);
        assert!(obs.is_calibratable());
    }
}
