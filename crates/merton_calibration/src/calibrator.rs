//! The asset calibrator.

use merton_core::math::solvers::{NewtonSystemSolver, SystemSolverConfig};
use merton_models::analytical::{black_scholes_call, black_scholes_delta};
use merton_models::observation::MarketObservation;

use crate::error::CalibrationError;
use crate::state::CalibratedAssetState;

/// Residual returned for infeasible (V ≤ 0 or σ_V ≤ 0) candidates.
///
/// Steers the solver away from the region where the pricing formulas
/// must never be evaluated.
const INFEASIBLE_PENALTY: f64 = 1e10;

/// Maximum relative error tolerated by the self-consistency check.
const VALIDATION_TOLERANCE: f64 = 0.01;

/// Configuration for the asset calibrator.
///
/// Bundles the solver settings with the economic admissibility gate and
/// the initial-guess clamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibratorConfig {
    /// Nonlinear solver settings.
    pub solver: SystemSolverConfig,
    /// Required ratio of asset value to equity value (V > margin · E).
    pub equity_margin: f64,
    /// Lower bound of the plausible asset volatility band.
    pub min_asset_vol: f64,
    /// Upper bound of the plausible asset volatility band.
    pub max_asset_vol: f64,
    /// Floor applied to the delevered initial volatility guess.
    pub guess_vol_floor: f64,
    /// Cap applied to the delevered initial volatility guess.
    pub guess_vol_cap: f64,
}

impl Default for CalibratorConfig {
    /// Default gate: V must exceed E by 1%, σ_V must lie in
    /// [0.0001, 2.0], and the initial volatility guess is clamped to
    /// [0.01, 0.99].
    fn default() -> Self {
        Self {
            solver: SystemSolverConfig::default(),
            equity_margin: 1.01,
            min_asset_vol: 1e-4,
            max_asset_vol: 2.0,
            guess_vol_floor: 0.01,
            guess_vol_cap: 0.99,
        }
    }
}

/// Calibrates latent (V, σ_V) from observable (E, σ_E, D, T, r).
///
/// Solves the two-equation Merton system
///
/// ```text
/// E       = BlackScholesCall(V, D, T, r, σ_V)
/// σ_E · E = Φ(d₁) · σ_V · V
/// ```
///
/// and accepts the solution only when the solver reports convergence
/// *and* the solution is economically admissible. Numerical convergence
/// is necessary but not sufficient: a converged point with V at or below
/// the equity value, or with an implausible volatility, is still a
/// calibration failure.
///
/// Every calibration is pure and stateless; independent observations may
/// be calibrated concurrently without synchronisation.
///
/// # Example
///
/// ```
/// use merton_calibration::AssetCalibrator;
///
/// let calibrator = AssetCalibrator::with_defaults();
///
/// let state = calibrator.calibrate(150.0, 0.35, 100.0, 1.0, 0.02).unwrap();
/// assert!(state.asset_value > 151.5);
///
/// // Degenerate input: refused without attempting a solve
/// assert!(calibrator.calibrate(-1.0, 0.35, 100.0, 1.0, 0.02).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AssetCalibrator {
    config: CalibratorConfig,
}

impl AssetCalibrator {
    /// Create a calibrator with the given configuration.
    pub fn new(config: CalibratorConfig) -> Self {
        Self { config }
    }

    /// Create a calibrator with default configuration.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &CalibratorConfig {
        &self.config
    }

    /// Calibrate (V, σ_V) from one firm-day of observables.
    ///
    /// # Arguments
    ///
    /// * `equity_value` - Market value of equity (E)
    /// * `equity_vol` - Annualised equity volatility (σ_E)
    /// * `debt` - Face value of debt at maturity (D)
    /// * `maturity` - Time to maturity in years (T)
    /// * `rate` - Annualised risk-free rate (r)
    ///
    /// # Returns
    ///
    /// The admissible calibrated state, or `None` when the inputs are
    /// outside the domain, the solver does not converge, or the solution
    /// fails the economic gate. This method never panics on data
    /// conditions and never returns a partially valid state.
    pub fn calibrate(
        &self,
        equity_value: f64,
        equity_vol: f64,
        debt: f64,
        maturity: f64,
        rate: f64,
    ) -> Option<CalibratedAssetState> {
        if equity_value <= 0.0 || equity_vol <= 0.0 || debt < 0.0 || maturity <= 0.0 {
            return None;
        }

        let initial = self.initial_guess(equity_value, equity_vol, debt);

        let residuals = move |params: &[f64]| -> Vec<f64> {
            let (asset_value, asset_vol) = (params[0], params[1]);
            if asset_value <= 0.0 || asset_vol <= 0.0 {
                return vec![INFEASIBLE_PENALTY, INFEASIBLE_PENALTY];
            }

            let implied_equity = black_scholes_call(asset_value, debt, maturity, rate, asset_vol);
            let delta = black_scholes_delta(asset_value, debt, maturity, rate, asset_vol);

            vec![
                implied_equity - equity_value,
                delta * asset_vol * asset_value - equity_vol * equity_value,
            ]
        };

        let solver = NewtonSystemSolver::new(self.config.solver);
        let result = match solver.solve(residuals, initial) {
            Ok(result) => result,
            // Solver faults (singular Jacobian, non-finite excursions) are
            // calibration failures, not caller errors.
            Err(_) => return None,
        };

        if !result.converged {
            return None;
        }

        let asset_value = result.params[0];
        let asset_vol = result.params[1];

        self.admit(equity_value, asset_value, asset_vol)
    }

    /// Calibrate directly from a [`MarketObservation`].
    pub fn calibrate_observation(&self, obs: &MarketObservation) -> Option<CalibratedAssetState> {
        self.calibrate(
            obs.equity_value,
            obs.equity_vol,
            obs.debt,
            obs.maturity,
            obs.rate,
        )
    }

    /// Calibrate and verify the solution against the observables.
    ///
    /// Recomputes E and σ_E from the calibrated state using the identical
    /// pricing primitives as the forward direction and fails with a
    /// descriptive diagnostic when either moves by more than 1% relative
    /// error. A self-consistency failure indicates a solver artefact that
    /// slipped through the residual tolerance, not an alternate algorithm
    /// disagreeing.
    ///
    /// # Errors
    ///
    /// - [`CalibrationError::Rejected`] when the base calibration returns
    ///   no admissible solution
    /// - [`CalibrationError::SelfConsistency`] when the round-trip check
    ///   fails
    pub fn calibrate_with_validation(
        &self,
        equity_value: f64,
        equity_vol: f64,
        debt: f64,
        maturity: f64,
        rate: f64,
    ) -> Result<CalibratedAssetState, CalibrationError> {
        let state = self
            .calibrate(equity_value, equity_vol, debt, maturity, rate)
            .ok_or(CalibrationError::Rejected)?;

        let implied_equity =
            black_scholes_call(state.asset_value, debt, maturity, rate, state.asset_vol);
        let equity_error = (implied_equity - equity_value).abs() / equity_value;
        if equity_error > VALIDATION_TOLERANCE {
            return Err(CalibrationError::SelfConsistency {
                quantity: "equity value",
                implied: implied_equity,
                observed: equity_value,
                relative_error: equity_error,
            });
        }

        let delta = black_scholes_delta(state.asset_value, debt, maturity, rate, state.asset_vol);
        let implied_vol = delta * state.asset_vol * state.asset_value / equity_value;
        let vol_error = (implied_vol - equity_vol).abs() / equity_vol;
        if vol_error > VALIDATION_TOLERANCE {
            return Err(CalibrationError::SelfConsistency {
                quantity: "equity volatility",
                implied: implied_vol,
                observed: equity_vol,
                relative_error: vol_error,
            });
        }

        Ok(state)
    }

    /// Starting point for the solve.
    ///
    /// V₀ = E + D (balance-sheet identity); σ_V₀ delevers the equity
    /// volatility by the equity share of assets, clamped to the
    /// configured band, falling back to σ_E itself when E + D ≤ 0.
    fn initial_guess(&self, equity_value: f64, equity_vol: f64, debt: f64) -> Vec<f64> {
        let asset_value = equity_value + debt;

        let asset_vol = if asset_value > 0.0 {
            (equity_vol * equity_value / asset_value)
                .clamp(self.config.guess_vol_floor, self.config.guess_vol_cap)
        } else {
            equity_vol
        };

        vec![asset_value, asset_vol]
    }

    /// Economic admissibility gate applied after the solve.
    fn admit(
        &self,
        equity_value: f64,
        asset_value: f64,
        asset_vol: f64,
    ) -> Option<CalibratedAssetState> {
        if asset_value <= 0.0 || asset_vol <= 0.0 {
            return None;
        }
        // Equity is a levered claim on assets: V ≤ E means the leverage
        // has implicitly inverted.
        if asset_value < equity_value * self.config.equity_margin {
            return None;
        }
        if asset_vol < self.config.min_asset_vol || asset_vol > self.config.max_asset_vol {
            return None;
        }

        Some(CalibratedAssetState::new(asset_value, asset_vol))
    }
}

/// Calibrate (V, σ_V) with default configuration.
///
/// Free-function form of [`AssetCalibrator::calibrate`] for callers that
/// do not need to hold a configured calibrator.
///
/// # Examples
/// ```
/// use merton_calibration::calibrate_asset_parameters;
///
/// let (v, vol) = calibrate_asset_parameters(150.0, 0.35, 100.0, 1.0, 0.02).unwrap();
/// assert!(v > 151.5);
/// assert!(vol > 0.0001 && vol < 2.0);
/// ```
pub fn calibrate_asset_parameters(
    equity_value: f64,
    equity_vol: f64,
    debt: f64,
    maturity: f64,
    rate: f64,
) -> Option<(f64, f64)> {
    AssetCalibrator::with_defaults()
        .calibrate(equity_value, equity_vol, debt, maturity, rate)
        .map(|state| (state.asset_value, state.asset_vol))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    // ==========================================================
    // Input validation
    // ==========================================================

    #[test]
    fn test_rejects_non_positive_equity() {
        let calibrator = AssetCalibrator::with_defaults();
        assert!(calibrator.calibrate(0.0, 0.35, 100.0, 1.0, 0.02).is_none());
        assert!(calibrator.calibrate(-10.0, 0.35, 100.0, 1.0, 0.02).is_none());
    }

    #[test]
    fn test_rejects_non_positive_equity_vol() {
        let calibrator = AssetCalibrator::with_defaults();
        assert!(calibrator.calibrate(150.0, 0.0, 100.0, 1.0, 0.02).is_none());
        assert!(calibrator.calibrate(150.0, -0.1, 100.0, 1.0, 0.02).is_none());
    }

    #[test]
    fn test_rejects_negative_debt() {
        let calibrator = AssetCalibrator::with_defaults();
        assert!(calibrator.calibrate(150.0, 0.35, -1.0, 1.0, 0.02).is_none());
    }

    #[test]
    fn test_rejects_non_positive_maturity() {
        let calibrator = AssetCalibrator::with_defaults();
        assert!(calibrator.calibrate(150.0, 0.35, 100.0, 0.0, 0.02).is_none());
    }

    // ==========================================================
    // Successful calibration
    // ==========================================================

    #[test]
    fn test_reference_calibration() {
        // E=150, σ_E=0.35, D=100, T=1, r=0.02
        let calibrator = AssetCalibrator::with_defaults();
        let state = calibrator.calibrate(150.0, 0.35, 100.0, 1.0, 0.02).unwrap();

        assert!(state.asset_value > 151.5);
        assert!(state.asset_vol >= 0.0001 && state.asset_vol <= 2.0);

        // The solution must reproduce the observables
        let implied_equity = black_scholes_call(state.asset_value, 100.0, 1.0, 0.02, state.asset_vol);
        assert_relative_eq!(implied_equity, 150.0, max_relative = 1e-4);
    }

    #[test]
    fn test_calibration_deterministic() {
        let calibrator = AssetCalibrator::with_defaults();
        let a = calibrator.calibrate(150.0, 0.35, 100.0, 1.0, 0.02).unwrap();
        let b = calibrator.calibrate(150.0, 0.35, 100.0, 1.0, 0.02).unwrap();

        // Pure and stateless: repeated runs are bit-identical
        assert_eq!(a.asset_value.to_bits(), b.asset_value.to_bits());
        assert_eq!(a.asset_vol.to_bits(), b.asset_vol.to_bits());
    }

    #[test]
    fn test_calibrate_observation() {
        let obs = MarketObservation::new(
            NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(),
            "AAPL",
            150.0,
            0.35,
            100.0,
            0.02,
        );
        let calibrator = AssetCalibrator::with_defaults();
        let state = calibrator.calibrate_observation(&obs).unwrap();
        assert!(state.asset_value > 150.0);
    }

    #[test]
    fn test_free_function_matches_calibrator() {
        let (v, vol) = calibrate_asset_parameters(150.0, 0.35, 100.0, 1.0, 0.02).unwrap();
        let state = AssetCalibrator::with_defaults()
            .calibrate(150.0, 0.35, 100.0, 1.0, 0.02)
            .unwrap();
        assert_eq!(v.to_bits(), state.asset_value.to_bits());
        assert_eq!(vol.to_bits(), state.asset_vol.to_bits());
    }

    // ==========================================================
    // Admissibility gate
    // ==========================================================

    #[test]
    fn test_rejects_asset_value_too_close_to_equity() {
        // Negligible debt: the implied V sits a fraction above E, inside
        // the 1% margin, so the gate must reject even though the solver
        // converges.
        let calibrator = AssetCalibrator::with_defaults();
        assert!(calibrator.calibrate(100.0, 0.3, 0.001, 1.0, 0.02).is_none());
    }

    #[test]
    fn test_rejects_implausibly_small_asset_vol() {
        // Extreme leverage with near-dead equity volatility: the implied
        // σ_V collapses below the 0.0001 floor.
        let calibrator = AssetCalibrator::with_defaults();
        assert!(calibrator.calibrate(1.0, 0.05, 10_000.0, 1.0, 0.02).is_none());
    }

    // ==========================================================
    // Validating path
    // ==========================================================

    #[test]
    fn test_with_validation_accepts_good_solution() {
        let calibrator = AssetCalibrator::with_defaults();
        let state = calibrator
            .calibrate_with_validation(150.0, 0.35, 100.0, 1.0, 0.02)
            .unwrap();
        assert!(state.asset_value > 151.5);
    }

    #[test]
    fn test_with_validation_rejected_on_bad_input() {
        let calibrator = AssetCalibrator::with_defaults();
        let err = calibrator
            .calibrate_with_validation(-5.0, 0.35, 100.0, 1.0, 0.02)
            .unwrap_err();
        assert_eq!(err, CalibrationError::Rejected);
    }

    // ==========================================================
    // Initial guess
    // ==========================================================

    #[test]
    fn test_initial_guess_delevers_volatility() {
        let calibrator = AssetCalibrator::with_defaults();
        let guess = calibrator.initial_guess(150.0, 0.35, 100.0);

        assert_relative_eq!(guess[0], 250.0, epsilon = 1e-12);
        // σ_V₀ = 0.35 · 150 / 250 = 0.21
        assert_relative_eq!(guess[1], 0.21, epsilon = 1e-12);
    }

    #[test]
    fn test_initial_guess_clamped() {
        let calibrator = AssetCalibrator::with_defaults();

        // Heavily levered: raw guess 0.35 · 1 / 1001 ≈ 0.00035 → floor
        let guess = calibrator.initial_guess(1.0, 0.35, 1000.0);
        assert_relative_eq!(guess[1], 0.01, epsilon = 1e-12);

        // Unlevered and violent: raw guess 1.5 → cap
        let guess = calibrator.initial_guess(100.0, 1.5, 0.0);
        assert_relative_eq!(guess[1], 0.99, epsilon = 1e-12);
    }
}
