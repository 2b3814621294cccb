//! Distance-to-default and default probability.
//!
//! Closed-form risk measures evaluated on a calibrated asset state.
//! Both are pure functions of (V, D, T, r, σ_V); they carry no state and
//! are recomputed fresh on every call.
//!
//! ## Fail-soft contract
//!
//! [`distance_to_default`] guards its own domain and returns NaN for
//! degenerate inputs. [`default_probability`] does not re-validate: its
//! inputs are expected to have passed the calibrator's admissibility
//! gate, and malformed values (e.g. V ≤ 0) propagate NaN through the
//! logarithm rather than raising.

use merton_models::analytical::norm_cdf;

/// Risk measures for one firm-day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskMeasures {
    /// Distance-to-default in standard deviations (unbounded; NaN when
    /// undefined).
    pub distance_to_default: f64,
    /// Risk-neutral default probability in [0, 1].
    pub default_probability: f64,
}

/// Distance-to-default.
///
/// Number of standard deviations by which the expected asset value at
/// maturity exceeds the debt threshold:
///
/// ```text
/// E[V_T]   = V·e^(rT)
/// std(V_T) = V·e^(rT)·√(e^(σ_V²·T) − 1)
/// DD       = (E[V_T] − D) / std(V_T)
/// ```
///
/// Returns NaN when V ≤ 0, σ_V ≤ 0, T ≤ 0, D ≤ 0, or the implied
/// standard deviation is zero (degenerate zero-spread distribution).
///
/// # Examples
/// ```
/// use merton_risk::measures::distance_to_default;
///
/// // Assets far above debt: many standard deviations of cushion
/// let dd = distance_to_default(1000.0, 10.0, 1.0, 0.02, 0.2);
/// assert!(dd > 4.0);
///
/// // Degenerate input
/// assert!(distance_to_default(-1.0, 10.0, 1.0, 0.02, 0.2).is_nan());
/// ```
pub fn distance_to_default(
    asset_value: f64,
    debt: f64,
    maturity: f64,
    rate: f64,
    asset_vol: f64,
) -> f64 {
    if asset_value <= 0.0 || asset_vol <= 0.0 || maturity <= 0.0 || debt <= 0.0 {
        return f64::NAN;
    }

    let expected = asset_value * (rate * maturity).exp();
    let std_dev = expected * ((asset_vol * asset_vol * maturity).exp() - 1.0).sqrt();

    if std_dev == 0.0 {
        return f64::NAN;
    }

    (expected - debt) / std_dev
}

/// Risk-neutral default probability.
///
/// Probability that the asset value at maturity falls below the debt
/// face value:
///
/// ```text
/// d₂ = (ln(V/D) + (r − σ_V²/2)·T) / (σ_V·√T)
/// PD = Φ(−d₂)
/// ```
///
/// Bounded in [0, 1] for valid inputs. No domain guard of its own:
/// callers are expected to pass values already validated by the
/// calibrator, and malformed inputs propagate NaN.
///
/// # Examples
/// ```
/// use merton_risk::measures::default_probability;
///
/// let pd = default_probability(250.0, 100.0, 1.0, 0.02, 0.2);
/// assert!(pd > 0.0 && pd < 1.0);
/// ```
pub fn default_probability(
    asset_value: f64,
    debt: f64,
    maturity: f64,
    rate: f64,
    asset_vol: f64,
) -> f64 {
    let d2 = ((asset_value / debt).ln() + (rate - 0.5 * asset_vol * asset_vol) * maturity)
        / (asset_vol * maturity.sqrt());

    norm_cdf(-d2)
}

/// Compute both risk measures; no logic beyond the two calls.
pub fn compute_risk_measures(
    asset_value: f64,
    debt: f64,
    maturity: f64,
    rate: f64,
    asset_vol: f64,
) -> RiskMeasures {
    RiskMeasures {
        distance_to_default: distance_to_default(asset_value, debt, maturity, rate, asset_vol),
        default_probability: default_probability(asset_value, debt, maturity, rate, asset_vol),
    }
}
