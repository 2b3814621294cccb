//! Black-Scholes call value and delta.
//!
//! In the Merton structural model, a firm's equity is a European call on
//! the firm's assets struck at the debt face value. These two functions
//! are the forward map the calibration layer inverts:
//!
//! **Call value**: C = S·Φ(d₁) - K·e^(-rT)·Φ(d₂)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! ## Edge-case policy
//!
//! Degenerate inputs map to well-defined values rather than errors, so
//! calibration residual functions can probe freely:
//! - S ≤ 0, σ ≤ 0, or T ≤ 0: the call is worth nothing (value 0, delta 0)
//! - K ≤ 0: a call struck at or below zero is the underlying itself
//!   (value S); delta is 0 by convention since d₁ is undefined
//! - The call value is floored at 0 to guard against small negative
//!   results from floating-point cancellation

use num_traits::Float;

use super::distributions::norm_cdf;

/// The d₁ term of the Black-Scholes formula.
///
/// d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
///
/// Assumes `s > 0`, `k > 0`, `t > 0`, `vol > 0`; the callers in this
/// module enforce those domains before evaluating.
#[inline]
pub fn d1<T: Float>(s: T, k: T, t: T, r: T, vol: T) -> T {
    let half = T::from(0.5).unwrap();

    let log_moneyness = (s / k).ln();
    let drift = (r + half * vol * vol) * t;

    (log_moneyness + drift) / (vol * t.sqrt())
}

/// The d₂ term of the Black-Scholes formula.
///
/// d₂ = d₁ - σ√T
#[inline]
pub fn d2<T: Float>(s: T, k: T, t: T, r: T, vol: T) -> T {
    d1(s, k, t, r, vol) - vol * t.sqrt()
}

/// European call value under Black-Scholes dynamics.
///
/// C = S·Φ(d₁) - K·e^(-rT)·Φ(d₂)
///
/// # Arguments
/// * `s` - Underlying value (firm asset value in the Merton reading)
/// * `k` - Strike (debt face value)
/// * `t` - Time to maturity in years
/// * `r` - Risk-free rate (annualised)
/// * `vol` - Volatility of the underlying (annualised)
///
/// # Returns
/// The call value, never negative. Degenerate inputs follow the module
/// edge-case policy.
///
/// # Examples
/// ```
/// use merton_models::analytical::black_scholes_call;
///
/// // Known reference: S=100, K=100, r=0.05, σ=0.2, T=1 → ≈ 10.4506
/// let price = black_scholes_call(100.0_f64, 100.0, 1.0, 0.05, 0.2);
/// assert!((price - 10.4506).abs() < 1e-3);
///
/// // Zero-strike call is worth the underlying
/// assert_eq!(black_scholes_call(80.0_f64, 0.0, 1.0, 0.05, 0.2), 80.0);
/// ```
#[inline]
pub fn black_scholes_call<T: Float>(s: T, k: T, t: T, r: T, vol: T) -> T {
    let zero = T::zero();

    if s <= zero || vol <= zero || t <= zero {
        return zero;
    }
    if k <= zero {
        return s;
    }

    let d1 = d1(s, k, t, r, vol);
    let d2 = d1 - vol * t.sqrt();
    let discount = (-r * t).exp();

    let price = s * norm_cdf(d1) - k * discount * norm_cdf(d2);

    // Floor: deep out-of-the-money cancellation can underflow negative
    if price > zero {
        price
    } else {
        zero
    }
}

/// Delta of the European call: Φ(d₁).
///
/// In the Merton reading this is ∂E/∂V, the sensitivity of equity value
/// to firm asset value, and drives the equity volatility relationship
/// σ_E·E = Φ(d₁)·σ_V·V.
///
/// Bounded in [0, 1] by construction (CDF range).
///
/// # Examples
/// ```
/// use merton_models::analytical::black_scholes_delta;
///
/// let delta = black_scholes_delta(100.0_f64, 100.0, 1.0, 0.05, 0.2);
/// assert!(delta > 0.0 && delta < 1.0);
///
/// // Degenerate inputs give zero sensitivity
/// assert_eq!(black_scholes_delta(100.0_f64, 0.0, 1.0, 0.05, 0.2), 0.0);
/// ```
#[inline]
pub fn black_scholes_delta<T: Float>(s: T, k: T, t: T, r: T, vol: T) -> T {
    let zero = T::zero();

    if s <= zero || vol <= zero || t <= zero || k <= zero {
        return zero;
    }

    norm_cdf(d1(s, k, t, r, vol))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    // ==========================================================
    // d1/d2 tests
    // ==========================================================

    #[test]
    fn test_d1_d2_relationship() {
        let d1_val = d1(100.0_f64, 90.0, 0.5, 0.05, 0.25);
        let d2_val = d2(100.0_f64, 90.0, 0.5, 0.05, 0.25);
        assert_relative_eq!(d2_val, d1_val - 0.25 * 0.5_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_d1_atm() {
        // ATM with r=0: d1 = σ√T / 2
        let d1_val = d1(100.0_f64, 100.0, 1.0, 0.0, 0.2);
        assert_relative_eq!(d1_val, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_d1_sign_for_moneyness() {
        assert!(d1(150.0_f64, 100.0, 1.0, 0.05, 0.2) > 1.0);
        assert!(d1(50.0_f64, 100.0, 1.0, 0.05, 0.2) < -1.0);
    }

    // ==========================================================
    // Call value tests
    // ==========================================================

    #[test]
    fn test_call_reference_value() {
        // S=100, K=100, r=0.05, σ=0.2, T=1 → ≈ 10.4506
        let price = black_scholes_call(100.0_f64, 100.0, 1.0, 0.05, 0.2);
        assert_relative_eq!(price, 10.4506, epsilon = 0.001);
    }

    #[test]
    fn test_call_worth_less_than_underlying() {
        for k in [20.0, 80.0, 100.0, 150.0] {
            let price = black_scholes_call(100.0_f64, k, 1.0, 0.05, 0.2);
            assert!(price >= 0.0);
            assert!(price < 100.0, "call ≥ underlying at K = {}", k);
        }
    }

    #[test]
    fn test_call_degenerate_underlying() {
        assert_eq!(black_scholes_call(0.0_f64, 100.0, 1.0, 0.05, 0.2), 0.0);
        assert_eq!(black_scholes_call(-5.0_f64, 100.0, 1.0, 0.05, 0.2), 0.0);
    }

    #[test]
    fn test_call_degenerate_volatility() {
        assert_eq!(black_scholes_call(100.0_f64, 90.0, 1.0, 0.05, 0.0), 0.0);
        assert_eq!(black_scholes_call(100.0_f64, 90.0, 1.0, 0.05, -0.2), 0.0);
    }

    #[test]
    fn test_call_degenerate_maturity() {
        assert_eq!(black_scholes_call(100.0_f64, 90.0, 0.0, 0.05, 0.2), 0.0);
        assert_eq!(black_scholes_call(100.0_f64, 90.0, -1.0, 0.05, 0.2), 0.0);
    }

    #[test]
    fn test_call_degenerate_strike() {
        // K ≤ 0: the option is the underlying
        assert_eq!(black_scholes_call(123.0_f64, 0.0, 1.0, 0.05, 0.2), 123.0);
        assert_eq!(black_scholes_call(123.0_f64, -10.0, 1.0, 0.05, 0.2), 123.0);
    }

    #[test]
    fn test_call_deep_otm_non_negative() {
        // Deep out-of-the-money: tiny value, must not go negative
        let price = black_scholes_call(1.0_f64, 1e6, 1.0, 0.02, 0.1);
        assert!(price >= 0.0);
        assert!(price < 1e-6);
    }

    #[test]
    fn test_call_deep_itm_close_to_forward_intrinsic() {
        // Deep ITM call ≈ S - K·e^(-rT)
        let price = black_scholes_call(200.0_f64, 100.0, 1.0, 0.05, 0.2);
        let intrinsic = 200.0 - 100.0 * (-0.05_f64).exp();
        assert!(price >= intrinsic - 0.01);
    }

    #[test]
    fn test_call_negative_rate_allowed() {
        let price = black_scholes_call(100.0_f64, 100.0, 1.0, -0.02, 0.2);
        assert!(price > 0.0);
    }

    // ==========================================================
    // Delta tests
    // ==========================================================

    #[test]
    fn test_delta_bounds() {
        for k in [50.0, 80.0, 100.0, 120.0, 200.0] {
            let delta = black_scholes_delta(100.0_f64, k, 1.0, 0.05, 0.2);
            assert!((0.0..=1.0).contains(&delta), "delta out of [0,1] at K = {}", k);
        }
    }

    #[test]
    fn test_delta_monotone_in_underlying() {
        let mut prev = 0.0;
        for i in 1..=100 {
            let s = i as f64 * 3.0;
            let delta = black_scholes_delta(s, 100.0, 1.0, 0.05, 0.2);
            assert!(delta >= prev, "delta decreased at S = {}", s);
            prev = delta;
        }
    }

    #[test]
    fn test_delta_degenerate_inputs() {
        assert_eq!(black_scholes_delta(0.0_f64, 100.0, 1.0, 0.05, 0.2), 0.0);
        assert_eq!(black_scholes_delta(100.0_f64, 0.0, 1.0, 0.05, 0.2), 0.0);
        assert_eq!(black_scholes_delta(100.0_f64, 100.0, 0.0, 0.05, 0.2), 0.0);
        assert_eq!(black_scholes_delta(100.0_f64, 100.0, 1.0, 0.05, 0.0), 0.0);
    }

    #[test]
    fn test_delta_vs_finite_difference() {
        let h = 0.01;
        let fd = (black_scholes_call(100.0 + h, 100.0, 1.0, 0.05, 0.2)
            - black_scholes_call(100.0 - h, 100.0, 1.0, 0.05, 0.2))
            / (2.0 * h);
        let analytical = black_scholes_delta(100.0_f64, 100.0, 1.0, 0.05, 0.2);
        assert_relative_eq!(analytical, fd, epsilon = 1e-4);
    }

    // ==========================================================
    // Property-based tests
    // ==========================================================

    proptest! {
        #[test]
        fn prop_call_bounded_by_underlying(
            s in 1.0_f64..1e4,
            k in 1.0_f64..1e4,
            t in 0.05_f64..5.0,
            r in -0.05_f64..0.15,
            vol in 0.01_f64..1.5,
        ) {
            let price = black_scholes_call(s, k, t, r, vol);
            prop_assert!(price >= 0.0);
            prop_assert!(price < s);
        }

        #[test]
        fn prop_delta_in_unit_interval(
            s in 1.0_f64..1e4,
            k in 1.0_f64..1e4,
            t in 0.05_f64..5.0,
            r in -0.05_f64..0.15,
            vol in 0.01_f64..1.5,
        ) {
            let delta = black_scholes_delta(s, k, t, r, vol);
            prop_assert!((0.0..=1.0).contains(&delta));
        }
    }
}
