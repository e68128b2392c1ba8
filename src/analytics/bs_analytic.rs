// src/analytics/bs_analytic.rs
//! Analytical Black-Scholes formulas for European options and Greeks
//!
//! # Mathematical Foundation
//!
//! Under the Black-Scholes model with continuous dividend yield `q`:
//! ```text
//! dS_t = (r - q) S_t dt + σ S_t dW_t
//! ```
//!
//! The risk-neutral pricing formula gives:
//! ```text
//! V(S,t) = e^(-r(T-t)) * E^Q[payoff(S_T) | S_t = S]
//! ```
//!
//! For European options, this has closed-form solutions involving
//! the cumulative normal distribution function Φ(x). Every formula below
//! carries the `e^(-qT)` factor on the spot leg; with `q = 0` they reduce
//! to the textbook non-dividend forms.

use crate::error::{PricerError, PricerResult};
use crate::math_utils::{norm_cdf, norm_pdf};
use crate::option::{ExerciseStyle, OptionKind, OptionSpec};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Maturities below this are clamped to avoid dividing by `√T = 0`
pub const MIN_MATURITY: f64 = 1e-10;

const ENGINE: &str = "black-scholes";

/// Option sensitivities in reporting units
///
/// - `delta`, `gamma`: per unit of spot
/// - `theta`: per calendar day (annual theta / 365)
/// - `vega`: per one volatility point (annual vega / 100)
/// - `rho`: per one rate point (annual rho / 100)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GreeksResult {
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
    pub rho: f64,
}

impl GreeksResult {
    pub const NAMES: [&'static str; 5] = ["delta", "gamma", "theta", "vega", "rho"];

    /// Look up a Greek by name
    pub fn get(&self, name: &str) -> Option<f64> {
        match name {
            "delta" => Some(self.delta),
            "gamma" => Some(self.gamma),
            "theta" => Some(self.theta),
            "vega" => Some(self.vega),
            "rho" => Some(self.rho),
            _ => None,
        }
    }

    /// `(name, value)` pairs in a fixed order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        Self::NAMES
            .iter()
            .map(move |&name| (name, self.get(name).unwrap_or(f64::NAN)))
    }
}

/// `d₁` and `d₂` plus the quantities every formula reuses
#[derive(Debug, Clone, Copy)]
struct D1D2 {
    d1: f64,
    d2: f64,
    sqrt_t: f64,
    t: f64,
    /// e^(-rT)
    df_r: f64,
    /// e^(-qT)
    df_q: f64,
}

/// # Formula
/// ```text
/// d₁ = [ln(S/K) + (r - q + σ²/2)T] / (σ√T)
/// d₂ = d₁ - σ√T
/// ```
fn d1_d2(spec: &OptionSpec) -> D1D2 {
    let t = spec.maturity.max(MIN_MATURITY);
    let sqrt_t = t.sqrt();
    let sigma = spec.volatility;
    let d1 = ((spec.spot / spec.strike).ln()
        + (spec.rate - spec.dividend_yield + 0.5 * sigma * sigma) * t)
        / (sigma * sqrt_t);
    D1D2 {
        d1,
        d2: d1 - sigma * sqrt_t,
        sqrt_t,
        t,
        df_r: (-spec.rate * t).exp(),
        df_q: (-spec.dividend_yield * t).exp(),
    }
}

fn ensure_european(spec: &OptionSpec) -> PricerResult<()> {
    spec.validate().map_err(|e| e.in_engine(ENGINE))?;
    if spec.style == ExerciseStyle::American {
        return Err(PricerError::UnsupportedStyle {
            engine: ENGINE.to_string(),
            style: spec.style.to_string(),
        });
    }
    Ok(())
}

/// Black-Scholes European option price
///
/// # Formula
/// ```text
/// C = S e^(-qT) Φ(d₁) - K e^(-rT) Φ(d₂)
/// P = K e^(-rT) Φ(-d₂) - S e^(-qT) Φ(-d₁)
/// ```
///
/// # Errors
///
/// - `InvalidParameter` when the spec breaks the parameter contract
/// - `UnsupportedStyle` for American exercise; no European fallback is attempted
pub fn bs_price(spec: &OptionSpec) -> PricerResult<f64> {
    ensure_european(spec)?;
    let d = d1_d2(spec);
    let s = spec.spot;
    let k = spec.strike;

    let price = match spec.kind {
        OptionKind::Call => s * d.df_q * norm_cdf(d.d1) - k * d.df_r * norm_cdf(d.d2),
        OptionKind::Put => k * d.df_r * norm_cdf(-d.d2) - s * d.df_q * norm_cdf(-d.d1),
    };

    debug!(kind = %spec.kind, d1 = d.d1, d2 = d.d2, price, "black-scholes priced");
    Ok(price)
}

/// Black-Scholes Greeks for a European option
///
/// # Formulas (annual, before unit scaling)
/// ```text
/// Δ_call = e^(-qT) Φ(d₁)            Δ_put = e^(-qT) (Φ(d₁) - 1)
/// Γ      = e^(-qT) φ(d₁) / (S σ √T)
/// Θ_call = -S e^(-qT) φ(d₁) σ / (2√T) - r K e^(-rT) Φ(d₂)  + q S e^(-qT) Φ(d₁)
/// Θ_put  = -S e^(-qT) φ(d₁) σ / (2√T) + r K e^(-rT) Φ(-d₂) - q S e^(-qT) Φ(-d₁)
/// ν      = S e^(-qT) √T φ(d₁)
/// ρ_call = K T e^(-rT) Φ(d₂)        ρ_put = -K T e^(-rT) Φ(-d₂)
/// ```
///
/// # Errors
///
/// Same contract as [`bs_price`].
pub fn bs_greeks(spec: &OptionSpec) -> PricerResult<GreeksResult> {
    ensure_european(spec)?;
    let d = d1_d2(spec);
    let s = spec.spot;
    let k = spec.strike;
    let sigma = spec.volatility;
    let pdf_d1 = norm_pdf(d.d1);

    let gamma = d.df_q * pdf_d1 / (s * sigma * d.sqrt_t);
    let vega = s * d.df_q * d.sqrt_t * pdf_d1;
    let decay = -s * d.df_q * pdf_d1 * sigma / (2.0 * d.sqrt_t);

    let (delta, theta, rho) = match spec.kind {
        OptionKind::Call => (
            d.df_q * norm_cdf(d.d1),
            decay - spec.rate * k * d.df_r * norm_cdf(d.d2)
                + spec.dividend_yield * s * d.df_q * norm_cdf(d.d1),
            k * d.t * d.df_r * norm_cdf(d.d2),
        ),
        OptionKind::Put => (
            d.df_q * (norm_cdf(d.d1) - 1.0),
            decay + spec.rate * k * d.df_r * norm_cdf(-d.d2)
                - spec.dividend_yield * s * d.df_q * norm_cdf(-d.d1),
            -k * d.t * d.df_r * norm_cdf(-d.d2),
        ),
    };

    Ok(GreeksResult {
        delta,
        gamma,
        theta: theta / 365.0,
        vega: vega / 100.0,
        rho: rho / 100.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atm_call() -> OptionSpec {
        OptionSpec::new(
            100.0,
            100.0,
            1.0,
            0.05,
            0.2,
            OptionKind::Call,
            ExerciseStyle::European,
        )
        .unwrap()
    }

    #[test]
    fn test_reference_call_and_put() {
        let call = bs_price(&atm_call()).unwrap();
        let put = bs_price(&atm_call().with_kind(OptionKind::Put)).unwrap();
        assert!((call - 10.450_583_572_185_565).abs() < 1e-9, "call {}", call);
        assert!((put - 5.573_526_022_256_971).abs() < 1e-9, "put {}", put);
    }

    #[test]
    fn test_reference_greeks() {
        let g = bs_greeks(&atm_call()).unwrap();
        assert!((g.delta - 0.636_830_651_175_619).abs() < 1e-9);
        assert!((g.gamma - 0.018_762_017_345_847).abs() < 1e-9);
        assert!((g.vega - 0.375_240_346_916_938).abs() < 1e-9);
        assert!((g.theta - (-6.414_027_546_438_197 / 365.0)).abs() < 1e-9);
        assert!((g.rho - 0.532_324_815_453_763).abs() < 1e-9);
    }

    #[test]
    fn test_put_delta_is_call_delta_minus_one_without_dividends() {
        let call = bs_greeks(&atm_call()).unwrap();
        let put = bs_greeks(&atm_call().with_kind(OptionKind::Put)).unwrap();
        assert!((call.delta - put.delta - 1.0).abs() < 1e-12);
        assert!((call.gamma - put.gamma).abs() < 1e-15);
        assert!((call.vega - put.vega).abs() < 1e-15);
    }

    #[test]
    fn test_dividend_yield_lowers_call_value() {
        let mut with_q = atm_call();
        with_q.dividend_yield = 0.03;
        assert!(bs_price(&with_q).unwrap() < bs_price(&atm_call()).unwrap());
        let g = bs_greeks(&with_q).unwrap();
        assert!(g.delta < bs_greeks(&atm_call()).unwrap().delta);
    }

    #[test]
    fn test_delta_matches_finite_difference() {
        let mut spec = atm_call();
        spec.dividend_yield = 0.02;
        let h = 1e-4;
        let up = bs_price(&OptionSpec { spot: spec.spot + h, ..spec }).unwrap();
        let down = bs_price(&OptionSpec { spot: spec.spot - h, ..spec }).unwrap();
        let fd_delta = (up - down) / (2.0 * h);
        let delta = bs_greeks(&spec).unwrap().delta;
        assert!((fd_delta - delta).abs() < 1e-6, "{} vs {}", fd_delta, delta);
    }

    #[test]
    fn test_theta_matches_finite_difference_with_dividends() {
        let mut spec = atm_call().with_kind(OptionKind::Put);
        spec.dividend_yield = 0.02;
        let h = 1e-5;
        let longer = bs_price(&OptionSpec { maturity: spec.maturity + h, ..spec }).unwrap();
        let shorter = bs_price(&OptionSpec { maturity: spec.maturity - h, ..spec }).unwrap();
        // Theta is the decay as calendar time passes, i.e. -∂V/∂T
        let fd_theta = -(longer - shorter) / (2.0 * h) / 365.0;
        let theta = bs_greeks(&spec).unwrap().theta;
        assert!((fd_theta - theta).abs() < 1e-7, "{} vs {}", fd_theta, theta);
    }

    #[test]
    fn test_american_is_unsupported() {
        let spec = atm_call().with_style(ExerciseStyle::American);
        assert!(matches!(
            bs_price(&spec),
            Err(PricerError::UnsupportedStyle { .. })
        ));
        assert!(matches!(
            bs_greeks(&spec),
            Err(PricerError::UnsupportedStyle { .. })
        ));
    }

    #[test]
    fn test_greeks_named_access() {
        let g = bs_greeks(&atm_call()).unwrap();
        let pairs: Vec<_> = g.iter().collect();
        assert_eq!(pairs.len(), 5);
        assert_eq!(pairs[0], ("delta", g.delta));
        assert_eq!(g.get("vanna"), None);

        let json = serde_json::to_value(g).unwrap();
        for name in GreeksResult::NAMES {
            assert!(json.get(name).is_some(), "missing {}", name);
        }
    }
}
