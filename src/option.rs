// src/option.rs
//! Option contract parameters shared by every pricing engine.
//!
//! An [`OptionSpec`] is an immutable, already-resolved set of market and
//! contract inputs. Engine-specific knobs (lattice depth, sample count) live
//! in [`LatticeSpec`](crate::lattice::binomial::LatticeSpec) and
//! [`MonteCarloSpec`](crate::mc::mc_engine::MonteCarloSpec).

use crate::error::{validation::*, PricerError, PricerResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Call or put
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    Call,
    Put,
}

impl OptionKind {
    /// Intrinsic value at underlying price `spot`
    #[inline]
    pub fn intrinsic(self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionKind::Call => (spot - strike).max(0.0),
            OptionKind::Put => (strike - spot).max(0.0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OptionKind::Call => "call",
            OptionKind::Put => "put",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionKind {
    type Err = PricerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" => Ok(OptionKind::Call),
            "put" => Ok(OptionKind::Put),
            _ => Err(PricerError::invalid(
                "option_kind",
                s,
                "must be 'call' or 'put'",
            )),
        }
    }
}

/// Exercise style. Bermudan schedules are not modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseStyle {
    #[default]
    European,
    American,
}

impl ExerciseStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            ExerciseStyle::European => "european",
            ExerciseStyle::American => "american",
        }
    }
}

impl fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseStyle {
    type Err = PricerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "european" => Ok(ExerciseStyle::European),
            "american" => Ok(ExerciseStyle::American),
            _ => Err(PricerError::invalid(
                "exercise_style",
                s,
                "must be 'european' or 'american'",
            )),
        }
    }
}

/// Resolved inputs for a single vanilla option valuation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Spot price of the underlying, S
    pub spot: f64,
    /// Strike, K
    pub strike: f64,
    /// Time to maturity in years, T
    pub maturity: f64,
    /// Continuously compounded risk-free rate, r. May be zero or negative.
    pub rate: f64,
    /// Continuous dividend yield, q. May be zero or negative.
    #[serde(default)]
    pub dividend_yield: f64,
    /// Annualised volatility, σ
    pub volatility: f64,
    pub kind: OptionKind,
    #[serde(default)]
    pub style: ExerciseStyle,
}

impl OptionSpec {
    /// Build and validate a spec with no dividend yield
    pub fn new(
        spot: f64,
        strike: f64,
        maturity: f64,
        rate: f64,
        volatility: f64,
        kind: OptionKind,
        style: ExerciseStyle,
    ) -> PricerResult<Self> {
        let spec = OptionSpec {
            spot,
            strike,
            maturity,
            rate,
            dividend_yield: 0.0,
            volatility,
            kind,
            style,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn builder(kind: OptionKind) -> OptionSpecBuilder {
        OptionSpecBuilder::new(kind)
    }

    /// Validate the parameter contract
    pub fn validate(&self) -> PricerResult<()> {
        validate_positive("spot", self.spot)?;
        validate_positive("strike", self.strike)?;
        validate_positive("maturity", self.maturity)?;
        validate_positive("volatility", self.volatility)?;
        validate_finite("rate", self.rate)?;
        validate_finite("dividend_yield", self.dividend_yield)?;
        Ok(())
    }

    pub fn with_style(self, style: ExerciseStyle) -> Self {
        OptionSpec { style, ..self }
    }

    pub fn with_kind(self, kind: OptionKind) -> Self {
        OptionSpec { kind, ..self }
    }

    pub fn with_volatility(self, volatility: f64) -> Self {
        OptionSpec { volatility, ..self }
    }

    /// Payoff if exercised with the underlying at `spot`
    #[inline]
    pub fn intrinsic(&self, spot: f64) -> f64 {
        self.kind.intrinsic(spot, self.strike)
    }

    /// e^{-rT}
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }

    /// e^{-qT}
    pub fn dividend_factor(&self) -> f64 {
        (-self.dividend_yield * self.maturity).exp()
    }
}

/// Builder for [`OptionSpec`]. Dividend yield defaults to zero and style to European.
#[derive(Debug, Clone)]
pub struct OptionSpecBuilder {
    spot: f64,
    strike: f64,
    maturity: f64,
    rate: f64,
    dividend_yield: f64,
    volatility: f64,
    kind: OptionKind,
    style: ExerciseStyle,
}

impl OptionSpecBuilder {
    fn new(kind: OptionKind) -> Self {
        Self {
            spot: f64::NAN,
            strike: f64::NAN,
            maturity: f64::NAN,
            rate: 0.0,
            dividend_yield: 0.0,
            volatility: f64::NAN,
            kind,
            style: ExerciseStyle::European,
        }
    }

    pub fn spot(mut self, spot: f64) -> Self {
        self.spot = spot;
        self
    }

    pub fn strike(mut self, strike: f64) -> Self {
        self.strike = strike;
        self
    }

    pub fn maturity(mut self, maturity: f64) -> Self {
        self.maturity = maturity;
        self
    }

    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Absent yields are treated as zero
    pub fn dividend_yield(mut self, dividend_yield: Option<f64>) -> Self {
        self.dividend_yield = dividend_yield.unwrap_or(0.0);
        self
    }

    pub fn volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility;
        self
    }

    pub fn style(mut self, style: ExerciseStyle) -> Self {
        self.style = style;
        self
    }

    /// Validate and produce the spec. Unset spot, strike, maturity or volatility fail.
    pub fn build(self) -> PricerResult<OptionSpec> {
        let spec = OptionSpec {
            spot: self.spot,
            strike: self.strike,
            maturity: self.maturity,
            rate: self.rate,
            dividend_yield: self.dividend_yield,
            volatility: self.volatility,
            kind: self.kind,
            style: self.style,
        };
        spec.validate()?;
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind_and_style() {
        assert_eq!("call".parse::<OptionKind>().unwrap(), OptionKind::Call);
        assert_eq!(" Put ".parse::<OptionKind>().unwrap(), OptionKind::Put);
        assert_eq!(
            "AMERICAN".parse::<ExerciseStyle>().unwrap(),
            ExerciseStyle::American
        );
    }

    #[test]
    fn test_unknown_kind_is_invalid_parameter() {
        let err = "straddle".parse::<OptionKind>().unwrap_err();
        match err {
            PricerError::InvalidParameter { parameter, value, .. } => {
                assert_eq!(parameter, "option_kind");
                assert_eq!(value, "straddle");
            }
            other => panic!("wrong variant: {other:?}"),
        }
        assert!(matches!(
            "bermudan".parse::<ExerciseStyle>(),
            Err(PricerError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_builder_defaults_dividend_to_zero() {
        let spec = OptionSpec::builder(OptionKind::Call)
            .spot(100.0)
            .strike(95.0)
            .maturity(0.5)
            .rate(0.03)
            .dividend_yield(None)
            .volatility(0.25)
            .build()
            .unwrap();
        assert_eq!(spec.dividend_yield, 0.0);
        assert_eq!(spec.style, ExerciseStyle::European);
    }

    #[test]
    fn test_builder_rejects_missing_and_non_positive_inputs() {
        let missing_spot = OptionSpec::builder(OptionKind::Put)
            .strike(100.0)
            .maturity(1.0)
            .volatility(0.2)
            .build();
        assert!(missing_spot.is_err());

        let zero_vol = OptionSpec::new(
            100.0,
            100.0,
            1.0,
            0.05,
            0.0,
            OptionKind::Call,
            ExerciseStyle::European,
        );
        assert!(matches!(
            zero_vol,
            Err(PricerError::InvalidParameter { ref parameter, .. }) if parameter == "volatility"
        ));
    }

    #[test]
    fn test_negative_rate_and_yield_are_valid() {
        let spec = OptionSpec::builder(OptionKind::Put)
            .spot(100.0)
            .strike(100.0)
            .maturity(1.0)
            .rate(-0.005)
            .dividend_yield(Some(-0.01))
            .volatility(0.2)
            .build();
        assert!(spec.is_ok());
    }

    #[test]
    fn test_serde_uses_lowercase_enums() {
        let spec = OptionSpec::new(
            100.0,
            110.0,
            1.0,
            0.01,
            0.3,
            OptionKind::Put,
            ExerciseStyle::American,
        )
        .unwrap();
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains("\"put\""));
        assert!(json.contains("\"american\""));
        let back: OptionSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }
}
