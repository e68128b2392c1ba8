//! Risk-free rate resolution
//!
//! A [`RateSource`] is a strategy: it either knows a rate for a currency or it
//! does not. [`RiskFreeRateResolver`] tries the primary table first and then a
//! single configured fallback strategy. Sources are plain values; no network.

use crate::error::{PricerError, PricerResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Capability: resolve an annualised decimal rate for a currency
pub trait RateSource {
    fn get_rate(&self, currency: &str) -> PricerResult<f64>;

    /// Human-readable origin of the rate, e.g. "SONIA"
    fn label(&self, currency: &str) -> String;
}

/// How a quoted rate was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Primary,
    Proxy,
    Nearest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateQuote {
    pub currency: String,
    pub rate: f64,
    pub source_kind: SourceKind,
    pub source_label: String,
}

/// Reference overnight/bill rate for each primary currency
pub fn reference_rate_name(currency: &str) -> Option<&'static str> {
    match currency {
        "USD" => Some("US Treasury Bills Rate"),
        "EUR" => Some("€STR"),
        "GBP" => Some("SONIA"),
        "JPY" => Some("TONAR"),
        "CHF" => Some("SARON"),
        "AUD" => Some("AONIA"),
        "CAD" => Some("CORRA"),
        _ => None,
    }
}

/// Rates supplied directly for the currencies with their own reference feed
#[derive(Debug, Clone, Default)]
pub struct PrimaryRate {
    rates: HashMap<String, f64>,
}

impl PrimaryRate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rate(mut self, currency: impl Into<String>, rate: f64) -> Self {
        self.rates.insert(currency.into(), rate);
        self
    }

    pub fn contains(&self, currency: &str) -> bool {
        self.rates.contains_key(currency)
    }
}

impl RateSource for PrimaryRate {
    fn get_rate(&self, currency: &str) -> PricerResult<f64> {
        self.rates
            .get(currency)
            .copied()
            .ok_or_else(|| PricerError::market_data("primary rates", format!("no rate for {currency}")))
    }

    fn label(&self, currency: &str) -> String {
        reference_rate_name(currency)
            .unwrap_or("primary rate")
            .to_string()
    }
}

/// Proxy-currency rate shifted by the log FX level
///
/// ```text
/// r_base = max(r_proxy + 0.1 * ln(fx), 0)
/// ```
/// where `fx` is units of base currency per unit of proxy currency.
#[derive(Debug, Clone)]
pub struct ProxyRate {
    pub proxy_currency: String,
    pub proxy_rate: f64,
    /// Spot FX keyed by base currency
    pub fx_spots: HashMap<String, f64>,
}

impl ProxyRate {
    pub const FX_SENSITIVITY: f64 = 0.1;

    pub fn new(proxy_currency: impl Into<String>, proxy_rate: f64) -> Self {
        Self {
            proxy_currency: proxy_currency.into(),
            proxy_rate,
            fx_spots: HashMap::new(),
        }
    }

    pub fn with_fx(mut self, base_currency: impl Into<String>, spot: f64) -> Self {
        self.fx_spots.insert(base_currency.into(), spot);
        self
    }
}

impl RateSource for ProxyRate {
    fn get_rate(&self, currency: &str) -> PricerResult<f64> {
        let fx = self.fx_spots.get(currency).copied().ok_or_else(|| {
            PricerError::market_data(
                "proxy rates",
                format!("no {}/{} spot", self.proxy_currency, currency),
            )
        })?;
        if fx <= 0.0 || !fx.is_finite() {
            return Err(PricerError::market_data(
                "proxy rates",
                format!("{}/{} spot must be positive, got {fx}", self.proxy_currency, currency),
            ));
        }
        Ok((self.proxy_rate + Self::FX_SENSITIVITY * fx.ln()).max(0.0))
    }

    fn label(&self, currency: &str) -> String {
        format!("Proxy based on {} rate and {currency}/{} FX", self.proxy_currency, self.proxy_currency)
    }
}

/// Borrow the rate of the regionally closest primary currency
#[derive(Debug, Clone)]
pub struct NearestCurrencyRate {
    pub primary: PrimaryRate,
}

impl NearestCurrencyRate {
    pub fn new(primary: PrimaryRate) -> Self {
        Self { primary }
    }

    /// European currencies map to EUR, everything else to USD
    pub fn nearest_currency(currency: &str) -> &'static str {
        match currency {
            "CHF" | "SEK" | "NOK" | "DKK" | "PLN" | "CZK" | "HUF" => "EUR",
            _ => "USD",
        }
    }
}

impl RateSource for NearestCurrencyRate {
    fn get_rate(&self, currency: &str) -> PricerResult<f64> {
        self.primary.get_rate(Self::nearest_currency(currency))
    }

    fn label(&self, currency: &str) -> String {
        format!("Approximated using {} rate", Self::nearest_currency(currency))
    }
}

/// Fallback strategy for currencies without a primary rate
#[derive(Debug, Clone)]
pub enum Fallback {
    Proxy(ProxyRate),
    Nearest,
}

/// Primary table plus one fallback strategy
#[derive(Debug, Clone)]
pub struct RiskFreeRateResolver {
    primary: PrimaryRate,
    fallback: Fallback,
}

impl RiskFreeRateResolver {
    pub fn new(primary: PrimaryRate, fallback: Fallback) -> Self {
        Self { primary, fallback }
    }

    pub fn resolve(&self, currency: &str) -> PricerResult<RateQuote> {
        if self.primary.contains(currency) {
            return Ok(RateQuote {
                currency: currency.to_string(),
                rate: self.primary.get_rate(currency)?,
                source_kind: SourceKind::Primary,
                source_label: self.primary.label(currency),
            });
        }

        let nearest;
        let (source, source_kind): (&dyn RateSource, SourceKind) = match &self.fallback {
            Fallback::Proxy(proxy) => (proxy as &dyn RateSource, SourceKind::Proxy),
            Fallback::Nearest => {
                nearest = NearestCurrencyRate::new(self.primary.clone());
                (&nearest as &dyn RateSource, SourceKind::Nearest)
            }
        };
        let rate = source.get_rate(currency)?;
        warn!(
            currency,
            ?source_kind,
            rate,
            "using approximated risk-free rate"
        );
        Ok(RateQuote {
            currency: currency.to_string(),
            rate,
            source_kind,
            source_label: source.label(currency),
        })
    }
}
