//! Boundary with market-data collaborators
//!
//! Providers resolve spot, strike, maturity, volatility, dividend yield and
//! rate into a [`MarketQuote`]. The pricing engines never see a quote directly:
//! [`MarketQuote::to_option_spec`] applies the parameter contract first, so an
//! unknown option kind or exercise style fails here with `InvalidParameter`.

pub mod history;
pub mod rates;

use crate::error::{PricerError, PricerResult};
use crate::option::{ExerciseStyle, OptionKind, OptionSpec};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resolved scalar inputs as delivered by a provider
///
/// Kind and style arrive as free text because that is how data vendors
/// label contracts; they are parsed into closed enums on conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketQuote {
    pub spot: f64,
    pub strike: f64,
    pub maturity: f64,
    pub volatility: f64,
    pub rate: f64,
    #[serde(default)]
    pub dividend_yield: Option<f64>,
    pub kind: String,
    pub style: String,
}

impl MarketQuote {
    pub fn to_option_spec(&self) -> PricerResult<OptionSpec> {
        let kind: OptionKind = self.kind.parse()?;
        let style: ExerciseStyle = self.style.parse()?;
        OptionSpec::builder(kind)
            .spot(self.spot)
            .strike(self.strike)
            .maturity(self.maturity)
            .rate(self.rate)
            .dividend_yield(self.dividend_yield)
            .volatility(self.volatility)
            .style(style)
            .build()
    }
}

/// Capability interface for anything that can resolve a contract into a quote
pub trait MarketDataProvider {
    fn quote(&self, symbol: &str) -> PricerResult<MarketQuote>;
}

/// In-memory provider, for tests and for callers that resolve data elsewhere
#[derive(Debug, Clone, Default)]
pub struct StaticMarketData {
    quotes: HashMap<String, MarketQuote>,
}

impl StaticMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quote(mut self, symbol: impl Into<String>, quote: MarketQuote) -> Self {
        self.quotes.insert(symbol.into(), quote);
        self
    }
}

impl MarketDataProvider for StaticMarketData {
    fn quote(&self, symbol: &str) -> PricerResult<MarketQuote> {
        self.quotes
            .get(symbol)
            .cloned()
            .ok_or_else(|| PricerError::market_data("static", format!("no quote for {symbol}")))
    }
}
