//! Estimators that turn raw vendor history into pricing inputs
//!
//! All functions here are pure; fetching the series is the provider's job.

use crate::error::{PricerError, PricerResult};
use crate::option::{ExerciseStyle, OptionKind};
use statrs::statistics::Statistics;

/// Trading days per year used to annualise daily volatility
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Calendar days per year used for maturities
pub const CALENDAR_DAYS_PER_YEAR: f64 = 365.0;

const SOURCE: &str = "price history";

/// Annualised close-to-close volatility
///
/// Sample standard deviation of daily log returns scaled by `√252`.
/// `closes` is in chronological order.
///
/// # Errors
///
/// `MarketData` with fewer than three closes or any non-positive close.
pub fn historical_volatility(closes: &[f64]) -> PricerResult<f64> {
    if closes.len() < 3 {
        return Err(PricerError::market_data(
            SOURCE,
            format!("need at least 3 closes, got {}", closes.len()),
        ));
    }
    if let Some(bad) = closes.iter().find(|c| **c <= 0.0 || !c.is_finite()) {
        return Err(PricerError::market_data(
            SOURCE,
            format!("close prices must be positive, got {bad}"),
        ));
    }

    let log_returns: Vec<f64> = closes
        .windows(2)
        .map(|w| (w[1] / w[0]).ln())
        .collect();
    Ok(log_returns.std_dev() * TRADING_DAYS_PER_YEAR.sqrt())
}

/// Trailing dividend yield: dividends paid over the window divided by the last close
pub fn trailing_dividend_yield(dividends: &[f64], last_close: f64) -> PricerResult<f64> {
    if last_close <= 0.0 || !last_close.is_finite() {
        return Err(PricerError::market_data(
            SOURCE,
            format!("last close must be positive, got {last_close}"),
        ));
    }
    Ok(dividends.iter().sum::<f64>() / last_close)
}

/// Year fraction for a number of calendar days to expiry
pub fn maturity_in_years(days_to_expiry: i64) -> f64 {
    days_to_expiry as f64 / CALENDAR_DAYS_PER_YEAR
}

/// Year fraction between two dates, ACT/365
pub fn maturity_between(today: chrono::NaiveDate, expiry: chrono::NaiveDate) -> f64 {
    maturity_in_years((expiry - today).num_days())
}

/// Exercise style implied by the listing venue's instrument classification
///
/// Index options and options on ETFs tracking an index settle European;
/// single-stock and fund options are American. Anything else is unknown.
pub fn infer_exercise_style(
    quote_type: &str,
    underlying_quote_type: Option<&str>,
    underlying_summary: Option<&str>,
) -> Option<ExerciseStyle> {
    match quote_type.to_ascii_uppercase().as_str() {
        "INDEX" => Some(ExerciseStyle::European),
        "ETF" => {
            let tracks_index = underlying_quote_type
                .is_some_and(|t| t.eq_ignore_ascii_case("INDEX"))
                || underlying_summary.is_some_and(|s| s.to_ascii_lowercase().contains("index"));
            tracks_index.then_some(ExerciseStyle::European)
        }
        "EQUITY" | "MUTUALFUND" => Some(ExerciseStyle::American),
        _ => None,
    }
}

/// Option kind from a vendor display name such as `"AAPL Jun 2025 190.000 call"`
pub fn parse_kind_from_name(name: &str) -> PricerResult<OptionKind> {
    name.split_whitespace()
        .last()
        .unwrap_or_default()
        .parse()
}
