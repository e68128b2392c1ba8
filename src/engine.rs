// src/engine.rs
//! Engine selection
//!
//! The three engines are independent free functions; [`PricingEngine`] lets a
//! caller pick one at runtime and feed it either a typed [`OptionSpec`] or a raw
//! [`MarketQuote`].

use crate::analytics::bs_analytic;
use crate::config::PricerConfig;
use crate::error::{PricerError, PricerResult};
use crate::lattice::binomial::{self, LatticeSpec};
use crate::market::MarketQuote;
use crate::mc::mc_engine::{self, MonteCarloSpec};
use crate::option::OptionSpec;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingEngine {
    /// CRR lattice, European or American. O(steps²).
    Binomial { steps: usize },
    /// Closed form, European only.
    BlackScholes,
    /// Terminal GBM simulation, European only. O(paths).
    MonteCarlo { paths: usize, seed: Option<u64> },
}

impl PricingEngine {
    pub const NAMES: [&'static str; 3] = ["binomial", "black-scholes", "monte-carlo"];

    /// Look up an engine by name, sized from `cfg`
    pub fn from_name(name: &str, cfg: &PricerConfig) -> PricerResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "binomial" | "crr" => Ok(PricingEngine::Binomial {
                steps: cfg.lattice_steps,
            }),
            "black-scholes" | "bs" => Ok(PricingEngine::BlackScholes),
            "monte-carlo" | "mc" => Ok(PricingEngine::MonteCarlo {
                paths: cfg.mc_paths,
                seed: cfg.mc_seed,
            }),
            _ => Err(PricerError::invalid(
                "engine",
                name,
                "must be 'binomial', 'black-scholes' or 'monte-carlo'",
            )),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PricingEngine::Binomial { .. } => "binomial",
            PricingEngine::BlackScholes => "black-scholes",
            PricingEngine::MonteCarlo { .. } => "monte-carlo",
        }
    }

    /// Price with the selected engine. Monte Carlo returns only the mean; call
    /// [`mc_engine::mc_price_option_gbm`] directly for the standard error.
    pub fn price(&self, spec: &OptionSpec) -> PricerResult<f64> {
        match *self {
            PricingEngine::Binomial { steps } => {
                binomial::binomial_price(&LatticeSpec::new(*spec, steps))
            }
            PricingEngine::BlackScholes => bs_analytic::bs_price(spec),
            PricingEngine::MonteCarlo { paths, seed } => {
                mc_engine::mc_price_option_gbm(&MonteCarloSpec::new(*spec, paths, seed))
                    .map(|est| est.price)
            }
        }
    }

    pub fn price_quote(&self, quote: &MarketQuote) -> PricerResult<f64> {
        self.price(&quote.to_option_spec()?)
    }
}

impl fmt::Display for PricingEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingEngine::Binomial { steps } => write!(f, "binomial ({} steps)", steps),
            PricingEngine::BlackScholes => f.write_str("black-scholes"),
            PricingEngine::MonteCarlo { paths, .. } => write!(f, "monte-carlo ({} paths)", paths),
        }
    }
}
