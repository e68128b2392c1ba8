//! # options-pricer: Vanilla Option Valuation
//!
//! Prices calls and puts, European or American, with three independent engines:
//!
//! - **Binomial lattice** (Cox-Ross-Rubinstein): backward induction with early exercise
//! - **Black-Scholes**: closed-form price and Greeks for European exercise
//! - **Monte Carlo**: risk-neutral GBM terminal simulation with standard error
//!
//! Every engine is a pure function of its inputs. Market data arrives already
//! resolved, either as a typed [`OptionSpec`] or as a [`market::MarketQuote`].
//!
//! ## Quick Start
//!
//! ```rust
//! use options_pricer::analytics::bs_analytic::bs_price;
//! use options_pricer::lattice::binomial::{binomial_price, LatticeSpec};
//! use options_pricer::mc::mc_engine::{mc_price_option_gbm, MonteCarloSpec};
//! use options_pricer::{ExerciseStyle, OptionKind, OptionSpec};
//!
//! let spec = OptionSpec::builder(OptionKind::Call)
//!     .spot(100.0)
//!     .strike(100.0)
//!     .maturity(1.0)
//!     .rate(0.05)
//!     .volatility(0.2)
//!     .build()
//!     .expect("valid inputs");
//!
//! let analytic = bs_price(&spec).expect("european");
//! let tree = binomial_price(&LatticeSpec::new(spec, 500)).expect("valid lattice");
//! let mc = mc_price_option_gbm(&MonteCarloSpec::new(spec, 100_000, Some(42))).expect("valid run");
//!
//! assert!((analytic - 10.4506).abs() < 1e-4);
//! assert!((tree - analytic).abs() < 0.01);
//! assert!((mc.price - analytic).abs() < 5.0 * mc.std_error);
//!
//! let american = spec.with_style(ExerciseStyle::American);
//! assert!(bs_price(&american).is_err());
//! ```

// Module declarations
pub mod analytics;
pub mod config;
pub mod engine;
pub mod error;
pub mod lattice;
pub mod market;
pub mod math_utils;
pub mod mc;
pub mod models;
pub mod option;
pub mod output;
pub mod rng;

// Re-export commonly used types for convenience
pub use config::PricerConfig;
pub use engine::PricingEngine;
pub use error::{PricerError, PricerResult};
pub use option::{ExerciseStyle, OptionKind, OptionSpec};
