// src/mc/mc_engine.rs
use crate::error::{validation::*, PricerError, PricerResult};
use crate::mc::payoffs::Payoff;
use crate::models::gbm::Gbm;
use crate::option::{ExerciseStyle, OptionSpec};
use crate::rng::{self, RngFactory};
use ndarray::Array1;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Draws per RNG stream. Part of the reproducibility contract: a given
/// `(seed, paths)` always splits into the same chunks.
pub const CHUNK_SIZE: usize = 4096;

const ENGINE: &str = "monte-carlo";

/// Option inputs plus simulation size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloSpec {
    pub option: OptionSpec,
    /// Number of terminal draws, n ≥ 1
    pub paths: usize,
    /// Fixed seed for reproducible runs; `None` draws one from the thread RNG
    pub seed: Option<u64>,
}

impl MonteCarloSpec {
    pub fn new(option: OptionSpec, paths: usize, seed: Option<u64>) -> Self {
        Self {
            option,
            paths,
            seed,
        }
    }

    /// Validate the Monte Carlo configuration
    pub fn validate(&self) -> PricerResult<()> {
        self.option.validate()?;
        validate_paths(self.paths)?;
        if self.option.style == ExerciseStyle::American {
            return Err(PricerError::UnsupportedStyle {
                engine: ENGINE.to_string(),
                style: self.option.style.to_string(),
            });
        }
        Ok(())
    }
}

/// Discounted price estimate with its sampling error
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct McEstimate {
    pub price: f64,
    /// Standard error of `price`: e^(-rT) · s / √n
    pub std_error: f64,
    pub paths: usize,
    /// Seed actually used, so unseeded runs can be replayed
    pub seed: u64,
}

impl McEstimate {
    /// Variance of the estimator, `std_error²`
    pub fn variance(&self) -> f64 {
        self.std_error * self.std_error
    }

    /// `price ± z · std_error`
    pub fn confidence_interval(&self, z: f64) -> (f64, f64) {
        (
            self.price - z * self.std_error,
            self.price + z * self.std_error,
        )
    }
}

/// Running sample statistics for one chunk of payoffs
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct ChunkStats {
    count: usize,
    mean: f64,
    /// Sum of squared deviations from `mean`
    m2: f64,
}

impl ChunkStats {
    fn from_payoffs(payoffs: &Array1<f64>) -> Self {
        let count = payoffs.len();
        let mean = payoffs.sum() / count as f64;
        let m2 = payoffs.fold(0.0, |acc, &x| acc + (x - mean) * (x - mean));
        Self { count, mean, m2 }
    }

    /// Pairwise merge (Chan et al.). Chunks are always folded in index order,
    /// so the aggregate is the same whichever threads produced them.
    fn merge(self, other: Self) -> Self {
        if self.count == 0 {
            return other;
        }
        let count = self.count + other.count;
        let delta = other.mean - self.mean;
        let weight = other.count as f64 / count as f64;
        Self {
            count,
            mean: self.mean + delta * weight,
            m2: self.m2 + other.m2 + delta * delta * self.count as f64 * weight,
        }
    }
}

/// Monte Carlo pricing for European options under Geometric Brownian Motion
///
/// # Math Framework
///
/// A single exact step of the risk-neutral GBM to maturity:
/// ```text
/// S_T = S_0 * exp((r - q - σ²/2)T + σ√T * Z),   Z ~ N(0,1)
/// price = e^(-rT) * mean(payoff(S_T))
/// ```
///
/// # Parallelism and Reproducibility
///
/// Draws are split into chunks of [`CHUNK_SIZE`]; chunk `c` uses its own
/// stream seeded from `(seed, c)`. Chunks are simulated on the rayon pool and
/// their statistics merged in chunk order, so a seeded run returns identical
/// bits on any number of threads. Cost is O(n).
///
/// # Errors
///
/// - `InvalidParameter` for a broken parameter contract or `paths == 0`
/// - `UnsupportedStyle` for American exercise
/// - `NumericalInstability` for a non-finite estimate
pub fn mc_price_option_gbm(spec: &MonteCarloSpec) -> PricerResult<McEstimate> {
    spec.validate().map_err(|e| e.in_engine(ENGINE))?;
    let option = &spec.option;
    let factory = match spec.seed {
        Some(seed) => RngFactory::new(seed),
        None => RngFactory::from_entropy(),
    };
    let gbm = Gbm::risk_neutral(option);
    let payoff = Payoff::from_spec(option);
    let n = spec.paths;
    let n_chunks = n.div_ceil(CHUNK_SIZE);

    let chunks: Vec<ChunkStats> = (0..n_chunks)
        .into_par_iter()
        .map(|c| {
            let len = CHUNK_SIZE.min(n - c * CHUNK_SIZE);
            let mut rng = factory.create_std_rng(c as u64);
            let draws = Array1::from_shape_simple_fn(len, || rng::get_normal_draw(&mut rng));
            let terminal = gbm.terminal_prices(option.maturity, &draws);
            ChunkStats::from_payoffs(&payoff.calculate_batch(&terminal))
        })
        .collect();

    let stats = chunks
        .into_iter()
        .fold(ChunkStats::default(), ChunkStats::merge);

    let discount = option.discount_factor();
    let price = discount * stats.mean;
    let std_error = if n > 1 {
        discount * (stats.m2 / (n as f64 - 1.0)).sqrt() / (n as f64).sqrt()
    } else {
        0.0
    };

    if !price.is_finite() || !std_error.is_finite() {
        return Err(PricerError::NumericalInstability {
            method: "Monte Carlo".to_string(),
            reason: format!(
                "estimate is not finite: price {}, std error {}",
                price, std_error
            ),
        });
    }

    debug!(
        kind = %option.kind,
        paths = n,
        seed = factory.base_seed(),
        price,
        std_error,
        "monte carlo priced"
    );

    Ok(McEstimate {
        price,
        std_error,
        paths: n,
        seed: factory.base_seed(),
    })
}
