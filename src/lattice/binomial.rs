// src/lattice/binomial.rs
//! Cox-Ross-Rubinstein binomial lattice
//!
//! # Construction
//!
//! Over `N` steps of length `Δt = T/N` the underlying moves up by `u` or down by `d`:
//! ```text
//! u = exp(σ√Δt)
//! d = 1/u
//! p = (exp((r - q)Δt) - d) / (u - d)
//! ```
//! `d` is the exact reciprocal of `u`, so an up move followed by a down move
//! returns to the same node and the tree recombines: step `j` has `j + 1` nodes.
//!
//! # Backward Induction
//!
//! Node `i` at step `j` carries underlying price `S·u^(j-i)·d^i`. Starting from the
//! terminal payoffs, each earlier layer is
//! ```text
//! hold = e^(-rΔt) * (p·V[i] + (1-p)·V[i+1])
//! V[i] = max(hold, intrinsic)   (American)
//! V[i] = hold                   (European)
//! ```
//! A single buffer of `N + 1` values is overwritten in place, so memory is O(N)
//! and time is O(N²).
//!
//! Node prices are taken from a table of `S·exp(kσ√Δt)` for `k` in `-N..=N`,
//! built in log space. A node whose true price overflows saturates at
//! `f64::MAX` on its own and never contaminates its neighbours.
//!
//! # Stability
//!
//! `p` must lie in `[0, 1]`. When `(r - q)Δt` outruns `σ√Δt` it does not, the
//! backward recursion stops being a convex combination and amplifies rounding
//! error at every step. Such lattices are rejected; more steps shrink `Δt`
//! until the diffusion dominates.

use crate::error::{validation::*, PricerError, PricerResult};
use crate::option::{ExerciseStyle, OptionSpec};
use serde::{Deserialize, Serialize};
use tracing::debug;

const ENGINE: &str = "binomial";

/// Option inputs plus lattice depth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatticeSpec {
    pub option: OptionSpec,
    /// Number of time steps, N ≥ 1
    pub steps: usize,
}

impl LatticeSpec {
    pub fn new(option: OptionSpec, steps: usize) -> Self {
        Self { option, steps }
    }

    pub fn validate(&self) -> PricerResult<()> {
        self.option.validate()?;
        validate_steps(self.steps)
    }
}

/// Per-step lattice parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrrParameters {
    pub dt: f64,
    pub up: f64,
    pub down: f64,
    /// Risk-neutral probability of an up move
    pub p_up: f64,
    /// One-step discount factor e^(-rΔt)
    pub discount: f64,
}

impl CrrParameters {
    /// Derive `u`, `d`, `p` and the step discount for `spec`
    ///
    /// # Errors
    ///
    /// `InvalidParameter` when `σ√Δt` is so small that `u == d`, or when `p`
    /// falls outside `[0, 1]` because the drift exceeds the diffusion per step.
    pub fn from_spec(spec: &LatticeSpec) -> PricerResult<Self> {
        let option = &spec.option;
        let dt = option.maturity / spec.steps as f64;
        let up = (option.volatility * dt.sqrt()).exp();
        let down = 1.0 / up;

        if up == down {
            return Err(PricerError::invalid(
                "volatility",
                option.volatility,
                &format!(
                    "degenerate lattice: up and down factors coincide with {} steps",
                    spec.steps
                ),
            ));
        }

        let growth = ((option.rate - option.dividend_yield) * dt).exp();
        let p_up = (growth - down) / (up - down);
        if !(0.0..=1.0).contains(&p_up) {
            return Err(PricerError::invalid(
                "steps",
                spec.steps,
                &format!(
                    "risk-neutral probability {p_up} is outside [0, 1]: drift exceeds \
                     diffusion over one step, use more steps"
                ),
            ));
        }

        Ok(Self {
            dt,
            up,
            down,
            p_up,
            discount: (-option.rate * dt).exp(),
        })
    }
}

/// Price a European or American option on a CRR lattice
///
/// Deterministic in `spec`. Cost is O(N²) time and O(N) memory in `spec.steps`.
///
/// # Errors
///
/// - `InvalidParameter` for non-positive spot/strike/maturity/volatility,
///   non-finite rate or yield, `steps == 0`, or degenerate up/down factors
/// - `InvalidParameter` when the risk-neutral probability leaves `[0, 1]`
/// - `NumericalInstability` if the root value is not finite
pub fn binomial_price(spec: &LatticeSpec) -> PricerResult<f64> {
    price_on_lattice(spec).map_err(|e| e.in_engine(ENGINE))
}

fn price_on_lattice(spec: &LatticeSpec) -> PricerResult<f64> {
    spec.validate()?;
    let params = CrrParameters::from_spec(spec)?;
    let option = &spec.option;
    let n = spec.steps;
    let american = option.style == ExerciseStyle::American;

    let p = params.p_up;
    let disc_p = params.discount * p;
    let disc_q = params.discount * (1.0 - p);

    // Node (step, i) sits at S·u^(step - 2i), i.e. at index n + step - 2i.
    // Prices beyond f64::MAX saturate there.
    let ln_spot = option.spot.ln();
    let log_step = option.volatility * params.dt.sqrt();
    let spots: Vec<f64> = (0..=2 * n)
        .map(|j| {
            (ln_spot + (j as f64 - n as f64) * log_step)
                .exp()
                .min(f64::MAX)
        })
        .collect();

    let mut values: Vec<f64> = (0..=n)
        .map(|i| option.intrinsic(spots[2 * n - 2 * i]))
        .collect();

    for step in (0..n).rev() {
        if american {
            for i in 0..=step {
                let hold = disc_p * values[i] + disc_q * values[i + 1];
                values[i] = hold.max(option.intrinsic(spots[n + step - 2 * i]));
            }
        } else {
            for i in 0..=step {
                values[i] = disc_p * values[i] + disc_q * values[i + 1];
            }
        }
    }

    let price = values[0];
    if !price.is_finite() {
        return Err(PricerError::NumericalInstability {
            method: ENGINE.to_string(),
            reason: format!("root value is not finite: {}", price),
        });
    }

    debug!(
        kind = %option.kind,
        style = %option.style,
        steps = n,
        price,
        "binomial lattice priced"
    );
    Ok(price)
}
