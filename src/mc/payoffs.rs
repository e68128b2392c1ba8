//! Option Payoff Functions
//!
//! # Mathematical Definitions
//!
//! - **Call**: max(S_T - K, 0) - right to buy at strike K
//! - **Put**: max(K - S_T, 0) - right to sell at strike K
//!
//! Payoffs are evaluated elementwise over a whole batch of simulated
//! terminal prices.

use crate::option::{OptionKind, OptionSpec};
use ndarray::Array1;

/// European payoff on the terminal price
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payoff {
    /// European call option: max(S_T - K, 0)
    EuropeanCall { k: f64 },

    /// European put option: max(K - S_T, 0)
    EuropeanPut { k: f64 },
}

impl Payoff {
    pub fn from_spec(spec: &OptionSpec) -> Self {
        match spec.kind {
            OptionKind::Call => Payoff::EuropeanCall { k: spec.strike },
            OptionKind::Put => Payoff::EuropeanPut { k: spec.strike },
        }
    }

    /// Payoff for a single terminal price
    #[inline]
    pub fn calculate(&self, s_t: f64) -> f64 {
        match *self {
            Payoff::EuropeanCall { k } => (s_t - k).max(0.0),
            Payoff::EuropeanPut { k } => (k - s_t).max(0.0),
        }
    }

    /// Payoffs for a batch of terminal prices
    pub fn calculate_batch(&self, terminal_prices: &Array1<f64>) -> Array1<f64> {
        let payoff = *self;
        terminal_prices.mapv(move |s_t| payoff.calculate(s_t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_call_and_put_batches() {
        let prices = array![80.0, 100.0, 125.0];
        let calls = Payoff::EuropeanCall { k: 100.0 }.calculate_batch(&prices);
        let puts = Payoff::EuropeanPut { k: 100.0 }.calculate_batch(&prices);
        assert_eq!(calls, array![0.0, 0.0, 25.0]);
        assert_eq!(puts, array![20.0, 0.0, 0.0]);
    }
}
