// src/models/gbm.rs
use crate::option::OptionSpec;
use ndarray::Array1;

/// Geometric Brownian Motion under the risk-neutral measure
///
/// ```text
/// dS_t = (r - q) S_t dt + σ S_t dW_t
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gbm {
    pub s0: f64,
    pub mu: f64,
    pub sigma: f64,
}

impl Gbm {
    pub fn new(s0: f64, mu: f64, sigma: f64) -> Self {
        Gbm { s0, mu, sigma }
    }

    /// Risk-neutral dynamics for `spec`: drift `r - q`
    pub fn risk_neutral(spec: &OptionSpec) -> Self {
        Gbm::new(spec.spot, spec.rate - spec.dividend_yield, spec.volatility)
    }

    /// Exact transition over `dt` for a standard normal draw
    ///
    /// ```text
    /// S_{t+dt} = S_t * exp((μ - σ²/2)dt + σ√dt Z)
    /// ```
    pub fn exact_step(&self, s_t: f64, dt: f64, normal_draw: f64) -> f64 {
        s_t * ((self.mu - 0.5 * self.sigma * self.sigma) * dt
            + self.sigma * dt.sqrt() * normal_draw)
            .exp()
    }

    /// Terminal prices `S_T` from `S_0` for a batch of standard normal draws
    pub fn terminal_prices(&self, t: f64, normal_draws: &Array1<f64>) -> Array1<f64> {
        let drift = (self.mu - 0.5 * self.sigma * self.sigma) * t;
        let vol = self.sigma * t.sqrt();
        let s0 = self.s0;
        normal_draws.mapv(|z| s0 * (drift + vol * z).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_zero_draw_grows_at_median_rate() {
        let gbm = Gbm::new(100.0, 0.05, 0.2);
        let st = gbm.exact_step(100.0, 1.0, 0.0);
        assert!((st - 100.0 * (0.05_f64 - 0.02).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_batch_matches_scalar_step() {
        let gbm = Gbm::new(80.0, 0.01, 0.35);
        let draws = array![-1.5, 0.0, 0.3, 2.2];
        let batch = gbm.terminal_prices(0.75, &draws);
        for (z, st) in draws.iter().zip(batch.iter()) {
            assert!((gbm.exact_step(80.0, 0.75, *z) - st).abs() < 1e-12);
        }
    }
}
