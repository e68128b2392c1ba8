// src/config.rs
use crate::error::{validation::*, PricerError, PricerResult};

/// Default engine sizes. Callers own the cost: lattice work grows with
/// `lattice_steps²`, Monte Carlo work with `mc_paths`.
#[derive(Debug, Clone, PartialEq)]
pub struct PricerConfig {
    pub lattice_steps: usize,
    pub mc_paths: usize,
    pub mc_seed: Option<u64>,
}

impl Default for PricerConfig {
    fn default() -> Self {
        PricerConfig {
            lattice_steps: 500,
            mc_paths: 1_000_000,
            mc_seed: Some(42),
        }
    }
}

impl PricerConfig {
    /// Load from the environment (and a `.env` file when present)
    ///
    /// - `PRICER_LATTICE_STEPS` (default 500)
    /// - `PRICER_MC_PATHS` (default 1000000)
    /// - `PRICER_MC_SEED` (default 42; `none` for an entropy seed per run)
    pub fn from_env() -> PricerResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; missing keys take defaults
    pub fn from_lookup<F>(lookup: F) -> PricerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let lattice_steps = match lookup("PRICER_LATTICE_STEPS") {
            Some(raw) => parse_count("PRICER_LATTICE_STEPS", &raw)?,
            None => defaults.lattice_steps,
        };
        let mc_paths = match lookup("PRICER_MC_PATHS") {
            Some(raw) => parse_count("PRICER_MC_PATHS", &raw)?,
            None => defaults.mc_paths,
        };
        let mc_seed = match lookup("PRICER_MC_SEED") {
            Some(raw) if raw.trim().eq_ignore_ascii_case("none") => None,
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|e| PricerError::Config {
                field: "PRICER_MC_SEED".to_string(),
                reason: e.to_string(),
            })?),
            None => defaults.mc_seed,
        };

        let cfg = PricerConfig {
            lattice_steps,
            mc_paths,
            mc_seed,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> PricerResult<()> {
        validate_steps(self.lattice_steps)?;
        validate_paths(self.mc_paths)?;
        Ok(())
    }
}

fn parse_count(key: &str, raw: &str) -> PricerResult<usize> {
    raw.trim()
        .replace('_', "")
        .parse::<usize>()
        .map_err(|e| PricerError::Config {
            field: key.to_string(),
            reason: format!("{raw:?}: {e}"),
        })
}
