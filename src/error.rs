// src/error.rs
use thiserror::Error;

/// Error types for the options-pricer library
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PricerError {
    /// Invalid parameter values, including unknown option kinds or exercise styles
    #[error("Invalid parameter '{parameter}' = {value}: {constraint}")]
    InvalidParameter {
        parameter: String,
        value: String,
        constraint: String,
    },

    /// The engine cannot model the requested exercise style
    #[error("Engine '{engine}' does not support {style} exercise")]
    UnsupportedStyle { engine: String, style: String },

    /// Numerical instability or non-finite result
    #[error("Numerical instability in {method}: {reason}")]
    NumericalInstability { method: String, reason: String },

    /// A market-data collaborator could not resolve an input
    #[error("Market data unavailable from {source_name}: {reason}")]
    MarketData { source_name: String, reason: String },

    /// Invalid configuration value
    #[error("Invalid configuration for '{field}': {reason}")]
    Config { field: String, reason: String },
}

impl PricerError {
    pub fn invalid(parameter: &str, value: impl ToString, constraint: &str) -> Self {
        PricerError::InvalidParameter {
            parameter: parameter.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    /// Name the engine that rejected an `InvalidParameter`; other variants pass through
    pub fn in_engine(self, engine: &str) -> Self {
        match self {
            PricerError::InvalidParameter {
                parameter,
                value,
                constraint,
            } => PricerError::InvalidParameter {
                parameter,
                value,
                constraint: format!("{constraint} [{engine} engine]"),
            },
            other => other,
        }
    }

    pub fn market_data(source_name: &str, reason: impl Into<String>) -> Self {
        PricerError::MarketData {
            source_name: source_name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for options-pricer operations
pub type PricerResult<T> = Result<T, PricerError>;

/// Validation utilities
pub mod validation {
    use super::{PricerError, PricerResult};

    /// Largest accepted lattice depth. Cost grows with steps².
    pub const MAX_STEPS: usize = 100_000;

    /// Largest accepted Monte Carlo sample count.
    pub const MAX_PATHS: usize = 1_000_000_000;

    /// Validate that a parameter is finite and strictly positive
    pub fn validate_positive(name: &str, value: f64) -> PricerResult<()> {
        if value <= 0.0 || !value.is_finite() {
            Err(PricerError::invalid(name, value, "must be positive (> 0) and finite"))
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> PricerResult<()> {
        if !value.is_finite() {
            Err(PricerError::invalid(
                name,
                value,
                "must be finite (not NaN or infinite)",
            ))
        } else {
            Ok(())
        }
    }

    /// Validate paths count
    pub fn validate_paths(paths: usize) -> PricerResult<()> {
        if paths == 0 {
            Err(PricerError::invalid("paths", paths, "must be at least 1"))
        } else if paths > MAX_PATHS {
            Err(PricerError::invalid(
                "paths",
                paths,
                "exceeds maximum allowed (1 billion)",
            ))
        } else {
            Ok(())
        }
    }

    /// Validate lattice steps count
    pub fn validate_steps(steps: usize) -> PricerResult<()> {
        if steps == 0 {
            Err(PricerError::invalid("steps", steps, "must be at least 1"))
        } else if steps > MAX_STEPS {
            Err(PricerError::invalid(
                "steps",
                steps,
                "exceeds maximum allowed (100,000)",
            ))
        } else {
            Ok(())
        }
    }
}
