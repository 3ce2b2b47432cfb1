//! Error types
//!
//! The scoring, matching and forecasting paths are total and never fail.
//! Errors only surface at the configuration boundary.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Signal weights must sum to 1.0 (±0.01), got {sum:.4}")]
    InvalidWeights { sum: f64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}
