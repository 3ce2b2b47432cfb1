//! Streaming Title Identity & Market Edge Engine
//!
//! Resolves prediction-market outcome names to tracked streaming titles,
//! scores their momentum, forecasts their next chart position or viewership,
//! and compares that forecast with market odds.
//!
//! ## Architecture
//!
//! ```text
//! Canonicalizer → Identity Cache → Outcome Matcher
//!                                        ↓
//!       Signals → Momentum Scorer → Forecaster → Edge Calculator
//! ```
//!
//! All operations are synchronous and pure over caller-supplied data.

pub mod canonical;
pub mod config;
pub mod edge;
pub mod error;
pub mod forecast;
pub mod identity;
pub mod momentum;
pub mod pipeline;
pub mod types;

pub use canonical::{canonicalize, matching_key, title_key};
pub use edge::{compute_edge, Direction, EdgeCalculator, EdgeResult, OutcomeCondition, Strength};
pub use error::{EngineError, Result};
pub use forecast::{forecast, Forecast, ForecastConfidence, ForecastTarget, Forecaster, HistoryPoint};
pub use identity::{match_outcome, OutcomeMatcher, TitleCatalog};
pub use momentum::{compute_acceleration, compute_momentum, MomentumInputs, MomentumResult, MomentumScorer};
pub use pipeline::{Engine, Evaluation, EvaluationRequest};

#[cfg(test)]
mod types_tests;
#[cfg(test)]
mod config_tests;
