//! Engine configuration
//!
//! Loaded from an optional TOML file plus `RANKEDGE__*` environment
//! overrides, then validated before any computation runs.

use crate::error::{EngineError, Result};
use chrono::Weekday;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Tolerance on the sum of signal weights
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Slack for binary rounding, so a sum of exactly 1 ± tolerance passes
const WEIGHT_SUM_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub momentum: MomentumConfig,
    #[serde(default)]
    pub forecast: ForecastConfig,
    #[serde(default)]
    pub edge: EdgeConfig,
}

impl EngineConfig {
    /// Load from `path` (missing file is fine) and the environment.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("RANKEDGE").separator("__"))
            .build()?;

        let config: EngineConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.momentum.validate()?;
        self.forecast.validate()?;
        self.edge.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Largest Levenshtein distance accepted by the fuzzy pass
    pub max_edit_distance: usize,
    /// Outcome keys shorter than this skip the fuzzy pass (0 = never)
    pub min_fuzzy_key_len: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            max_edit_distance: 3,
            min_fuzzy_key_len: 0,
        }
    }
}

/// Weights for the measured momentum signals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalWeights {
    pub trends: f64,
    pub wiki_views: f64,
    pub rank_delta: f64,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            trends: 0.33,
            wiki_views: 0.33,
            rank_delta: 0.34,
        }
    }
}

impl SignalWeights {
    pub fn new(trends: f64, wiki_views: f64, rank_delta: f64) -> Self {
        Self {
            trends,
            wiki_views,
            rank_delta,
        }
    }

    pub fn sum(&self) -> f64 {
        self.trends + self.wiki_views + self.rank_delta
    }

    /// Weights must be finite, non-negative and sum to 1 within tolerance.
    /// An invalid set is rejected, never renormalized.
    pub fn validate(&self) -> Result<()> {
        let all = [self.trends, self.wiki_views, self.rank_delta];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            tracing::warn!(weights = ?self, "Rejecting signal weights with negative or non-finite entries");
            return Err(EngineError::InvalidWeights { sum: self.sum() });
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE + WEIGHT_SUM_EPSILON {
            tracing::warn!(sum, "Rejecting signal weights that do not sum to 1");
            return Err(EngineError::InvalidWeights { sum });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumConfig {
    pub weights: SignalWeights,
    /// Apply the creator track-record boost
    pub use_track_record: bool,
    /// Cap on the boost points a single creator can add
    pub max_track_record_boost: f64,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            weights: SignalWeights::default(),
            use_track_record: true,
            max_track_record_boost: 15.0,
        }
    }
}

impl MomentumConfig {
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        if !self.max_track_record_boost.is_finite() || self.max_track_record_boost < 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "max_track_record_boost must be a non-negative number, got {}",
                self.max_track_record_boost
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Best possible chart position
    pub rank_floor: u32,
    /// Worst tracked chart position
    pub rank_ceiling: u32,
    /// Ranks that maximum momentum can pull the median forward (or back)
    pub momentum_rank_shift: f64,
    /// Uncertainty floor, in ranks
    pub min_rank_uncertainty: f64,
    /// Uncertainty used when history is too short to fit
    pub insufficient_rank_uncertainty: f64,
    /// Uncertainty floor for viewership, in natural-log units
    pub min_log_uncertainty: f64,
    /// Log uncertainty used when history is too short to fit
    pub insufficient_log_uncertainty: f64,
    /// History length that counts as "sufficiently long"
    pub min_history_for_high: usize,
    /// Weekly boundary forecasts are anchored to
    pub horizon_weekday: Weekday,
    /// Periods past the last observation being projected
    pub horizon_periods: u32,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            rank_floor: 1,
            rank_ceiling: 10,
            momentum_rank_shift: 2.0,
            min_rank_uncertainty: 1.0,
            insufficient_rank_uncertainty: 3.0,
            min_log_uncertainty: 0.15,
            insufficient_log_uncertainty: 0.5,
            min_history_for_high: 4,
            horizon_weekday: Weekday::Sun,
            horizon_periods: 1,
        }
    }
}

impl ForecastConfig {
    pub fn validate(&self) -> Result<()> {
        if self.rank_floor < 1 || self.rank_ceiling < self.rank_floor {
            return Err(EngineError::InvalidConfig(format!(
                "rank bounds must satisfy 1 <= floor <= ceiling, got {}..{}",
                self.rank_floor, self.rank_ceiling
            )));
        }
        let positive = [
            ("min_rank_uncertainty", self.min_rank_uncertainty),
            ("insufficient_rank_uncertainty", self.insufficient_rank_uncertainty),
            ("min_log_uncertainty", self.min_log_uncertainty),
            ("insufficient_log_uncertainty", self.insufficient_log_uncertainty),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(EngineError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if !self.momentum_rank_shift.is_finite() || self.momentum_rank_shift < 0.0 {
            return Err(EngineError::InvalidConfig(
                "momentum_rank_shift must be non-negative".into(),
            ));
        }
        if self.horizon_periods == 0 {
            return Err(EngineError::InvalidConfig("horizon_periods must be at least 1".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeConfig {
    /// |edge| in percentage points for a STRONG signal
    pub strong_threshold: Decimal,
    /// |edge| in percentage points for a MODERATE signal
    pub moderate_threshold: Decimal,
    /// Below this |edge| the signal is always HOLD
    pub hold_threshold: Decimal,
    /// Rank the market outcome is about ("reaches #1")
    pub target_rank: u32,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            strong_threshold: dec!(20),
            moderate_threshold: dec!(10),
            hold_threshold: dec!(5),
            target_rank: 1,
        }
    }
}

impl EdgeConfig {
    pub fn validate(&self) -> Result<()> {
        let ordered = Decimal::ZERO <= self.hold_threshold
            && self.hold_threshold < self.moderate_threshold
            && self.moderate_threshold <= self.strong_threshold;
        if !ordered {
            return Err(EngineError::InvalidConfig(format!(
                "edge thresholds must satisfy 0 <= hold < moderate <= strong, got {} / {} / {}",
                self.hold_threshold, self.moderate_threshold, self.strong_threshold
            )));
        }
        if self.target_rank == 0 {
            return Err(EngineError::InvalidConfig("target_rank must be at least 1".into()));
        }
        Ok(())
    }
}
