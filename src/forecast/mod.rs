//! Rank and viewership forecasting
//!
//! Fits a linear trend over the observed series, projects it to the next
//! weekly boundary and widens it into a p10/p50/p90 band using a normal
//! approximation (z = 1.28). Momentum nudges the median:
//! - Rank: high momentum pulls the median toward #1
//! - Viewership: the median is scaled by `1 + (momentum - 50) / 200` in log space
//!
//! Short histories never fail; they produce an `insufficient_data` pattern
//! with a wider band.

pub mod horizon;
pub mod trend;


pub use horizon::next_weekly_boundary;
pub use trend::{classify_slope, fit_trend, TrendFit, TrendPattern};

use crate::config::ForecastConfig;
use crate::momentum::MomentumResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// z-score of the 90th percentile of a standard normal
pub const Z_P90: f64 = 1.28;

/// Neutral momentum score
const NEUTRAL_MOMENTUM: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ForecastTarget {
    /// Chart position, lower is better
    Rank,
    /// Views, higher is better
    Viewership,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ForecastConfidence {
    Low,
    Medium,
    High,
}

/// One observation of the forecast series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub period_index: i64,
    pub value: f64,
}

impl HistoryPoint {
    pub fn new(period_index: i64, value: f64) -> Self {
        Self { period_index, value }
    }
}

/// Immutable forecast snapshot for one evaluation date.
///
/// `p10 <= p50 <= p90` numerically for both targets. For rank, `p10` is the
/// optimistic end; for viewership it is the pessimistic end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub target: ForecastTarget,
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
    pub confidence: ForecastConfidence,
    pub pattern: TrendPattern,
    /// Fitted slope (log-views per period for viewership)
    pub slope: f64,
    pub intercept: f64,
    /// Standard deviation behind the band (ranks, or log units)
    pub uncertainty: f64,
    pub history_len: usize,
    pub evaluated_on: NaiveDate,
    pub target_date: NaiveDate,
}

impl Forecast {
    pub fn band_width(&self) -> f64 {
        self.p90 - self.p10
    }

    pub fn is_collapsed(&self) -> bool {
        self.p10 == self.p50 && self.p50 == self.p90
    }
}

pub struct Forecaster {
    config: ForecastConfig,
}

impl Forecaster {
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(ForecastConfig::default())
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    pub fn forecast(
        &self,
        history: &[HistoryPoint],
        momentum: &MomentumResult,
        target: ForecastTarget,
        evaluated_on: NaiveDate,
    ) -> Forecast {
        let values = prepare_series(history, target);
        let target_date = next_weekly_boundary(evaluated_on, self.config.horizon_weekday);
        let confidence = self.confidence(values.len(), momentum);

        let band = match target {
            ForecastTarget::Rank => self.rank_band(&values, momentum),
            ForecastTarget::Viewership => self.viewership_band(&values, momentum),
        };

        Forecast {
            target,
            p10: band.p10,
            p50: band.p50,
            p90: band.p90,
            confidence,
            pattern: band.pattern,
            slope: band.slope,
            intercept: band.intercept,
            uncertainty: band.uncertainty,
            history_len: values.len(),
            evaluated_on,
            target_date,
        }
    }

    /// HIGH with long history and a live signal, MEDIUM with one of the two.
    fn confidence(&self, history_len: usize, momentum: &MomentumResult) -> ForecastConfidence {
        let long_history = history_len >= self.config.min_history_for_high;
        let live_signal = momentum.has_live_signal();
        match (long_history, live_signal) {
            (true, true) => ForecastConfidence::High,
            (true, false) | (false, true) => ForecastConfidence::Medium,
            (false, false) => ForecastConfidence::Low,
        }
    }

    /// Index of the projected period, counted from the first observation
    fn target_index(&self, len: usize) -> f64 {
        (len as f64 - 1.0) + self.config.horizon_periods as f64
    }

    fn horizon_scale(&self) -> f64 {
        (self.config.horizon_periods as f64).sqrt()
    }

    fn rank_band(&self, values: &[f64], momentum: &MomentumResult) -> Band {
        let floor = self.config.rank_floor as f64;
        let ceiling = self.config.rank_ceiling as f64;

        let (projection, slope, intercept, uncertainty, pattern) = match fit_trend(values) {
            Some(fit) => (
                fit.project(self.target_index(values.len())),
                fit.slope,
                fit.intercept,
                fit.residual_std.max(self.config.min_rank_uncertainty) * self.horizon_scale(),
                classify_slope(fit.slope),
            ),
            None => {
                let base = values.first().copied().unwrap_or((floor + ceiling) / 2.0);
                (
                    base,
                    0.0,
                    base,
                    self.config.insufficient_rank_uncertainty,
                    TrendPattern::InsufficientData,
                )
            }
        };

        let pull = (momentum.score as f64 - NEUTRAL_MOMENTUM) / NEUTRAL_MOMENTUM
            * self.config.momentum_rank_shift;
        let mut median = projection - pull;
        if !median.is_finite() {
            median = (floor + ceiling) / 2.0;
        }

        let bound = |x: f64| x.clamp(floor, ceiling).round();
        let mut p10 = bound(median - uncertainty * Z_P90);
        let p50 = bound(median);
        let mut p90 = bound(median + uncertainty * Z_P90);

        if !(p10 <= p50 && p50 <= p90) {
            tracing::debug!(p10, p50, p90, "Rank band out of order after clamping, collapsing");
            p10 = p50;
            p90 = p50;
        }

        Band {
            p10,
            p50,
            p90,
            slope,
            intercept,
            uncertainty,
            pattern,
        }
    }

    fn viewership_band(&self, values: &[f64], momentum: &MomentumResult) -> Band {
        let logs: Vec<f64> = values.iter().map(|v| v.ln()).collect();

        let (log_projection, slope, intercept, uncertainty, pattern) = match fit_trend(&logs) {
            Some(fit) => (
                fit.project(self.target_index(logs.len())),
                fit.slope,
                fit.intercept,
                fit.residual_std.max(self.config.min_log_uncertainty) * self.horizon_scale(),
                // Rising views is climbing, so the rank ladder runs on the negated slope.
                classify_slope(-fit.slope),
            ),
            None => match logs.first() {
                Some(&base) => (
                    base,
                    0.0,
                    base,
                    self.config.insufficient_log_uncertainty,
                    TrendPattern::InsufficientData,
                ),
                None => {
                    return Band {
                        p10: 0.0,
                        p50: 0.0,
                        p90: 0.0,
                        slope: 0.0,
                        intercept: 0.0,
                        uncertainty: self.config.insufficient_log_uncertainty,
                        pattern: TrendPattern::InsufficientData,
                    };
                }
            },
        };

        let factor = 1.0 + (momentum.score as f64 - NEUTRAL_MOMENTUM) / 200.0;
        let log_median = log_projection + factor.ln();

        let mut p10 = (log_median - uncertainty * Z_P90).exp();
        let mut p50 = log_median.exp();
        let mut p90 = (log_median + uncertainty * Z_P90).exp();

        if !(p10.is_finite() && p50.is_finite() && p90.is_finite() && p10 <= p50 && p50 <= p90) {
            tracing::debug!(p10, p50, p90, "Viewership band degenerate, collapsing");
            let median = if p50.is_finite() { p50 } else { 0.0 };
            p10 = median;
            p50 = median;
            p90 = median;
        }

        Band {
            p10,
            p50,
            p90,
            slope,
            intercept,
            uncertainty,
            pattern,
        }
    }
}

struct Band {
    p10: f64,
    p50: f64,
    p90: f64,
    slope: f64,
    intercept: f64,
    uncertainty: f64,
    pattern: TrendPattern,
}

/// Chronological, finite values. Viewership additionally drops non-positive counts.
fn prepare_series(history: &[HistoryPoint], target: ForecastTarget) -> Vec<f64> {
    let mut points: Vec<HistoryPoint> = history
        .iter()
        .copied()
        .filter(|p| p.value.is_finite())
        .filter(|p| target == ForecastTarget::Rank || p.value > 0.0)
        .collect();
    points.sort_by_key(|p| p.period_index);
    points.into_iter().map(|p| p.value).collect()
}

/// Forecast with the default configuration.
pub fn forecast(
    history: &[HistoryPoint],
    momentum: &MomentumResult,
    target: ForecastTarget,
    evaluated_on: NaiveDate,
) -> Forecast {
    Forecaster::with_defaults().forecast(history, momentum, target, evaluated_on)
}
