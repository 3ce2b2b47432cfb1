//! Model-vs-market edge
//!
//! Turns a forecast band plus momentum into the probability that a title
//! meets a market's condition, then compares it with the market price.
//! Edge is in percentage points: `(model - market) * 100`.


use crate::config::EdgeConfig;
use crate::forecast::{Forecast, ForecastTarget, Z_P90};
use crate::momentum::MomentumResult;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

/// Model probabilities never reach certainty
const MIN_MODEL_PROBABILITY: f64 = 0.01;
const MAX_MODEL_PROBABILITY: f64 = 0.99;

/// Probability points added at momentum 100 (subtracted at 0)
const MOMENTUM_TILT: f64 = 0.10;
/// Probability points added at acceleration +100
const ACCELERATION_TILT: f64 = 0.05;

/// Narrowest rank spread assumed, so a collapsed band is not read as certainty
const MIN_RANK_SIGMA: f64 = 0.5;
const MIN_LOG_SIGMA: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Buy,
    Avoid,
    Hold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Strength {
    Weak,
    Moderate,
    Strong,
}

/// What the market outcome pays on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeCondition {
    /// Title charts at this rank or better
    RankAtOrBetter(u32),
    /// Title reaches at least this many views
    ViewsAtLeast(f64),
}

/// Edge and its classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeClassification {
    /// Percentage points, zero without market data
    pub edge_percent: Decimal,
    pub direction: Direction,
    pub strength: Strength,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeResult {
    pub condition: OutcomeCondition,
    pub model_probability: Decimal,
    pub market_probability: Option<Decimal>,
    pub edge_percent: Decimal,
    pub direction: Direction,
    pub strength: Strength,
    pub reasoning: String,
}

pub struct EdgeCalculator {
    config: EdgeConfig,
}

impl EdgeCalculator {
    pub fn new(config: EdgeConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(EdgeConfig::default())
    }

    /// Condition implied by the forecast target: the configured rank for rank
    /// forecasts, reaching the forecast median for viewership.
    pub fn default_condition(&self, forecast: &Forecast) -> OutcomeCondition {
        match forecast.target {
            ForecastTarget::Rank => OutcomeCondition::RankAtOrBetter(self.config.target_rank),
            ForecastTarget::Viewership => OutcomeCondition::ViewsAtLeast(forecast.p50),
        }
    }

    pub fn compute_edge(
        &self,
        market_probability: Option<Decimal>,
        forecast: &Forecast,
        momentum: &MomentumResult,
    ) -> EdgeResult {
        let condition = self.default_condition(forecast);
        self.compute_edge_for(condition, market_probability, forecast, momentum)
    }

    pub fn compute_edge_for(
        &self,
        condition: OutcomeCondition,
        market_probability: Option<Decimal>,
        forecast: &Forecast,
        momentum: &MomentumResult,
    ) -> EdgeResult {
        let market_probability = market_probability.filter(|p| {
            let valid = *p >= Decimal::ZERO && *p <= Decimal::ONE;
            if !valid {
                tracing::debug!(market = %p, "Ignoring market probability outside [0, 1]");
            }
            valid
        });

        let model_probability = self.model_probability(condition, forecast, momentum);
        let classification = self.classify(model_probability, market_probability);
        let reasoning = self.reasoning(
            &classification,
            model_probability,
            market_probability,
            forecast,
            momentum,
        );

        EdgeResult {
            condition,
            model_probability,
            market_probability,
            edge_percent: classification.edge_percent,
            direction: classification.direction,
            strength: classification.strength,
            reasoning,
        }
    }

    /// Probability the condition is met: a normal read of the forecast band,
    /// tilted by momentum and acceleration.
    pub fn model_probability(
        &self,
        condition: OutcomeCondition,
        forecast: &Forecast,
        momentum: &MomentumResult,
    ) -> Decimal {
        let base = match condition {
            OutcomeCondition::RankAtOrBetter(rank) => {
                let sigma = (forecast.band_width() / (2.0 * Z_P90)).max(MIN_RANK_SIGMA);
                // Ranks are whole numbers; +0.5 counts the target rank itself.
                standard_normal_cdf((rank as f64 + 0.5 - forecast.p50) / sigma)
            }
            OutcomeCondition::ViewsAtLeast(threshold) => {
                if threshold <= 0.0 {
                    1.0
                } else if forecast.p50 <= 0.0 || forecast.p10 <= 0.0 {
                    0.0
                } else {
                    let sigma = ((forecast.p90.ln() - forecast.p10.ln()) / (2.0 * Z_P90))
                        .max(MIN_LOG_SIGMA);
                    standard_normal_cdf((forecast.p50.ln() - threshold.ln()) / sigma)
                }
            }
        };

        let tilt = (momentum.score as f64 - 50.0) / 50.0 * MOMENTUM_TILT
            + momentum.acceleration_score / 100.0 * ACCELERATION_TILT;
        let probability = (base + tilt).clamp(MIN_MODEL_PROBABILITY, MAX_MODEL_PROBABILITY);

        Decimal::from_f64(probability)
            .unwrap_or(dec!(0.5))
            .round_dp(4)
    }

    /// Classify model vs market. Without market data the signal is HOLD/WEAK.
    pub fn classify(
        &self,
        model_probability: Decimal,
        market_probability: Option<Decimal>,
    ) -> EdgeClassification {
        let Some(market) = market_probability else {
            return EdgeClassification {
                edge_percent: Decimal::ZERO,
                direction: Direction::Hold,
                strength: Strength::Weak,
            };
        };

        let edge_percent = ((model_probability - market) * Decimal::ONE_HUNDRED).round_dp(2);
        let magnitude = edge_percent.abs();

        let strength = if magnitude >= self.config.strong_threshold {
            Strength::Strong
        } else if magnitude >= self.config.moderate_threshold {
            Strength::Moderate
        } else {
            Strength::Weak
        };

        let direction = if magnitude < self.config.hold_threshold {
            Direction::Hold
        } else if edge_percent > Decimal::ZERO {
            Direction::Buy
        } else {
            Direction::Avoid
        };

        EdgeClassification {
            edge_percent,
            direction,
            strength,
        }
    }

    fn reasoning(
        &self,
        classification: &EdgeClassification,
        model: Decimal,
        market: Option<Decimal>,
        forecast: &Forecast,
        momentum: &MomentumResult,
    ) -> String {
        let headline = match market {
            None => format!(
                "HOLD: no market price; model {}",
                as_percent(model)
            ),
            Some(market) if classification.direction == Direction::Hold => format!(
                "HOLD: model {} vs market {}, edge {:+}pp inside the {}pp band",
                as_percent(model),
                as_percent(market),
                classification.edge_percent,
                self.config.hold_threshold
            ),
            Some(market) => format!(
                "{} ({}): model {} vs market {}, edge {:+}pp",
                direction_label(classification.direction),
                strength_label(classification.strength),
                as_percent(model),
                as_percent(market),
                classification.edge_percent
            ),
        };

        let band = match forecast.target {
            ForecastTarget::Rank => format!(
                "rank p10-p90 #{:.0}-#{:.0}, median #{:.0}",
                forecast.p10, forecast.p90, forecast.p50
            ),
            ForecastTarget::Viewership => format!(
                "views p10-p90 {:.0}-{:.0}, median {:.0}",
                forecast.p10, forecast.p90, forecast.p50
            ),
        };

        format!(
            "{}. Momentum {}/100, acceleration {:+.0}. Forecast {} ({}, {:?} confidence).",
            headline,
            momentum.score,
            momentum.acceleration_score,
            band,
            forecast.pattern.as_str(),
            forecast.confidence
        )
    }
}

fn standard_normal_cdf(z: f64) -> f64 {
    if !z.is_finite() {
        return if z > 0.0 { 1.0 } else { 0.0 };
    }
    Normal::new(0.0, 1.0).map(|n| n.cdf(z)).unwrap_or(0.5)
}

fn as_percent(p: Decimal) -> String {
    format!("{:.1}%", p * Decimal::ONE_HUNDRED)
}

fn direction_label(direction: Direction) -> &'static str {
    match direction {
        Direction::Buy => "BUY",
        Direction::Avoid => "AVOID",
        Direction::Hold => "HOLD",
    }
}

fn strength_label(strength: Strength) -> &'static str {
    match strength {
        Strength::Strong => "STRONG",
        Strength::Moderate => "MODERATE",
        Strength::Weak => "WEAK",
    }
}

/// Edge with the default configuration and condition.
pub fn compute_edge(
    market_probability: Option<Decimal>,
    forecast: &Forecast,
    momentum: &MomentumResult,
) -> EdgeResult {
    EdgeCalculator::with_defaults().compute_edge(market_probability, forecast, momentum)
}
