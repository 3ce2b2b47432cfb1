//! Momentum scoring
//!
//! Combines independently scaled popularity signals into a 0-100 score:
//! - Search interest, already on a 0-100 scale
//! - Page views, log-scaled: `min(100, log10(views) * 10)`
//! - Rank delta, mapped from [-10, +10] onto [0, 100]
//! - Optional creator track-record boost, added on top
//!
//! Only present signals take part in the weighted average. Malformed values
//! (NaN, infinities, non-positive view counts) count as absent.

pub mod signals;
pub mod track_record;

#[cfg(test)]
mod tests;

pub use signals::{Observation, ObservationKind, SignalSet};
pub use track_record::{CreatorRecord, TrackRecordBoost, TrackRecordTable, CREATOR_RECORDS};

use crate::config::{MomentumConfig, SignalWeights};
use crate::error::Result;
use serde::{Deserialize, Serialize};

pub const MIN_SCORE: u32 = 0;
pub const MAX_SCORE: u32 = 100;
pub const ACCELERATION_LIMIT: f64 = 100.0;

/// Rank delta that maps to the ends of the 0-100 scale
const RANK_DELTA_SPAN: f64 = 10.0;

/// Raw momentum inputs for one title and period
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MomentumInputs {
    /// Search interest, 0-100
    pub trends: Option<f64>,
    /// Cumulative page views for the period
    pub wiki_views: Option<f64>,
    /// Signed rank change, positive = moved up the chart
    pub rank_delta: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalKind {
    SearchInterest,
    PageViews,
    RankDelta,
}

/// One measured signal's part in the score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalContribution {
    pub signal: SignalKind,
    pub raw_value: f64,
    /// Value on the 0-100 scale
    pub normalized: f64,
    pub weight: f64,
    /// Points this signal adds to the weighted average
    pub contribution: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MomentumBreakdown {
    pub signals: Vec<SignalContribution>,
    /// Signals supplied with unusable values
    pub dropped: Vec<SignalKind>,
    /// Sum of weights of the present signals
    pub total_weight: f64,
    /// Weighted average before boost, rounding and clamping
    pub weighted_average: f64,
    pub track_record: Option<TrackRecordBoost>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentumResult {
    /// 0-100
    pub score: u32,
    /// -100..=100
    pub acceleration_score: f64,
    pub breakdown: MomentumBreakdown,
}

impl MomentumResult {
    /// Number of measured signals that fed the score
    pub fn live_signal_count(&self) -> usize {
        self.breakdown.signals.len()
    }

    pub fn has_live_signal(&self) -> bool {
        self.live_signal_count() > 0
    }
}

/// Momentum scorer with validated weights
#[derive(Debug, Clone)]
pub struct MomentumScorer {
    weights: SignalWeights,
    track_record: Option<TrackRecordTable>,
}

impl MomentumScorer {
    pub fn new(config: &MomentumConfig) -> Result<Self> {
        config.validate()?;
        let track_record = config
            .use_track_record
            .then(|| TrackRecordTable::new(config.max_track_record_boost));
        Ok(Self {
            weights: config.weights,
            track_record,
        })
    }

    /// Scorer without the track-record boost
    pub fn with_weights(weights: SignalWeights) -> Result<Self> {
        weights.validate()?;
        Ok(Self {
            weights,
            track_record: None,
        })
    }

    pub fn weights(&self) -> SignalWeights {
        self.weights
    }

    /// Score measured signals only.
    pub fn score(&self, inputs: &MomentumInputs) -> MomentumResult {
        self.score_inner(inputs, None, None)
    }

    /// Score a title: measured signals, creator boost from its names, and
    /// acceleration against the previous period's score.
    pub fn score_title<S: AsRef<str>>(
        &self,
        inputs: &MomentumInputs,
        names: &[S],
        previous: Option<f64>,
    ) -> MomentumResult {
        let boost = self.track_record.as_ref().and_then(|t| t.lookup(names));
        self.score_inner(inputs, boost, previous)
    }

    fn score_inner(
        &self,
        inputs: &MomentumInputs,
        boost: Option<TrackRecordBoost>,
        previous: Option<f64>,
    ) -> MomentumResult {
        let mut breakdown = MomentumBreakdown::default();

        let candidates = [
            (SignalKind::SearchInterest, inputs.trends, self.weights.trends),
            (SignalKind::PageViews, inputs.wiki_views, self.weights.wiki_views),
            (SignalKind::RankDelta, inputs.rank_delta, self.weights.rank_delta),
        ];

        let mut present = Vec::with_capacity(candidates.len());
        for (signal, raw, weight) in candidates {
            let Some(raw) = raw else { continue };
            match normalize_signal(signal, raw) {
                Some(normalized) => present.push((signal, raw, normalized, weight)),
                None => {
                    tracing::debug!(?signal, raw, "Dropping malformed momentum signal");
                    breakdown.dropped.push(signal);
                }
            }
        }

        let total_weight: f64 = present.iter().map(|(_, _, _, w)| w).sum();
        let weighted_average = if total_weight > 0.0 {
            present.iter().map(|(_, _, n, w)| n * w).sum::<f64>() / total_weight
        } else {
            0.0
        };

        breakdown.signals = present
            .into_iter()
            .map(|(signal, raw_value, normalized, weight)| SignalContribution {
                signal,
                raw_value,
                normalized,
                weight,
                contribution: if total_weight > 0.0 {
                    normalized * weight / total_weight
                } else {
                    0.0
                },
            })
            .collect();
        breakdown.total_weight = total_weight;
        breakdown.weighted_average = weighted_average;

        let boost_points = boost.as_ref().map_or(0.0, |b| b.applied_boost);
        breakdown.track_record = boost;

        let score = clamp_score(weighted_average + boost_points);
        MomentumResult {
            score,
            acceleration_score: compute_acceleration(score as f64, previous),
            breakdown,
        }
    }
}

/// Map one raw signal onto the 0-100 scale; `None` when the value is unusable.
pub fn normalize_signal(signal: SignalKind, raw: f64) -> Option<f64> {
    if !raw.is_finite() {
        return None;
    }
    match signal {
        SignalKind::SearchInterest => Some(raw),
        SignalKind::PageViews => {
            if raw <= 0.0 {
                return None;
            }
            Some((raw.log10() * 10.0).clamp(0.0, 100.0))
        }
        SignalKind::RankDelta => {
            let clamped = raw.clamp(-RANK_DELTA_SPAN, RANK_DELTA_SPAN);
            Some((clamped + RANK_DELTA_SPAN) / (2.0 * RANK_DELTA_SPAN) * 100.0)
        }
    }
}

fn clamp_score(value: f64) -> u32 {
    if !value.is_finite() {
        return MIN_SCORE;
    }
    value.round().clamp(MIN_SCORE as f64, MAX_SCORE as f64) as u32
}

/// Validate `weights`, then score `inputs` without a creator boost.
pub fn compute_momentum(inputs: &MomentumInputs, weights: SignalWeights) -> Result<MomentumResult> {
    Ok(MomentumScorer::with_weights(weights)?.score(inputs))
}

/// `clamp((current - previous) * 2, -100, 100)`, zero without a previous score.
pub fn compute_acceleration(current: f64, previous: Option<f64>) -> f64 {
    match previous {
        Some(prev) if prev.is_finite() && current.is_finite() => {
            ((current - prev) * 2.0).clamp(-ACCELERATION_LIMIT, ACCELERATION_LIMIT)
        }
        _ => 0.0,
    }
}
