//! End-to-end evaluation of one market outcome
//!
//! ```text
//! outcome text + snapshot → Matcher → title id
//!                                      ↓
//!               signals → Momentum → Forecaster → Edge vs market
//! ```
//!
//! Every input arrives in the request; nothing is fetched or cached here.


use crate::config::EngineConfig;
use crate::edge::{EdgeCalculator, EdgeResult, OutcomeCondition};
use crate::error::Result;
use crate::forecast::{Forecast, ForecastTarget, Forecaster, HistoryPoint};
use crate::identity::OutcomeMatcher;
use crate::momentum::{MomentumResult, MomentumScorer, SignalSet};
use crate::types::{OutcomeMatch, TitleRecord};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Everything needed to evaluate one outcome, already fetched by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub outcome_name: String,
    /// Market-implied probability (0-1); absent when the market has no price
    #[serde(default)]
    pub market_probability: Option<Decimal>,
    /// Known titles, in stable order
    pub snapshot: Vec<TitleRecord>,
    /// Signal sets for any titles; the matched title's latest period is used
    #[serde(default)]
    pub signals: Vec<SignalSet>,
    /// Observation series per title id
    #[serde(default)]
    pub history: HashMap<String, Vec<HistoryPoint>>,
    /// Momentum score from the previous evaluation period, per title id
    #[serde(default)]
    pub previous_momentum: HashMap<String, f64>,
    #[serde(default = "default_target")]
    pub target: ForecastTarget,
    /// Overrides the target's default outcome condition
    #[serde(default)]
    pub condition: Option<OutcomeCondition>,
}

fn default_target() -> ForecastTarget {
    ForecastTarget::Rank
}

/// Result of one evaluation. Only `outcome` is set when nothing matched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub outcome: OutcomeMatch,
    pub momentum: Option<MomentumResult>,
    pub forecast: Option<Forecast>,
    pub edge: Option<EdgeResult>,
}

pub struct Engine {
    config: EngineConfig,
    scorer: MomentumScorer,
    forecaster: Forecaster,
    edge: EdgeCalculator,
}

impl Engine {
    /// Validates the configuration up front; evaluation itself cannot fail.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let scorer = MomentumScorer::new(&config.momentum)?;
        let forecaster = Forecaster::new(config.forecast.clone());
        let edge = EdgeCalculator::new(config.edge.clone());
        Ok(Self {
            config,
            scorer,
            forecaster,
            edge,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn evaluate(&self, request: &EvaluationRequest, evaluated_on: NaiveDate) -> Evaluation {
        let matcher = OutcomeMatcher::new(self.config.matcher.clone(), &request.snapshot);
        let outcome = matcher.match_outcome(&request.outcome_name);

        let Some(title_id) = outcome.matched_title_id.clone() else {
            tracing::debug!(outcome = %request.outcome_name, "No title matched, skipping forecast");
            return Evaluation {
                outcome,
                momentum: None,
                forecast: None,
                edge: None,
            };
        };

        let names = title_names(&request.snapshot, &title_id);
        let inputs = latest_signals(&request.signals, &title_id, evaluated_on)
            .map(|s| s.inputs())
            .unwrap_or_default();
        let previous = request.previous_momentum.get(&title_id).copied();
        let momentum = self.scorer.score_title(&inputs, &names, previous);

        let history = request
            .history
            .get(&title_id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let forecast = self
            .forecaster
            .forecast(history, &momentum, request.target, evaluated_on);

        let condition = request
            .condition
            .unwrap_or_else(|| self.edge.default_condition(&forecast));
        let edge = self.edge.compute_edge_for(
            condition,
            request.market_probability,
            &forecast,
            &momentum,
        );

        tracing::info!(
            title_id = %title_id,
            momentum = momentum.score,
            direction = ?edge.direction,
            edge = %edge.edge_percent,
            "Evaluated outcome"
        );

        Evaluation {
            outcome,
            momentum: Some(momentum),
            forecast: Some(forecast),
            edge: Some(edge),
        }
    }
}

fn title_names(snapshot: &[TitleRecord], title_id: &str) -> Vec<String> {
    snapshot
        .iter()
        .find(|r| r.id == title_id)
        .map(|r| {
            std::iter::once(r.canonical_name.clone())
                .chain(r.aliases.iter().cloned())
                .collect()
        })
        .unwrap_or_default()
}

/// Most recent signal set for the title not later than the evaluation date
fn latest_signals<'a>(
    signals: &'a [SignalSet],
    title_id: &str,
    evaluated_on: NaiveDate,
) -> Option<&'a SignalSet> {
    signals
        .iter()
        .filter(|s| s.title_id == title_id && s.period <= evaluated_on)
        .max_by_key(|s| s.period)
}
