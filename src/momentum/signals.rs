//! Per-title, per-period signal observations supplied by the caller

use super::MomentumInputs;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObservationKind {
    SearchInterest,
    PageViews,
    Rank,
    PreviousRank,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub kind: ObservationKind,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalSet {
    pub title_id: String,
    pub period: NaiveDate,
    #[serde(default)]
    pub observations: Vec<Observation>,
}

impl SignalSet {
    pub fn new(title_id: &str, period: NaiveDate) -> Self {
        Self {
            title_id: title_id.to_string(),
            period,
            observations: Vec::new(),
        }
    }

    pub fn with(mut self, kind: ObservationKind, value: f64) -> Self {
        self.observations.push(Observation { kind, value });
        self
    }

    /// Last observation of `kind`; later entries supersede earlier ones.
    pub fn latest(&self, kind: ObservationKind) -> Option<f64> {
        self.observations
            .iter()
            .rev()
            .find(|o| o.kind == kind)
            .map(|o| o.value)
    }

    /// Momentum inputs for this period. The rank delta is
    /// `previous_rank - rank`, so moving up the chart is positive.
    pub fn inputs(&self) -> MomentumInputs {
        let rank_delta = match (
            self.latest(ObservationKind::PreviousRank),
            self.latest(ObservationKind::Rank),
        ) {
            (Some(previous), Some(current)) => Some(previous - current),
            _ => None,
        };

        MomentumInputs {
            trends: self.latest(ObservationKind::SearchInterest),
            wiki_views: self.latest(ObservationKind::PageViews),
            rank_delta,
        }
    }
}
