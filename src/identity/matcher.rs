//! Outcome-to-title matching
//!
//! Two passes over the identity cache: exact matching-key equality first,
//! then a bounded Levenshtein search. Absence of a match is a normal result.

use super::cache::IdentityCache;
use crate::canonical::{canonicalize, matching_key};
use crate::config::MatcherConfig;
use crate::types::{MatchConfidence, MediaKind, OutcomeMatch, TitleRecord};
use regex::Regex;
use std::sync::LazyLock;

static TRAILING_PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^()]*\)\s*$").expect("parenthetical regex"));

static TRAILING_SEASON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*:\s*season\s+\d+\s*$").expect("season regex"));

/// Strip market decoration from an outcome and canonicalize what is left.
pub fn clean_outcome(outcome_name: &str) -> String {
    let without_paren = TRAILING_PARENTHETICAL.replace(outcome_name, "");
    let without_season = TRAILING_SEASON.replace(&without_paren, "");
    canonicalize(&without_season, MediaKind::Show).canonical
}

pub struct OutcomeMatcher {
    config: MatcherConfig,
    cache: IdentityCache,
}

impl OutcomeMatcher {
    pub fn new(config: MatcherConfig, snapshot: &[TitleRecord]) -> Self {
        Self {
            config,
            cache: IdentityCache::from_snapshot(snapshot),
        }
    }

    pub fn with_defaults(snapshot: &[TitleRecord]) -> Self {
        Self::new(MatcherConfig::default(), snapshot)
    }

    pub fn cache(&self) -> &IdentityCache {
        &self.cache
    }

    /// Resolve one outcome string against the snapshot.
    pub fn match_outcome(&self, outcome_name: &str) -> OutcomeMatch {
        let key = matching_key(&clean_outcome(outcome_name));
        if key.is_empty() {
            return OutcomeMatch::none(outcome_name);
        }

        if let Some(entry) = self.cache.find_exact(&key) {
            return OutcomeMatch {
                outcome_name: outcome_name.to_string(),
                matched_title_id: Some(entry.id.clone()),
                match_confidence: MatchConfidence::Exact,
                edit_distance: Some(0),
            };
        }

        if key.chars().count() < self.config.min_fuzzy_key_len {
            tracing::debug!(outcome = outcome_name, "Outcome key too short for fuzzy matching");
            return OutcomeMatch::none(outcome_name);
        }

        match self.closest_candidate(&key) {
            Some((id, distance)) => {
                tracing::debug!(
                    outcome = outcome_name,
                    title_id = %id,
                    distance,
                    "Accepted fuzzy outcome match"
                );
                OutcomeMatch {
                    outcome_name: outcome_name.to_string(),
                    matched_title_id: Some(id),
                    match_confidence: MatchConfidence::Fuzzy,
                    edit_distance: Some(distance),
                }
            }
            None => OutcomeMatch::none(outcome_name),
        }
    }

    /// Match several outcomes against one cache build.
    pub fn match_all<S: AsRef<str>>(&self, outcomes: &[S]) -> Vec<OutcomeMatch> {
        outcomes.iter().map(|o| self.match_outcome(o.as_ref())).collect()
    }

    /// Smallest-distance candidate within the threshold; ties keep the first seen.
    fn closest_candidate(&self, key: &str) -> Option<(String, usize)> {
        let mut best: Option<(&str, usize)> = None;

        for entry in self.cache.entries() {
            for candidate in &entry.keys {
                let distance = strsim::levenshtein(key, candidate);
                tracing::trace!(candidate = %candidate, distance, "Fuzzy candidate");
                if distance > self.config.max_edit_distance {
                    continue;
                }
                if best.map_or(true, |(_, d)| distance < d) {
                    best = Some((entry.id.as_str(), distance));
                }
            }
        }

        best.map(|(id, d)| (id.to_string(), d))
    }
}

/// One-shot match: builds the cache from `snapshot`, matches, discards it.
pub fn match_outcome(outcome_name: &str, snapshot: &[TitleRecord]) -> OutcomeMatch {
    OutcomeMatcher::with_defaults(snapshot).match_outcome(outcome_name)
}
