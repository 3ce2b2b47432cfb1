//! Core identity types shared across modules

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Kind of content a title refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaKind {
    #[default]
    Show,
    Movie,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Show => "SHOW",
            MediaKind::Movie => "MOVIE",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "show" | "tv" | "series" => Ok(MediaKind::Show),
            "movie" | "film" => Ok(MediaKind::Movie),
            other => Err(format!("unknown media kind: {}", other)),
        }
    }
}

/// Output of the canonicalizer. A value, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTitle {
    /// Raw input text
    pub original: String,
    /// Season-stripped, punctuation-normalized name
    pub canonical: String,
    /// Season / part / volume number, if the input carried one
    pub season: Option<u32>,
    /// Hash of the matching key and media kind
    pub title_key: String,
}

/// A deduplicated title identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalTitle {
    pub id: String,
    pub canonical_name: String,
    pub media_kind: MediaKind,
    pub aliases: BTreeSet<String>,
    pub title_key: String,
}

/// Snapshot row handed to the matcher by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleRecord {
    pub id: String,
    pub canonical_name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl From<&CanonicalTitle> for TitleRecord {
    fn from(title: &CanonicalTitle) -> Self {
        Self {
            id: title.id.clone(),
            canonical_name: title.canonical_name.clone(),
            aliases: title.aliases.iter().cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchConfidence {
    Exact,
    Fuzzy,
    None,
}

/// Result of resolving one outcome string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeMatch {
    pub outcome_name: String,
    pub matched_title_id: Option<String>,
    pub match_confidence: MatchConfidence,
    /// Edit distance of the accepted candidate (0 for exact matches)
    pub edit_distance: Option<usize>,
}

impl OutcomeMatch {
    pub fn none(outcome_name: &str) -> Self {
        Self {
            outcome_name: outcome_name.to_string(),
            matched_title_id: None,
            match_confidence: MatchConfidence::None,
            edit_distance: None,
        }
    }

    pub fn is_match(&self) -> bool {
        self.matched_title_id.is_some()
    }
}
