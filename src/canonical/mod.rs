//! Title canonicalization
//!
//! Turns a free-text title into a stable identity:
//! - Glyph cleanup (whitespace, dash/quote variants, edge punctuation)
//! - Bracketed qualifier removal ("(Limited Series)", "(Part 2)", ...)
//! - Diacritic folding
//! - Sequel numeral conversion ("Rocky II" -> "Rocky 2")
//! - Season / part / volume suffix extraction
//! - Title key hashing
//!
//! Every function here is pure and total. The canonical form is a fixed
//! point: canonicalizing a canonical name returns it unchanged with no season.

mod fold;
mod roman;


pub use fold::fold_diacritics;

use crate::types::{MediaKind, NormalizedTitle};
use regex::Regex;
use sha2::{Digest, Sha256};
use std::sync::LazyLock;

/// Hex characters kept from the title key digest
pub const TITLE_KEY_LEN: usize = 16;

/// Characters trimmed from both ends of a title
const EDGE_PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '-', '_', '*', '~', '\'', '"', '|', '/', '\\', '•', '·', '…',
];

static QUALIFIER_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\s*[\(\[]\s*(?:limited\s+series|mini-?series|tv\s+series|series|film|movie|documentary|docuseries|(?:part|volume|vol\.?)\s+(\d+))\s*[\)\]]\s*$",
    )
    .expect("qualifier regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SuffixKind {
    Season,
    Part,
}

/// Ordered suffix patterns. Earlier patterns win.
static SEASON_PATTERNS: LazyLock<Vec<(Regex, SuffixKind)>> = LazyLock::new(|| {
    [
        (r"(?i)^(.+?)\s*:\s*season\s+(\d+)$", SuffixKind::Season),
        (r"(?i)^(.+?)\s+-\s+season\s+(\d+)$", SuffixKind::Season),
        (r"(?i)^(.+?)\s+season\s+(\d+)$", SuffixKind::Season),
        (r"(?i)^(.+?)\s*:\s*s(\d{1,2})$", SuffixKind::Season),
        (r"(?i)^(.+?)\s+s(\d{1,2})$", SuffixKind::Season),
        (r"(?i)^(.+?)\s*:\s*part\s+(\d+)$", SuffixKind::Part),
        (r"(?i)^(.+?)\s+part\s+(\d+)$", SuffixKind::Part),
        (r"(?i)^(.+?)\s*:\s*vol(?:ume|\.)?\s+(\d+)$", SuffixKind::Part),
        (r"(?i)^(.+?)\s+vol(?:ume|\.)?\s+(\d+)$", SuffixKind::Part),
    ]
    .into_iter()
    .map(|(pattern, kind)| (Regex::new(pattern).expect("season pattern"), kind))
    .collect()
});

/// Canonicalize a raw title for the given media kind.
pub fn canonicalize(title: &str, kind: MediaKind) -> NormalizedTitle {
    let mut current = tidy(&normalize_glyphs(title));
    let mut season = SeasonTracker::default();

    // Every step removes text or rewrites it into a form no step touches
    // again, so this settles. Stacked suffixes peel off one per pass.
    loop {
        let (stripped, bracket_part) = strip_qualifiers(&current);
        if let Some(n) = bracket_part {
            season.record(n, SuffixKind::Part);
        }

        let folded = fold_diacritics(&stripped);
        let numbered = roman::arabicize_trailing(&folded);

        let (base, suffix) = split_season_suffix(&numbered);
        if let Some((n, suffix_kind)) = suffix {
            season.record(n, suffix_kind);
        }

        let next = tidy(&base);
        if next == current {
            break;
        }
        current = next;
    }

    let title_key = title_key(&current, kind);
    NormalizedTitle {
        original: title.to_string(),
        canonical: current,
        season: season.value,
        title_key,
    }
}

/// Lowercase, alphanumeric-only projection used for equality and distance.
pub fn matching_key(text: &str) -> String {
    fold_diacritics(text)
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Deterministic identity hash over the matching key and media kind.
pub fn title_key(canonical: &str, kind: MediaKind) -> String {
    let mut hasher = Sha256::new();
    hasher.update(matching_key(canonical).as_bytes());
    hasher.update(b":");
    hasher.update(kind.as_str().as_bytes());
    let mut key = hex::encode(hasher.finalize());
    key.truncate(TITLE_KEY_LEN);
    key
}

/// Season numbers from "Season"/"SN" suffixes outrank part/volume numbers.
#[derive(Debug, Default)]
struct SeasonTracker {
    value: Option<u32>,
    from_season: bool,
}

impl SeasonTracker {
    fn record(&mut self, n: u32, kind: SuffixKind) {
        match kind {
            SuffixKind::Season if !self.from_season => {
                self.value = Some(n);
                self.from_season = true;
            }
            SuffixKind::Part if self.value.is_none() => self.value = Some(n),
            _ => {}
        }
    }
}

fn normalize_glyphs(text: &str) -> String {
    text.chars().map(fold::normalize_glyph).collect()
}

/// Trim, collapse whitespace, strip edge punctuation.
fn tidy(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_matches(|c: char| c.is_whitespace() || EDGE_PUNCTUATION.contains(&c))
        .to_string()
}

fn strip_qualifiers(title: &str) -> (String, Option<u32>) {
    let mut current = title.to_string();
    let mut part = None;

    while let Some(caps) = QUALIFIER_SUFFIX.captures(&current) {
        let Some(whole) = caps.get(0) else { break };
        if whole.start() == 0 {
            // A title that is nothing but a qualifier keeps its text.
            break;
        }
        if part.is_none() {
            part = caps.get(1).and_then(|m| m.as_str().parse().ok());
        }
        current = tidy(&current[..whole.start()]);
    }

    (current, part)
}

fn split_season_suffix(title: &str) -> (String, Option<(u32, SuffixKind)>) {
    for (pattern, kind) in SEASON_PATTERNS.iter() {
        let Some(caps) = pattern.captures(title) else {
            continue;
        };
        let base = tidy(&caps[1]);
        match caps[2].parse::<u32>() {
            Ok(n) if !base.is_empty() => return (base, Some((n, *kind))),
            _ => {}
        }
    }
    (title.to_string(), None)
}
