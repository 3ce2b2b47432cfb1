//! Per-request index of known titles
//!
//! Built from a caller snapshot and dropped after use. Entry order follows
//! the snapshot, which makes first-match tie breaking deterministic.

use crate::canonical::{canonicalize, matching_key};
use crate::types::{MediaKind, TitleRecord};

/// One known title and every key it answers to
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub id: String,
    pub canonical_name: String,
    /// Matching keys, canonical name first, then aliases, without duplicates
    pub keys: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct IdentityCache {
    entries: Vec<CacheEntry>,
}

impl IdentityCache {
    pub fn from_snapshot(snapshot: &[TitleRecord]) -> Self {
        let entries = snapshot.iter().map(Self::build_entry).collect();
        Self { entries }
    }

    fn build_entry(record: &TitleRecord) -> CacheEntry {
        let mut keys: Vec<String> = Vec::with_capacity(2 + record.aliases.len() * 2);
        let names = std::iter::once(&record.canonical_name).chain(record.aliases.iter());

        for name in names {
            // Raw and canonicalized forms both count, so "Rocky II" in the
            // snapshot still meets a canonicalized "Rocky 2" outcome.
            let raw = matching_key(name);
            let canonical = matching_key(&canonicalize(name, MediaKind::Show).canonical);
            for key in [raw, canonical] {
                if !key.is_empty() && !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }

        CacheEntry {
            id: record.id.clone(),
            canonical_name: record.canonical_name.clone(),
            keys,
        }
    }

    pub fn entries(&self) -> &[CacheEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry holding `key`, in snapshot order.
    pub fn find_exact(&self, key: &str) -> Option<&CacheEntry> {
        if key.is_empty() {
            return None;
        }
        self.entries.iter().find(|e| e.keys.iter().any(|k| k == key))
    }
}
