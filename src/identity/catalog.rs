//! Title catalog: creates identities and accumulates aliases
//!
//! The catalog is owned by the caller; persisting it is the caller's job.

use crate::canonical::canonicalize;
use crate::types::{CanonicalTitle, MediaKind, TitleRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

/// What `TitleCatalog::resolve` did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub title_id: String,
    pub created: bool,
    pub alias_added: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TitleCatalog {
    titles: Vec<CanonicalTitle>,
    by_key: HashMap<String, usize>,
}

impl TitleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted titles. Later duplicates of a title key fold
    /// their names into the first title's aliases.
    pub fn from_titles(titles: Vec<CanonicalTitle>) -> Self {
        let mut catalog = Self::new();
        for title in titles {
            match catalog.by_key.get(&title.title_key).copied() {
                Some(idx) => {
                    let existing = &mut catalog.titles[idx];
                    let names = std::iter::once(title.canonical_name).chain(title.aliases);
                    for name in names {
                        if name != existing.canonical_name {
                            existing.aliases.insert(name);
                        }
                    }
                }
                None => {
                    catalog.by_key.insert(title.title_key.clone(), catalog.titles.len());
                    catalog.titles.push(title);
                }
            }
        }
        catalog
    }

    /// Find or create the identity for `raw`, recording it as an alias when
    /// its text differs from every name already known.
    pub fn resolve(&mut self, raw: &str, kind: MediaKind) -> Resolution {
        let normalized = canonicalize(raw, kind);
        let raw = raw.trim();

        if let Some(&idx) = self.by_key.get(&normalized.title_key) {
            let title = &mut self.titles[idx];
            let alias_added =
                !raw.is_empty() && raw != title.canonical_name && title.aliases.insert(raw.to_string());
            if alias_added {
                tracing::debug!(title_id = %title.id, alias = raw, "Recorded new alias");
            }
            return Resolution {
                title_id: title.id.clone(),
                created: false,
                alias_added,
            };
        }

        let mut aliases = BTreeSet::new();
        if !raw.is_empty() && raw != normalized.canonical {
            aliases.insert(raw.to_string());
        }

        let title = CanonicalTitle {
            id: Uuid::new_v4().to_string(),
            canonical_name: normalized.canonical,
            media_kind: kind,
            aliases,
            title_key: normalized.title_key,
        };
        tracing::debug!(title_id = %title.id, name = %title.canonical_name, "Created canonical title");

        let resolution = Resolution {
            title_id: title.id.clone(),
            created: true,
            alias_added: !title.aliases.is_empty(),
        };
        self.by_key.insert(title.title_key.clone(), self.titles.len());
        self.titles.push(title);
        resolution
    }

    pub fn get(&self, id: &str) -> Option<&CanonicalTitle> {
        self.titles.iter().find(|t| t.id == id)
    }

    pub fn titles(&self) -> &[CanonicalTitle] {
        &self.titles
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Snapshot in insertion order, ready for the matcher.
    pub fn records(&self) -> Vec<TitleRecord> {
        self.titles.iter().map(TitleRecord::from).collect()
    }
}
