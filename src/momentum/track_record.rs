//! Creator track-record lookup
//!
//! A static heuristic: creators whose releases reliably chart get a fixed
//! boost. It is not derived from measured signals and is reported on its own
//! line of the momentum breakdown.

use crate::canonical::{canonicalize, matching_key};
use crate::types::MediaKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy)]
pub struct CreatorRecord {
    pub creator: &'static str,
    /// Score points added when the creator matches
    pub boost: f64,
    /// Known works, matched on whole canonical names
    pub works: &'static [&'static str],
}

pub const CREATOR_RECORDS: &[CreatorRecord] = &[
    CreatorRecord {
        creator: "Harlan Coben",
        boost: 12.0,
        works: &[
            "Fool Me Once",
            "Missing You",
            "Stay Close",
            "The Stranger",
            "Run Away",
            "Safe",
            "Caught",
            "I Will Find You",
            "Shelter",
        ],
    },
    CreatorRecord {
        creator: "The Duffer Brothers",
        boost: 12.0,
        works: &["Stranger Things", "The Boroughs"],
    },
    CreatorRecord {
        creator: "Shonda Rhimes",
        boost: 10.0,
        works: &["Bridgerton", "Inventing Anna", "Queen Charlotte", "The Residence"],
    },
    CreatorRecord {
        creator: "Mike Flanagan",
        boost: 8.0,
        works: &[
            "The Haunting of Hill House",
            "The Haunting of Bly Manor",
            "Midnight Mass",
            "The Midnight Club",
            "The Fall of the House of Usher",
        ],
    },
    CreatorRecord {
        creator: "Ryan Murphy",
        boost: 8.0,
        works: &["Monster", "Dahmer", "The Watcher", "Ratched", "Hollywood", "The Politician"],
    },
    CreatorRecord {
        creator: "Tyler Perry",
        boost: 7.0,
        works: &["Sistas", "Ruthless", "A Fall from Grace", "Mea Culpa", "The Six Triple Eight"],
    },
    CreatorRecord {
        creator: "Taylor Sheridan",
        boost: 6.0,
        works: &["Yellowstone", "1883", "1923", "Landman", "Tulsa King", "Lioness"],
    },
];

/// Boost applied to one title, for the breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRecordBoost {
    pub creator: String,
    /// Title or alias that triggered the match
    pub matched_name: String,
    /// Table value before capping
    pub table_boost: f64,
    /// Points actually added
    pub applied_boost: f64,
}

#[derive(Debug, Clone)]
pub struct TrackRecordTable {
    records: &'static [CreatorRecord],
    max_boost: f64,
}

impl TrackRecordTable {
    pub fn new(max_boost: f64) -> Self {
        Self::with_records(CREATOR_RECORDS, max_boost)
    }

    pub fn with_records(records: &'static [CreatorRecord], max_boost: f64) -> Self {
        Self { records, max_boost }
    }

    /// First creator, in table order, matching any of `names`.
    ///
    /// A creator matches when its name appears inside a title ("Harlan Coben's
    /// Shelter") or when a title is one of its known works.
    pub fn lookup<S: AsRef<str>>(&self, names: &[S]) -> Option<TrackRecordBoost> {
        let keyed: Vec<(&str, String, String)> = names
            .iter()
            .map(|n| {
                let name = n.as_ref();
                let raw = matching_key(name);
                let canonical = matching_key(&canonicalize(name, MediaKind::Show).canonical);
                (name, raw, canonical)
            })
            .filter(|(_, raw, _)| !raw.is_empty())
            .collect();

        for record in self.records {
            let creator_key = matching_key(record.creator);
            for (name, raw, canonical) in &keyed {
                let by_creator = raw.contains(&creator_key);
                let by_work = record.works.iter().any(|w| matching_key(w) == *canonical);
                if by_creator || by_work {
                    return Some(TrackRecordBoost {
                        creator: record.creator.to_string(),
                        matched_name: name.to_string(),
                        table_boost: record.boost,
                        applied_boost: record.boost.min(self.max_boost),
                    });
                }
            }
        }
        None
    }
}
