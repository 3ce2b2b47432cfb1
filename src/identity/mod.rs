//! Title identity resolution
//!
//! - `catalog`: creates canonical titles and accumulates aliases
//! - `cache`: per-request index built from a caller snapshot
//! - `matcher`: resolves market outcome strings to cached titles

pub mod cache;
pub mod catalog;
pub mod matcher;


pub use cache::{CacheEntry, IdentityCache};
pub use catalog::{Resolution, TitleCatalog};
pub use matcher::{clean_outcome, match_outcome, OutcomeMatcher};
