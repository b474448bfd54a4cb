//! storematch-text
//!
//! Lexical matching: per-field fuzzy indexes over the registry, the
//! district post-filter, and the AND/OR combinator.
pub mod combine;
pub mod fuzzy;
pub mod strategy;

pub use combine::combine;
pub use fuzzy::{FuzzyIndex, FuzzyKey};
pub use strategy::{filter_by_district, LexicalMatches, LexicalStrategy};
