use std::sync::Arc;

use tracing::debug;

use storematch_core::config::LexicalSettings;
use storematch_core::registry::Registry;
use storematch_core::types::{District, MatchCandidate, ParsedInput};

use crate::combine::combine;
use crate::fuzzy::{FuzzyIndex, FuzzyKey};

/// Independent per-field match sets. A facet that was not supplied stays empty.
#[derive(Debug, Clone, Default)]
pub struct LexicalMatches {
    pub name_matches: Vec<MatchCandidate>,
    pub address_matches: Vec<MatchCandidate>,
}

/// Fuzzy search by name and by address, each against its own index.
pub struct LexicalStrategy {
    name_index: FuzzyIndex,
    address_index: FuzzyIndex,
}

impl LexicalStrategy {
    pub fn new(registry: Arc<Registry>, settings: &LexicalSettings) -> Self {
        let name_index = FuzzyIndex::new(registry.clone(), FuzzyKey::Name, settings.name_threshold(), settings.distance);
        let address_index = FuzzyIndex::new(registry, FuzzyKey::Address, settings.address_threshold(), settings.distance);
        Self { name_index, address_index }
    }

    pub fn search(&self, input: &ParsedInput) -> LexicalMatches {
        let name_matches = if input.has_name() { self.name_index.search(&input.name) } else { Vec::new() };
        let mut address_matches = Vec::new();
        if input.has_address() {
            address_matches = self.address_index.search(&input.address);
            if let Some(district) = District::extract(&input.address) {
                let before = address_matches.len();
                address_matches = filter_by_district(address_matches, district);
                debug!(%district, before, after = address_matches.len(), "district post-filter");
            }
        }
        debug!(names = name_matches.len(), addresses = address_matches.len(), "lexical search");
        LexicalMatches { name_matches, address_matches }
    }

    /// Search both facets and merge them with the AND/OR policy.
    pub fn resolve(&self, input: &ParsedInput) -> Vec<MatchCandidate> {
        let LexicalMatches { name_matches, address_matches } = self.search(input);
        combine(name_matches, address_matches, input.has_name(), input.has_address())
    }
}

/// Keep only candidates whose own address names exactly `district`.
pub fn filter_by_district(matches: Vec<MatchCandidate>, district: District) -> Vec<MatchCandidate> {
    matches.into_iter().filter(|c| District::extract(&c.record.address) == Some(district)).collect()
}
