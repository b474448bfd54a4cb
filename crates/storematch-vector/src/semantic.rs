use std::sync::Arc;

use tracing::{debug, warn};

use storematch_core::config::SemanticSettings;
use storematch_core::error::ResolveError;
use storematch_core::traits::{Embedder, VectorIndex};
use storematch_core::types::{MatchCandidate, ParsedInput, SearchMode, VectorHit};

/// Sentence embedded for a query; the registry backfill uses the same shape.
pub fn describe(input: &ParsedInput) -> String {
    if input.has_name() {
        format!("{} 주소는 {}", input.name, input.address)
    } else {
        format!("\"\" 주소는 {}", input.address)
    }
}

/// Embedding + nearest-neighbour search with mode-dependent cut-offs.
pub struct SemanticStrategy {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
    settings: SemanticSettings,
}

impl SemanticStrategy {
    pub fn new(embedder: Arc<dyn Embedder>, index: Arc<dyn VectorIndex>, settings: SemanticSettings) -> Self {
        Self { embedder, index, settings }
    }

    /// The backing index has nothing to search.
    pub fn index_is_empty(&self) -> bool { self.index.is_empty() }

    pub fn top_k(&self, mode: SearchMode) -> usize {
        match mode {
            SearchMode::Strict => self.settings.strict_top_k,
            SearchMode::Wide => self.settings.wide_top_k,
        }
    }

    pub fn threshold(&self, mode: SearchMode) -> f64 {
        match mode {
            SearchMode::Strict => self.settings.strict_threshold,
            SearchMode::Wide => self.settings.wide_threshold,
        }
    }

    /// Turn index hits into candidates, damping every score when the query
    /// carried no store name. Index order is kept.
    pub fn score_hits(&self, hits: Vec<VectorHit>, name_supplied: bool) -> Vec<MatchCandidate> {
        let factor = if name_supplied { 1.0 } else { self.settings.damping };
        hits.into_iter().map(|h| MatchCandidate::from_similarity(h.record, h.score * factor)).collect()
    }

    /// Ranked candidates at or above the mode's threshold.
    pub async fn search(&self, input: &ParsedInput, mode: SearchMode) -> Result<Vec<MatchCandidate>, ResolveError> {
        let sentence = describe(input);
        let vector = self.embedder.embed(&sentence).await.map_err(|e| {
            warn!(error = %e, embedder = self.embedder.embedder_id(), "embedding failed");
            ResolveError::EmbeddingUnavailable(e.to_string())
        })?;
        let top_k = self.top_k(mode);
        let hits = self.index.query(&vector, top_k).await.map_err(|e| {
            warn!(error = %e, "vector query failed");
            ResolveError::VectorIndexUnavailable(e.to_string())
        })?;
        let threshold = self.threshold(mode);
        let scored = self.score_hits(hits, input.has_name());
        let returned = scored.len();
        let kept: Vec<MatchCandidate> = scored.into_iter().filter(|c| c.raw_score >= threshold).collect();
        debug!(?mode, top_k, threshold, returned, kept = kept.len(), "semantic search");
        Ok(kept)
    }
}
