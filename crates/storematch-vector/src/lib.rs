//! storematch-vector
//!
//! Vector-index providers, the semantic match strategy, and the registry
//! embedding backfill that feeds the in-memory index.
use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::info;

use storematch_core::config::{VectorProviderKind, VectorSettings};
use storematch_core::registry::Registry;
use storematch_core::traits::VectorIndex;

pub mod backfill;
pub mod cache;
pub mod memory;
pub mod semantic;
pub mod upstash;

pub use memory::InMemoryVectorIndex;
pub use semantic::{describe, SemanticStrategy};
pub use upstash::UpstashIndex;

pub fn get_default_index(settings: &VectorSettings, registry: Arc<Registry>) -> Result<Arc<dyn VectorIndex>> {
    match settings.provider {
        VectorProviderKind::Memory => {
            info!(embedded = registry.embedded_count(), total = registry.len(), "using in-memory vector index");
            Ok(Arc::new(InMemoryVectorIndex::new(registry)))
        }
        VectorProviderKind::Upstash => {
            let url = settings
                .url
                .clone()
                .or_else(|| std::env::var("UPSTASH_VECTOR_REST_URL").ok())
                .ok_or_else(|| anyhow!("vector.url (or UPSTASH_VECTOR_REST_URL) is not set"))?;
            let token = settings
                .token
                .clone()
                .or_else(|| std::env::var("UPSTASH_VECTOR_REST_TOKEN").ok())
                .ok_or_else(|| anyhow!("vector.token (or UPSTASH_VECTOR_REST_TOKEN) is not set"))?;
            info!(%url, "using Upstash vector index");
            Ok(Arc::new(UpstashIndex::new(&url, token)?))
        }
    }
}
