use async_trait::async_trait;

use crate::types::VectorHit;

/// Text → fixed-length vector, backed by an external model service.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Stable identifier for the provider/model (e.g. `openai:text-embedding-3-small`).
    fn embedder_id(&self) -> &str;
    async fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;

    async fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        let mut out = self.embed_batch(&[text.to_string()]).await?;
        if out.is_empty() { anyhow::bail!("embedder returned no vector"); }
        Ok(out.swap_remove(0))
    }
}

/// Nearest-neighbour lookup over registry description vectors.
///
/// Hits come back ordered by descending similarity.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    async fn query(&self, vector: &[f32], top_k: usize) -> anyhow::Result<Vec<VectorHit>>;

    /// True when the index is known to hold no vectors at all. Remote
    /// indexes cannot tell without a round trip and report `false`.
    fn is_empty(&self) -> bool { false }
}
