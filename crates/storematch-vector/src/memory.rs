use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use storematch_core::registry::Registry;
use storematch_core::traits::VectorIndex;
use storematch_core::types::VectorHit;

/// Brute-force cosine search over the registry's stored embeddings.
///
/// Records without an embedding, or with one of a different length than the
/// query, are skipped.
pub struct InMemoryVectorIndex {
    registry: Arc<Registry>,
}

impl InMemoryVectorIndex {
    pub fn new(registry: Arc<Registry>) -> Self { Self { registry } }
}

pub fn cosine(a: &[f32], b: &[f32]) -> f64 {
    let (mut dot, mut na, mut nb) = (0f64, 0f64, 0f64);
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    if na == 0.0 || nb == 0.0 { return 0.0; }
    dot / (na.sqrt() * nb.sqrt())
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<VectorHit>> {
        let mut hits: Vec<VectorHit> = self
            .registry
            .records()
            .iter()
            .filter_map(|r| {
                let e = r.embedding.as_deref()?;
                if e.len() != vector.len() { return None; }
                let mut record = r.clone();
                record.embedding = None;
                Some(VectorHit { id: r.id.clone(), score: cosine(vector, e), record })
            })
            .collect();
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(top_k);
        Ok(hits)
    }

    fn is_empty(&self) -> bool { self.registry.embedded_count() == 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storematch_core::types::MerchantRecord;

    fn record(id: &str, e: Option<Vec<f32>>) -> MerchantRecord {
        let mut r = MerchantRecord::new(id, format!("가게{id}"), "카페", "분당구");
        r.embedding = e;
        r
    }

    #[tokio::test]
    async fn returns_top_k_by_cosine() {
        let registry = Arc::new(
            Registry::from_records(vec![
                record("a", Some(vec![1.0, 0.0])),
                record("b", Some(vec![0.6, 0.8])),
                record("c", None),
                record("d", Some(vec![0.0, 1.0, 0.0])),
                record("e", Some(vec![0.0, 1.0])),
            ])
            .unwrap(),
        );
        let index = InMemoryVectorIndex::new(registry);
        let hits = index.query(&[1.0, 0.0], 2).await.unwrap();
        let ids: Vec<&str> = hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!((hits[0].score - 1.0).abs() < 1e-9);
        assert!((hits[1].score - 0.6).abs() < 1e-6);
        assert!(hits[0].record.embedding.is_none());
    }

    #[test]
    fn empty_until_some_record_is_embedded() {
        let bare = Registry::from_records(vec![record("a", None)]).unwrap();
        assert!(InMemoryVectorIndex::new(Arc::new(bare)).is_empty());
        assert!(InMemoryVectorIndex::new(Arc::new(Registry::default())).is_empty());
        let filled = Registry::from_records(vec![record("a", None), record("b", Some(vec![1.0]))]).unwrap();
        assert!(!InMemoryVectorIndex::new(Arc::new(filled)).is_empty());
    }

    #[test]
    fn zero_vector_has_zero_similarity() {
        assert_eq!(cosine(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }
}
