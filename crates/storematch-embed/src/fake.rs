use std::hash::{Hash, Hasher};

use anyhow::Result;
use async_trait::async_trait;
use twox_hash::XxHash64;

use storematch_core::traits::Embedder;

/// Deterministic bag-of-tokens embedder. Same text, same vector; texts that
/// share tokens point in similar directions.
pub struct FakeEmbedder {
    dim: usize,
    id: String,
}

impl FakeEmbedder {
    pub fn new(dim: usize) -> Self {
        let dim = dim.max(1);
        Self { dim, id: format!("fake:xxhash:d{dim}") }
    }

    pub fn dim(&self) -> usize { self.dim }

    pub fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0f32; self.dim];
        for token in text.split_whitespace() {
            let mut hasher = XxHash64::with_seed(0);
            token.hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h as usize) % self.dim;
            v[idx] += 0.5 + ((h >> 32) as u32) as f32 / u32::MAX as f32;
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt().max(1e-6);
        for x in &mut v { *x /= norm; }
        v
    }
}

#[async_trait]
impl Embedder for FakeEmbedder {
    fn embedder_id(&self) -> &str { &self.id }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cosine(a: &[f32], b: &[f32]) -> f32 { a.iter().zip(b).map(|(x, y)| x * y).sum() }

    #[tokio::test]
    async fn shapes_and_determinism() {
        let embedder = FakeEmbedder::new(256);
        let texts = vec!["스타벅스 주소는 분당구 정자동".to_string(), "스타벅스 주소는 분당구 정자동".to_string()];
        let embs = embedder.embed_batch(&texts).await.expect("embed_batch");
        assert_eq!(embs[0].len(), 256);
        let norm = cosine(&embs[0], &embs[0]).sqrt();
        assert!((norm - 1.0).abs() <= 1e-3, "vector is L2-normalized (norm={norm})");
        for (a, b) in embs[0].iter().zip(embs[1].iter()) { assert!((a - b).abs() <= 1e-6); }
    }

    #[tokio::test]
    async fn shared_tokens_are_closer() {
        let e = FakeEmbedder::new(512);
        let q = e.embed("스타벅스 주소는 분당구 정자동").await.unwrap();
        let near = e.embed("스타벅스 주소는 분당구 서현동").await.unwrap();
        let far = e.embed("김밥천국 위치 중원구 성남동").await.unwrap();
        assert!(cosine(&q, &near) > cosine(&q, &far));
    }
}
