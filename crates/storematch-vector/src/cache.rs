//! Embedding cache keyed by `(embedder_id, content_hash)`.
//!
//! Consulted before calling a provider and written through on misses, so
//! repeated descriptions are embedded once per backfill.
use std::collections::HashMap;
use std::hash::Hasher;

use twox_hash::XxHash64;

pub fn content_hash(embedder_id: &str, text: &str) -> u64 {
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(embedder_id.as_bytes());
    hasher.write_u8(0);
    hasher.write(text.as_bytes());
    hasher.finish()
}

#[derive(Debug, Default)]
pub struct EmbeddingCache {
    entries: HashMap<u64, Vec<f32>>,
    hits: usize,
}

impl EmbeddingCache {
    pub fn new() -> Self { Self::default() }

    pub fn get(&mut self, embedder_id: &str, text: &str) -> Option<Vec<f32>> {
        let v = self.entries.get(&content_hash(embedder_id, text)).cloned();
        if v.is_some() { self.hits += 1; }
        v
    }

    pub fn put(&mut self, embedder_id: &str, text: &str, vector: Vec<f32>) {
        self.entries.insert(content_hash(embedder_id, text), vector);
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn hits(&self) -> usize { self.hits }
}
