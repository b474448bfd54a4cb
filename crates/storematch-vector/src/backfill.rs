//! Registry embedding backfill for the in-memory vector index.
//!
//! Selection is presence-driven: records without an `embedding` (or all of
//! them with `force`). Each batch consults the cache, embeds the misses with
//! one provider call, and writes through.
use anyhow::{anyhow, bail, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use storematch_core::registry::Registry;
use storematch_core::traits::Embedder;
use storematch_core::types::ParsedInput;

use crate::cache::EmbeddingCache;
use crate::semantic::describe;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackfillStats {
    pub embedded: usize,
    pub cached: usize,
    pub skipped: usize,
}

pub fn record_sentence(name: &str, address: &str) -> String { describe(&ParsedInput::new(name, address)) }

fn progress_bar(len: usize, show: bool) -> ProgressBar {
    if !show { return ProgressBar::hidden(); }
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar().template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} stores ({percent}%) {msg}") {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

pub async fn backfill_registry(
    registry: &Registry,
    embedder: &dyn Embedder,
    batch_size: usize,
    force: bool,
    show_progress: bool,
) -> Result<(Registry, BackfillStats)> {
    let mut records = registry.records().to_vec();
    let todo: Vec<usize> = (0..records.len()).filter(|&i| force || records[i].embedding.is_none()).collect();
    let mut stats = BackfillStats { skipped: records.len() - todo.len(), ..BackfillStats::default() };
    let mut cache = EmbeddingCache::new();
    let mut dim: Option<usize> = None;
    let eid = embedder.embedder_id().to_string();

    let pb = progress_bar(todo.len(), show_progress);
    for chunk in todo.chunks(batch_size.max(1)) {
        let sentences: Vec<String> = chunk.iter().map(|&i| record_sentence(&records[i].name, &records[i].address)).collect();
        let mut misses: Vec<String> = Vec::new();
        for s in &sentences {
            if cache.get(&eid, s).is_none() && !misses.contains(s) { misses.push(s.clone()); }
        }
        if !misses.is_empty() {
            let vectors = embedder.embed_batch(&misses).await?;
            if vectors.len() != misses.len() { bail!("embedder returned {} vectors for {} inputs", vectors.len(), misses.len()); }
            for (s, v) in misses.iter().zip(vectors) {
                let expected = *dim.get_or_insert(v.len());
                if v.len() != expected { bail!("dim mismatch: got {} expected {}", v.len(), expected); }
                cache.put(&eid, s, v);
            }
            stats.embedded += misses.len();
        }
        for (&i, s) in chunk.iter().zip(&sentences) {
            let v = cache.get(&eid, s).ok_or_else(|| anyhow!("missing embedding for store '{}'", records[i].id))?;
            records[i].embedding = Some(v);
        }
        stats.cached += chunk.len() - chunk.iter().zip(&sentences).filter(|(_, s)| misses.contains(s)).count();
        pb.inc(chunk.len() as u64);
    }
    pb.finish_with_message("done");
    info!(embedder = %eid, embedded = stats.embedded, cached = stats.cached, skipped = stats.skipped, "backfill complete");
    Ok((Registry::from_records(records)?, stats))
}
