use std::sync::Arc;

use storematch_core::registry::Registry;
use storematch_core::types::{MatchCandidate, MerchantRecord};

/// Float slack when comparing a score against its threshold.
const EPSILON: f64 = 1e-9;

/// Which record field a [`FuzzyIndex`] is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuzzyKey {
    Name,
    Address,
}

impl FuzzyKey {
    fn field(self, record: &MerchantRecord) -> &str {
        match self {
            FuzzyKey::Name => &record.name,
            FuzzyKey::Address => &record.address,
        }
    }
}

/// Approximate-substring index over one field of the registry.
///
/// Scores are distances: 0 is an exact match, lower is better. A record is
/// returned when its score is at or under `threshold`. Built once; queries
/// only read, so one index can serve any number of concurrent requests.
pub struct FuzzyIndex {
    registry: Arc<Registry>,
    key: FuzzyKey,
    keys: Vec<Vec<char>>,
    threshold: f64,
    distance: usize,
}

impl FuzzyIndex {
    pub fn new(registry: Arc<Registry>, key: FuzzyKey, threshold: f64, distance: usize) -> Self {
        let keys = registry.records().iter().map(|r| normalize(key.field(r))).collect();
        Self { registry, key, keys, threshold, distance: distance.max(1) }
    }

    pub fn key(&self) -> FuzzyKey { self.key }
    pub fn threshold(&self) -> f64 { self.threshold }

    /// All records within the threshold, best first. Ties keep registry order.
    pub fn search(&self, query: &str) -> Vec<MatchCandidate> {
        let pattern = normalize(query);
        if pattern.is_empty() { return Vec::new(); }
        let mut scored: Vec<(&MerchantRecord, f64)> = self
            .keys
            .iter()
            .zip(self.registry.records())
            .filter_map(|(text, record)| score(&pattern, text, self.threshold, self.distance).map(|s| (record, s)))
            .collect();
        scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.into_iter().map(|(record, s)| MatchCandidate::from_distance(record.clone(), s)).collect()
    }
}

fn normalize(s: &str) -> Vec<char> { s.trim().to_lowercase().chars().collect() }

/// Best `errors / pattern_len + start / distance` over every window of `text`
/// that could stay within `threshold`, or `None` when no window does.
pub fn score(pattern: &[char], text: &[char], threshold: f64, distance: usize) -> Option<f64> {
    let m = pattern.len();
    if m == 0 { return None; }
    if pattern == text { return Some(0.0); }
    let max_errors = (threshold * m as f64 + EPSILON).floor() as usize;
    let min_len = m.saturating_sub(max_errors).max(1);
    let max_len = m + max_errors;
    let n = text.len();

    let pattern = pattern.to_vec();
    let mut window: Vec<char> = Vec::with_capacity(max_len);
    let mut best: Option<f64> = None;
    for start in 0..n {
        let proximity = start as f64 / distance as f64;
        if proximity > threshold + EPSILON { break; }
        if let Some(b) = best { if proximity >= b { break; } }
        for len in min_len..=max_len.min(n - start) {
            window.clear();
            window.extend_from_slice(&text[start..start + len]);
            let errors = strsim::generic_levenshtein(&pattern, &window);
            if errors > max_errors { continue; }
            let s = errors as f64 / m as f64 + proximity;
            if s <= threshold + EPSILON && best.map_or(true, |b| s < b) { best = Some(s); }
        }
    }
    best
}
