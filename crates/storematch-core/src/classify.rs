//! Definitive / ambiguous / none classification of a ranked match set.

use crate::types::{MatchCandidate, MatchType};

/// Maximum number of candidates kept in an ambiguous result.
pub const PREVIEW_LIMIT: usize = 5;

/// Classification of a ranked candidate list. Each variant carries only the
/// fields valid for it.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Definitive { candidate: MatchCandidate },
    /// `candidates` holds at most [`PREVIEW_LIMIT`] entries; `total` is the
    /// size of the untruncated match set.
    Ambiguous { candidates: Vec<MatchCandidate>, total: usize },
    None,
}

impl Classification {
    pub fn match_type(&self) -> MatchType {
        match self {
            Classification::Definitive { .. } => MatchType::Definitive,
            Classification::Ambiguous { .. } => MatchType::Ambiguous,
            Classification::None => MatchType::None,
        }
    }

    pub fn candidates(&self) -> &[MatchCandidate] {
        match self {
            Classification::Definitive { candidate } => std::slice::from_ref(candidate),
            Classification::Ambiguous { candidates, .. } => candidates,
            Classification::None => &[],
        }
    }

    pub fn total(&self) -> usize {
        match self {
            Classification::Definitive { .. } => 1,
            Classification::Ambiguous { total, .. } => *total,
            Classification::None => 0,
        }
    }

    /// Normalized score of the top-ranked candidate.
    pub fn best_score(&self) -> Option<f64> { self.candidates().first().map(|c| c.normalized_score) }

    pub fn is_match(&self) -> bool { !matches!(self, Classification::None) }
}

/// Classify by list length alone. Truncation happens after the decision.
pub fn classify(mut candidates: Vec<MatchCandidate>) -> Classification {
    match candidates.len() {
        0 => Classification::None,
        1 => Classification::Definitive { candidate: candidates.swap_remove(0) },
        total => {
            candidates.truncate(PREVIEW_LIMIT);
            Classification::Ambiguous { candidates, total }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MerchantRecord;

    fn candidates(n: usize) -> Vec<MatchCandidate> {
        (0..n)
            .map(|i| MatchCandidate::from_similarity(MerchantRecord::new(i.to_string(), format!("가게{i}"), "음식점", "분당구"), 0.9 - i as f64 * 0.01))
            .collect()
    }

    #[test]
    fn invariant_holds_for_all_lengths() {
        for n in 0..12 {
            let c = classify(candidates(n));
            match n {
                0 => assert_eq!(c.match_type(), MatchType::None),
                1 => assert_eq!(c.match_type(), MatchType::Definitive),
                _ => assert_eq!(c.match_type(), MatchType::Ambiguous),
            }
            assert_eq!(c.total(), n);
            assert_eq!(c.candidates().len(), n.min(PREVIEW_LIMIT));
        }
    }

    #[test]
    fn ambiguous_truncation_keeps_rank_order() {
        let c = classify(candidates(8));
        let ids: Vec<&str> = c.candidates().iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["0", "1", "2", "3", "4"]);
        assert_eq!(c.best_score(), Some(0.9));
    }

    #[test]
    fn none_has_no_best_score() {
        assert_eq!(classify(vec![]).best_score(), None);
    }
}
