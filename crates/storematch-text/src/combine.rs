use std::collections::HashSet;

use storematch_core::types::MatchCandidate;

/// Merge per-field match sets.
///
/// With both fields supplied only records present in both sets survive
/// (AND), in `name_matches` order and carrying the name-side score.
/// Otherwise the sets are concatenated name-first and deduplicated by id,
/// first occurrence wins (OR).
pub fn combine(
    name_matches: Vec<MatchCandidate>,
    address_matches: Vec<MatchCandidate>,
    name_supplied: bool,
    address_supplied: bool,
) -> Vec<MatchCandidate> {
    if name_supplied && address_supplied {
        let address_ids: HashSet<&str> = address_matches.iter().map(|c| c.id()).collect();
        return name_matches.into_iter().filter(|c| address_ids.contains(c.id())).collect();
    }
    let mut seen = HashSet::new();
    name_matches
        .into_iter()
        .chain(address_matches)
        .filter(|c| seen.insert(c.id().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use storematch_core::types::MerchantRecord;

    fn c(id: &str, d: f64) -> MatchCandidate {
        MatchCandidate::from_distance(MerchantRecord::new(id, format!("가게{id}"), "카페", "분당구"), d)
    }

    fn ids(v: &[MatchCandidate]) -> Vec<&str> { v.iter().map(|c| c.id()).collect() }

    #[test]
    fn intersection_keeps_name_order_and_is_subset() {
        let name = vec![c("3", 0.0), c("1", 0.05), c("2", 0.1), c("5", 0.15)];
        let addr = vec![c("2", 0.0), c("9", 0.01), c("3", 0.02)];
        let merged = combine(name.clone(), addr.clone(), true, true);
        assert_eq!(ids(&merged), vec!["3", "2"]);
        assert_eq!(merged[1].raw_score, 0.1);
        for m in &merged {
            assert!(name.iter().any(|n| n.id() == m.id()));
            assert!(addr.iter().any(|a| a.id() == m.id()));
        }
    }

    #[test]
    fn intersection_with_empty_side_is_empty() {
        assert!(combine(vec![c("1", 0.0)], vec![], true, true).is_empty());
    }

    #[test]
    fn union_with_empty_set_is_identity() {
        let name = vec![c("4", 0.0), c("2", 0.1)];
        assert_eq!(combine(name.clone(), vec![], true, false), name);
    }

    #[test]
    fn union_dedups_first_occurrence_wins() {
        let merged = combine(vec![c("1", 0.0), c("2", 0.1)], vec![c("2", 0.0), c("3", 0.0)], false, false);
        assert_eq!(ids(&merged), vec!["1", "2", "3"]);
        assert_eq!(merged[1].raw_score, 0.1);
    }
}
