use std::sync::Arc;

use storematch_core::classify::classify;
use storematch_core::config::{LexicalProfile, LexicalSettings};
use storematch_core::extract::extract_fields;
use storematch_core::registry::Registry;
use storematch_core::types::{MatchType, MerchantRecord, ParsedInput};
use storematch_text::{FuzzyIndex, FuzzyKey, LexicalStrategy};

const GREEN_FACTORY: &str = "정자일로 95 네이버 그린팩토리 1층";

fn registry() -> Arc<Registry> {
    Arc::new(
        Registry::from_records(vec![
            MerchantRecord::new("1", "스타벅스", "카페", "경기 성남시 분당구 정자동 123"),
            MerchantRecord::new("2", "이디야커피", "카페", "분당구 서현동 77"),
            MerchantRecord::new("3", "스타벅스", "카페", "수정구 신흥동 5"),
            MerchantRecord::new("4", "스타벅스 그린팩토리점", "카페", format!("경기 성남시 분당구 {GREEN_FACTORY}")),
            MerchantRecord::new("5", "스타벅스 수진점", "카페", format!("수정구 {GREEN_FACTORY}")),
            MerchantRecord::new("6", "김밥천국", "분식", "중원구 성남동 10"),
        ])
        .expect("registry"),
    )
}

fn strategy() -> LexicalStrategy { LexicalStrategy::new(registry(), &LexicalSettings::default()) }

#[test]
fn name_and_address_in_matching_district_is_definitive() {
    let input = extract_fields("스타벅스\n분당구 정자동 123");
    let result = classify(strategy().resolve(&input));
    assert_eq!(result.match_type(), MatchType::Definitive);
    assert_eq!(result.candidates()[0].id(), "1");
}

#[test]
fn district_mismatch_filters_everything_out() {
    let input = extract_fields(&format!("스타벅스\n수정구 {GREEN_FACTORY}"));
    let registry = Arc::new(
        Registry::from_records(vec![MerchantRecord::new("4", "스타벅스", "카페", format!("분당구 {GREEN_FACTORY}"))]).expect("registry"),
    );
    // textually close enough to pass the address threshold on its own
    assert_eq!(FuzzyIndex::new(registry.clone(), FuzzyKey::Address, 0.1, 100).search(&input.address).len(), 1);

    let strategy = LexicalStrategy::new(registry, &LexicalSettings::default());
    let matches = strategy.search(&input);
    assert_eq!(matches.name_matches.len(), 1);
    assert!(matches.address_matches.is_empty());
    assert_eq!(classify(strategy.resolve(&input)).match_type(), MatchType::None);
}

#[test]
fn same_name_in_two_districts_resolves_by_district() {
    let input = ParsedInput::new("스타벅스", format!("분당구 {GREEN_FACTORY}"));
    let strategy = strategy();
    let matches = strategy.search(&input);
    assert!(matches.name_matches.iter().any(|c| c.id() == "5"));
    assert!(matches.address_matches.iter().all(|c| c.id() != "5"));

    let result = classify(strategy.resolve(&input));
    assert_eq!(result.match_type(), MatchType::Definitive);
    assert_eq!(result.candidates()[0].id(), "4");
}

#[test]
fn name_only_result_equals_name_matches() {
    let strategy = strategy();
    for name in ["스타벅스", "김밥천국", "없는가게"] {
        let input = ParsedInput::new(name, "");
        let matches = strategy.search(&input);
        assert!(matches.address_matches.is_empty());
        assert_eq!(strategy.resolve(&input), matches.name_matches);
    }
    let result = classify(strategy.resolve(&ParsedInput::new("스타벅스", "")));
    assert_eq!(result.match_type(), MatchType::Ambiguous);
    assert_eq!(result.total(), 4);
}

#[test]
fn address_only_uses_address_matches() {
    let input = extract_fields("[카카오맵]\n\n경기 성남시 중원구 성남동 10");
    assert!(!input.has_name());
    let result = classify(strategy().resolve(&input));
    assert_eq!(result.match_type(), MatchType::Definitive);
    assert_eq!(result.candidates()[0].record.name, "김밥천국");
}

#[test]
fn lenient_profile_accepts_looser_names() {
    let input = ParsedInput::new("김빱천국", "");
    assert!(strategy().resolve(&input).is_empty());
    let lenient = LexicalSettings { profile: LexicalProfile::Lenient, ..LexicalSettings::default() };
    let hits = LexicalStrategy::new(registry(), &lenient).resolve(&input);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id(), "6");
}
