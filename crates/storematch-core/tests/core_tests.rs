use std::fs;

use tempfile::TempDir;

use storematch_core::error::Error;
use storematch_core::registry::Registry;
use storematch_core::types::MerchantRecord;

#[test]
fn load_json_assigns_missing_ids() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("stores.json");
    fs::write(
        &path,
        r#"[
            {"name": "스타벅스", "category": "카페", "address": "분당구 정자동 123"},
            {"id": "s-9", "name": "김밥천국", "category": "분식", "address": "수정구 수진동 45"}
        ]"#,
    )
    .unwrap();

    let registry = Registry::load_json(&path).expect("load");
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.records()[0].id, "0");
    assert_eq!(registry.get("s-9").map(|r| r.name.as_str()), Some("김밥천국"));
    assert_eq!(registry.embedded_count(), 0);
}

#[test]
fn duplicate_ids_are_rejected() {
    let records = vec![
        MerchantRecord::new("a", "스타벅스", "카페", "분당구"),
        MerchantRecord::new("a", "스타벅스", "카페", "분당구"),
    ];
    assert!(matches!(Registry::from_records(records), Err(Error::InvalidConfig(_))));
}

#[test]
fn missing_file_is_not_found() {
    let tmp = TempDir::new().unwrap();
    assert!(matches!(Registry::load_json(&tmp.path().join("nope.json")), Err(Error::NotFound(_))));
}

#[test]
fn save_then_load_keeps_embeddings() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("out/stores.json");
    let mut record = MerchantRecord::new("1", "스타벅스", "카페", "분당구 정자동 123");
    record.embedding = Some(vec![0.6, 0.8]);
    Registry::from_records(vec![record]).unwrap().save_json(&path).expect("save");

    let loaded = Registry::load_json(&path).expect("reload");
    assert_eq!(loaded.embedded_count(), 1);
    assert_eq!(loaded.records()[0].embedding.as_deref(), Some(&[0.6f32, 0.8][..]));
}
