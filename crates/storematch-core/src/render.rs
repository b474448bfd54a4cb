//! Presentation of a [`Classification`] as JSON or as chat-style text.
//!
//! Scores are rounded to two decimals here and nowhere else.

use serde_json::{json, Map, Value};

use crate::classify::Classification;
use crate::types::MatchCandidate;

pub const FOUND_MESSAGE: &str = "가맹점을 찾았습니다.";
pub const NOT_FOUND_MESSAGE: &str = "성남시 아동수당 가맹점을 찾을 수 없습니다.";

const DEFINITIVE_HEADLINE: &str = "✅ 성남시 아동수당 가맹점입니다";
const NONE_TEXT: &str = "❌ 가맹점을 찾을 수 없습니다.\n\n성남시 아동수당 가맹점이 아니거나, 등록되지 않은 가게입니다.";
const AMBIGUOUS_FOOTER: &str = "목록에서 확인해보셔야 합니다.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Attach per-candidate `similarityScore` and an overall `score`.
    pub with_similarity: bool,
    /// Attach a singular `store` field to definitive results.
    pub attach_store_alias: bool,
}

impl RenderOptions {
    pub fn lexical(attach_store_alias: bool) -> Self { Self { with_similarity: false, attach_store_alias } }
    pub fn semantic() -> Self { Self { with_similarity: true, attach_store_alias: false } }
}

pub fn round2(x: f64) -> f64 { (x * 100.0).round() / 100.0 }

fn percent(x: f64) -> String { format!("{:.0}%", x * 100.0) }

fn candidate_json(c: &MatchCandidate, opts: RenderOptions) -> Value {
    let mut obj = Map::new();
    obj.insert("name".into(), json!(c.record.name));
    obj.insert("category".into(), json!(c.record.category));
    obj.insert("address".into(), json!(c.record.address));
    if opts.with_similarity {
        obj.insert("similarityScore".into(), json!(round2(c.normalized_score)));
    }
    Value::Object(obj)
}

pub fn render_json(result: &Classification, opts: RenderOptions) -> Value {
    let is_match = result.is_match();
    let mut obj = Map::new();
    obj.insert("success".into(), json!(true));
    obj.insert("isAffiliated".into(), json!(is_match));
    obj.insert("matchType".into(), json!(result.match_type()));
    obj.insert("message".into(), json!(if is_match { FOUND_MESSAGE } else { NOT_FOUND_MESSAGE }));
    obj.insert("count".into(), json!(result.total()));
    obj.insert(
        "candidates".into(),
        Value::Array(result.candidates().iter().map(|c| candidate_json(c, opts)).collect()),
    );
    if opts.with_similarity {
        obj.insert("score".into(), json!(result.best_score().map(round2)));
    }
    if opts.attach_store_alias {
        if let Classification::Definitive { candidate } = result {
            obj.insert("store".into(), candidate_json(candidate, opts));
        }
    }
    Value::Object(obj)
}

pub fn render_text(result: &Classification, opts: RenderOptions) -> String {
    match result {
        Classification::Definitive { candidate } => {
            let r = &candidate.record;
            let headline = if opts.with_similarity {
                format!("{DEFINITIVE_HEADLINE} (유사도: {})", percent(candidate.normalized_score))
            } else {
                DEFINITIVE_HEADLINE.to_string()
            };
            format!("{headline}\n\n⭐ {} ({})\n📍 {}", r.name, r.category, r.address)
        }
        Classification::Ambiguous { candidates, total } => {
            let mut out = format!("🤔 여러 가맹점이 검색되었습니다 ({total}곳)\n\n");
            for (i, c) in candidates.iter().enumerate() {
                let r = &c.record;
                out.push_str(&format!("{}. {} ({})\n   📍 {}", i + 1, r.name, r.category, r.address));
                if opts.with_similarity {
                    out.push_str(&format!(" (유사도: {})", percent(c.normalized_score)));
                }
                out.push('\n');
            }
            out.push('\n');
            out.push_str(AMBIGUOUS_FOOTER);
            out
        }
        Classification::None => NONE_TEXT.to_string(),
    }
}
