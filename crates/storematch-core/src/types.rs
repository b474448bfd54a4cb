//! Domain types shared by the lexical and semantic engines.

use serde::{Deserialize, Serialize};

pub type StoreId = String;

/// One affiliated merchant in the registry.
///
/// - `id`: identity key used for dedup and intersection, never compared
///   structurally
/// - `name`/`category`/`address`: the fields surfaced to callers
/// - `embedding`: description vector, present only once the registry has
///   been backfilled for the semantic engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantRecord {
    #[serde(default)]
    pub id: StoreId,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

impl MerchantRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: impl Into<String>, address: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), category: category.into(), address: address.into(), embedding: None }
    }

    pub fn same_identity(&self, other: &MerchantRecord) -> bool { self.id == other.id }
}

/// Name/address pair pulled out of pasted text. Empty means "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedInput {
    pub name: String,
    pub address: String,
}

impl ParsedInput {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self { name: name.into().trim().to_string(), address: address.into().trim().to_string() }
    }

    pub fn has_name(&self) -> bool { !self.name.is_empty() }
    pub fn has_address(&self) -> bool { !self.address.is_empty() }
    pub fn is_empty(&self) -> bool { !self.has_name() && !self.has_address() }
}

/// Administrative sub-districts recognised inside addresses, in lookup priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum District {
    Sujeong,
    Jungwon,
    Bundang,
}

impl District {
    pub const ALL: [District; 3] = [District::Sujeong, District::Jungwon, District::Bundang];

    pub fn as_str(self) -> &'static str {
        match self {
            District::Sujeong => "수정구",
            District::Jungwon => "중원구",
            District::Bundang => "분당구",
        }
    }
}

impl std::fmt::Display for District {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

/// A registry record produced by one of the match strategies.
///
/// `raw_score` is engine-specific: fuzzy distance for the lexical engine
/// (0 = exact, lower is better), similarity for the semantic engine
/// (1 = identical, higher is better). `normalized_score` is always
/// higher-is-better.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate {
    pub record: MerchantRecord,
    pub raw_score: f64,
    pub normalized_score: f64,
}

impl MatchCandidate {
    pub fn from_distance(record: MerchantRecord, distance: f64) -> Self {
        Self { record, raw_score: distance, normalized_score: (1.0 - distance).clamp(0.0, 1.0) }
    }

    pub fn from_similarity(record: MerchantRecord, similarity: f64) -> Self {
        Self { record, raw_score: similarity, normalized_score: similarity }
    }

    pub fn id(&self) -> &str { &self.record.id }
}

/// Outcome category of a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Definitive,
    Ambiguous,
    None,
}

impl MatchType {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchType::Definitive => "definitive",
            MatchType::Ambiguous => "ambiguous",
            MatchType::None => "none",
        }
    }
}

/// How wide the semantic engine casts its net.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Strict,
    Wide,
}

impl std::str::FromStr for SearchMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(SearchMode::Strict),
            "wide" => Ok(SearchMode::Wide),
            other => Err(format!("unknown search mode '{other}' (expected strict|wide)")),
        }
    }
}

/// Nearest-neighbour hit returned by a vector index.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorHit {
    pub id: StoreId,
    pub score: f64,
    pub record: MerchantRecord,
}
