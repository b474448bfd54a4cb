use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use storematch_core::types::SearchMode;

/// Body accepted by both entry points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    #[serde(default)]
    pub content: Option<String>,
    /// `"text"` selects the chat-style rendering; anything else is JSON.
    #[serde(default, rename = "type")]
    pub response_type: Option<String>,
    /// `"wide"` widens the semantic search; anything else is strict.
    #[serde(default)]
    pub search_mode: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    #[default]
    Json,
    Text,
}

impl std::str::FromStr for ResponseFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ResponseFormat::Json),
            "text" => Ok(ResponseFormat::Text),
            other => Err(format!("unknown response type '{other}' (expected text|json)")),
        }
    }
}

impl ResolveRequest {
    pub fn new(content: impl Into<String>) -> Self { Self { content: Some(content.into()), ..Self::default() } }

    pub fn with_format(mut self, format: ResponseFormat) -> Self {
        self.response_type = Some(match format { ResponseFormat::Json => "json", ResponseFormat::Text => "text" }.to_string());
        self
    }

    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.search_mode = Some(match mode { SearchMode::Strict => "strict", SearchMode::Wide => "wide" }.to_string());
        self
    }

    pub fn format(&self) -> ResponseFormat {
        match self.response_type.as_deref() {
            Some(t) if t.eq_ignore_ascii_case("text") => ResponseFormat::Text,
            _ => ResponseFormat::Json,
        }
    }

    pub fn mode(&self) -> SearchMode {
        match self.search_mode.as_deref() {
            Some(m) if m.eq_ignore_ascii_case("wide") => SearchMode::Wide,
            _ => SearchMode::Strict,
        }
    }

    /// Content if it holds anything besides whitespace.
    pub fn content(&self) -> Option<&str> { self.content.as_deref().filter(|c| !c.trim().is_empty()) }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Json(Value),
    Text(String),
}

/// What the transport layer receives. Status codes are its business.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Resolved(Response),
    ClientError(String),
    ConfigError(String),
    InternalError,
}

pub const INTERNAL_ERROR_MESSAGE: &str = "API 처리 중 오류가 발생했습니다.";

impl Outcome {
    pub fn is_resolved(&self) -> bool { matches!(self, Outcome::Resolved(_)) }

    /// `{ success: false, message }` for the error variants.
    pub fn error_body(&self) -> Option<Value> {
        let message = match self {
            Outcome::Resolved(_) => return None,
            Outcome::ClientError(m) | Outcome::ConfigError(m) => m.as_str(),
            Outcome::InternalError => INTERNAL_ERROR_MESSAGE,
        };
        Some(json!({ "success": false, "message": message }))
    }
}
