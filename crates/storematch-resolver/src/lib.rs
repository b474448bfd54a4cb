//! storematch-resolver
//!
//! The two resolution pipelines behind one facade: extract fields, run the
//! lexical or semantic strategy, classify, render. Failures are folded into
//! an [`Outcome`] at this boundary.
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{debug, error, warn};

use storematch_core::classify::{classify, Classification};
use storematch_core::config::Settings;
use storematch_core::error::{ErrorKind, ResolveError};
use storematch_core::extract::extract_fields;
use storematch_core::registry::Registry;
use storematch_core::render::{render_json, render_text, RenderOptions};
use storematch_core::traits::{Embedder, VectorIndex};
use storematch_core::types::{ParsedInput, SearchMode};
use storematch_text::LexicalStrategy;
use storematch_vector::SemanticStrategy;

pub mod request;

pub use request::{Outcome, ResolveRequest, Response, ResponseFormat};

pub const EMPTY_INPUT_MESSAGE: &str = "입력 텍스트가 없습니다.";
pub const INVALID_INPUT_MESSAGE: &str = "잘못된 입력입니다.";
pub const REGISTRY_MESSAGE: &str = "데이터를 불러오는데 실패했습니다.";
pub const SEMANTIC_CONFIG_MESSAGE: &str = "유사도 검색이 설정되지 않았습니다.";

pub struct Resolver {
    registry: Arc<Registry>,
    lexical: LexicalStrategy,
    semantic: Option<SemanticStrategy>,
    settings: Settings,
}

impl Resolver {
    /// Builds both fuzzy indexes once over the registry snapshot.
    pub fn new(registry: Arc<Registry>, settings: Settings) -> Self {
        let lexical = LexicalStrategy::new(registry.clone(), &settings.lexical);
        Self { registry, lexical, semantic: None, settings }
    }

    /// Attach the external embedding and vector-index capabilities.
    pub fn with_semantic(mut self, embedder: Arc<dyn Embedder>, index: Arc<dyn VectorIndex>) -> Self {
        self.semantic = Some(SemanticStrategy::new(embedder, index, self.settings.semantic.clone()));
        self
    }

    pub fn registry(&self) -> &Registry { &self.registry }

    fn parse(content: Option<&str>) -> Result<ParsedInput, ResolveError> {
        let content = content.ok_or(ResolveError::InvalidInput)?;
        let input = extract_fields(content);
        if input.is_empty() { return Err(ResolveError::InvalidInput); }
        debug!(name = %input.name, address = %input.address, "parsed input");
        Ok(input)
    }

    pub fn resolve_lexical(&self, content: &str) -> Result<Classification, ResolveError> {
        let content = Some(content).filter(|c| !c.trim().is_empty()).ok_or(ResolveError::InvalidInput)?;
        if self.registry.is_empty() { return Err(ResolveError::RegistryUnavailable); }
        let input = Self::parse(Some(content))?;
        Ok(classify(self.lexical.resolve(&input)))
    }

    pub async fn resolve_semantic(&self, content: &str, mode: SearchMode) -> Result<Classification, ResolveError> {
        let input = Self::parse(Some(content).filter(|c| !c.trim().is_empty()))?;
        let semantic = self.semantic.as_ref().ok_or(ResolveError::SemanticUnavailable)?;
        if semantic.index_is_empty() { return Err(ResolveError::RegistryUnavailable); }
        Ok(classify(semantic.search(&input, mode).await?))
    }

    pub fn handle_lexical(&self, req: &ResolveRequest) -> Outcome {
        let Some(content) = req.content() else { return Outcome::ClientError(EMPTY_INPUT_MESSAGE.to_string()) };
        let opts = RenderOptions::lexical(self.settings.lexical.attach_store_alias);
        match std::panic::catch_unwind(AssertUnwindSafe(|| self.resolve_lexical(content))) {
            Ok(result) => finish(result, req.format(), opts),
            Err(_) => {
                error!("lexical resolution panicked");
                Outcome::InternalError
            }
        }
    }

    pub async fn handle_semantic(&self, req: &ResolveRequest) -> Outcome {
        let Some(content) = req.content() else { return Outcome::ClientError(INVALID_INPUT_MESSAGE.to_string()) };
        let fut = AssertUnwindSafe(self.resolve_semantic(content, req.mode()));
        match fut.catch_unwind().await {
            Ok(result) => finish(result, req.format(), RenderOptions::semantic()),
            Err(_) => {
                error!("semantic resolution panicked");
                Outcome::InternalError
            }
        }
    }
}

fn finish(result: Result<Classification, ResolveError>, format: ResponseFormat, opts: RenderOptions) -> Outcome {
    match result {
        Ok(c) => {
            debug!(match_type = c.match_type().as_str(), total = c.total(), "resolved");
            Outcome::Resolved(match format {
                ResponseFormat::Json => Response::Json(render_json(&c, opts)),
                ResponseFormat::Text => Response::Text(render_text(&c, opts)),
            })
        }
        Err(e) => match e.kind() {
            ErrorKind::Client => Outcome::ClientError(INVALID_INPUT_MESSAGE.to_string()),
            ErrorKind::Config => {
                warn!(error = %e, "configuration error");
                Outcome::ConfigError(match e {
                    ResolveError::SemanticUnavailable => SEMANTIC_CONFIG_MESSAGE,
                    _ => REGISTRY_MESSAGE,
                }.to_string())
            }
            ErrorKind::Internal => {
                error!(error = %e, "resolution failed");
                Outcome::InternalError
            }
        },
    }
}
