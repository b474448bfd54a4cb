//! Embedding providers for the semantic engine.
//!
//! `OpenAiEmbedder` talks to an OpenAI-compatible `/v1/embeddings` endpoint;
//! `FakeEmbedder` hashes tokens into a normalised vector for tests and
//! offline development. `APP_USE_FAKE_EMBEDDINGS=1` forces the fake one.
use anyhow::{anyhow, Result};
use tracing::info;

use storematch_core::config::{EmbeddingProviderKind, EmbeddingSettings};
use storematch_core::traits::Embedder;

pub mod fake;
pub mod openai;

pub use fake::FakeEmbedder;
pub use openai::OpenAiEmbedder;

fn fake_forced() -> bool {
    std::env::var("APP_USE_FAKE_EMBEDDINGS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

pub fn get_default_embedder(settings: &EmbeddingSettings) -> Result<Box<dyn Embedder>> {
    if fake_forced() || settings.provider == EmbeddingProviderKind::Fake {
        info!(dim = settings.dimension, "using FakeEmbedder");
        return Ok(Box::new(FakeEmbedder::new(settings.dimension)));
    }
    let api_key = settings
        .api_key
        .clone()
        .or_else(|| std::env::var("OPENAI_API_KEY").ok())
        .ok_or_else(|| anyhow!("embedding.api_key (or OPENAI_API_KEY) is not set"))?;
    info!(model = %settings.model, base_url = %settings.base_url, "using OpenAiEmbedder");
    Ok(Box::new(OpenAiEmbedder::with_base_url(&settings.base_url, &settings.model, api_key)?))
}
