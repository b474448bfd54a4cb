use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use storematch_core::traits::VectorIndex;
use storematch_core::types::{MerchantRecord, VectorHit};

/// Request timeout for vector queries.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
    include_vectors: bool,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Vec<QueryMatch>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QueryMatch {
    id: serde_json::Value,
    score: f64,
    #[serde(default)]
    metadata: Option<StoreMetadata>,
}

#[derive(Debug, Default, Deserialize)]
struct StoreMetadata {
    #[serde(default)]
    name: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    address: String,
}

/// Client for an Upstash-style vector REST API (`POST {url}/query`).
/// Store fields travel as match metadata.
pub struct UpstashIndex {
    client: reqwest::Client,
    url: String,
    token: String,
}

impl UpstashIndex {
    pub fn new(url: &str, token: String) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, url: url.trim_end_matches('/').to_string(), token })
    }
}

fn id_string(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl VectorIndex for UpstashIndex {
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<VectorHit>> {
        let response = self
            .client
            .post(format!("{}/query", self.url))
            .bearer_auth(&self.token)
            .json(&QueryRequest { vector, top_k, include_metadata: true, include_vectors: false })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read response body".to_string());
            let snippet: String = body.chars().take(200).collect();
            warn!(%status, "vector query failed");
            bail!("HTTP {}: {}", status, snippet);
        }

        let parsed: QueryResponse = response.json().await.map_err(|e| anyhow!("Failed to deserialize query response: {}", e))?;
        if let Some(err) = parsed.error { bail!("vector index error: {}", err); }

        Ok(parsed
            .result
            .into_iter()
            .map(|m| {
                let id = id_string(&m.id);
                let meta = m.metadata.unwrap_or_default();
                let record = MerchantRecord::new(id.clone(), meta.name, meta.category, meta.address);
                VectorHit { id, score: m.score, record }
            })
            .collect())
    }
}
