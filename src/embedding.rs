//! Embedding adapter — text in, fixed-length vector out.
//!
//! The vector's length and semantics are opaque to the pipeline; retrieval is
//! keyword-based today, but every ingested document still gets an embedding
//! so a vector-indexed store can be swapped in later.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::core::errors::RagError;

#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    /// Generate an embedding for the given text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, RagError>;
}

/// OpenAI-compatible `/v1/embeddings` client.
#[derive(Clone)]
pub struct HttpEmbeddingClient {
    base_url: String,
    api_key: String,
    model: String,
    client: Client,
}

impl HttpEmbeddingClient {
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl EmbeddingClient for HttpEmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, RagError> {
        let url = format!("{}/v1/embeddings", self.base_url);

        let body = json!({
            "model": self.model,
            "input": [text],
        });

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(RagError::embedding)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(RagError::EmbeddingFailed(format!(
                "backend returned {}: {}",
                status, text
            )));
        }

        let payload: Value = res.json().await.map_err(RagError::embedding)?;

        let embedding: Vec<f32> = payload["data"][0]["embedding"]
            .as_array()
            .map(|vals| {
                vals.iter()
                    .filter_map(|v| v.as_f64().map(|f| f as f32))
                    .collect()
            })
            .unwrap_or_default();

        if embedding.is_empty() {
            return Err(RagError::EmbeddingFailed(
                "backend response contained no embedding".into(),
            ));
        }

        Ok(embedding)
    }
}
