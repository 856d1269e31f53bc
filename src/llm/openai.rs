//! OpenAI-compatible streaming chat provider.

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use serde_json::{json, Value};
use tokio::sync::mpsc;

use super::provider::LlmProvider;
use super::types::ChatRequest;
use crate::core::errors::RagError;

#[derive(Clone)]
pub struct OpenAiProvider {
    base_url: String,
    api_key: String,
    client: Client,
}

impl OpenAiProvider {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client: Client::new(),
        }
    }
}

/// Pulls the delta content out of one SSE payload line (without the
/// `data: ` prefix). Returns `None` for empty deltas and non-delta events.
fn extract_delta(data: &str) -> Option<String> {
    let json = serde_json::from_str::<Value>(data).ok()?;
    let content = json["choices"][0]["delta"]["content"].as_str()?;
    (!content.is_empty()).then(|| content.to_string())
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn health_check(&self) -> Result<bool, RagError> {
        let url = format!("{}/v1/models", self.base_url);
        let res = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await;
        match res {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    async fn stream_chat(
        &self,
        request: ChatRequest,
        model_id: &str,
    ) -> Result<mpsc::Receiver<Result<String, RagError>>, RagError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let body = json!({
            "model": model_id,
            "messages": request.messages,
            "stream": true,
        });

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(RagError::stream)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(RagError::StreamTerminated(format!(
                "backend returned {}: {}",
                status, text
            )));
        }

        let (tx, rx) = mpsc::channel(32);
        let mut stream = res.bytes_stream();

        // Forwarding ends when the backend signals [DONE], when the transport
        // errors (one terminal error is emitted), or when the receiver is
        // dropped by a disconnected caller.
        tokio::spawn(async move {
            let mut pending = String::new();

            while let Some(item) = stream.next().await {
                match item {
                    Ok(bytes) => {
                        pending.push_str(&String::from_utf8_lossy(&bytes));

                        while let Some(pos) = pending.find('\n') {
                            let line = pending[..pos].trim().to_string();
                            pending.drain(..=pos);

                            if line.is_empty() {
                                continue;
                            }
                            if line == "data: [DONE]" {
                                return;
                            }
                            if let Some(data) = line.strip_prefix("data: ") {
                                if let Some(content) = extract_delta(data) {
                                    if tx.send(Ok(content)).await.is_err() {
                                        return;
                                    }
                                }
                            }
                        }
                    }
                    Err(e) => {
                        let _ = tx.send(Err(RagError::stream(e))).await;
                        return;
                    }
                }
            }
        });

        Ok(rx)
    }
}
