use async_trait::async_trait;
use tokio::sync::mpsc;

use super::types::ChatRequest;
use crate::core::errors::RagError;

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// return the provider name (e.g. "openai")
    fn name(&self) -> &str;

    /// check if the generation backend is reachable
    async fn health_check(&self) -> Result<bool, RagError>;

    /// streaming chat completion; the receiver yields text deltas in arrival
    /// order, ending with channel close on clean completion or a single
    /// `StreamTerminated` on mid-stream failure
    async fn stream_chat(
        &self,
        request: ChatRequest,
        model_id: &str,
    ) -> Result<mpsc::Receiver<Result<String, RagError>>, RagError>;
}
