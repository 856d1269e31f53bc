//! Streaming relay: role mapping plus incremental delta forwarding.
//!
//! Accepts a message history and a final user message (possibly augmented by
//! the RAG manager), submits a streaming completion request, and hands the
//! caller a channel of text deltas in arrival order. Nothing is buffered:
//! deltas forwarded before a mid-stream failure stand, and the failure
//! arrives as a distinct terminal `StreamTerminated`. No retries.

use std::sync::Arc;

use tokio::sync::mpsc;

use super::provider::LlmProvider;
use super::types::{ChatMessage, ChatRequest};
use crate::core::errors::RagError;

#[derive(Clone)]
pub struct StreamingRelay {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl StreamingRelay {
    pub fn new(provider: Arc<dyn LlmProvider>, model: String) -> Self {
        Self { provider, model }
    }

    pub async fn stream_chat(
        &self,
        history: &[ChatMessage],
        final_user_message: &str,
    ) -> Result<mpsc::Receiver<Result<String, RagError>>, RagError> {
        let mut messages = map_history(history);
        messages.push(ChatMessage::user(final_user_message));

        self.provider
            .stream_chat(ChatRequest::new(messages), &self.model)
            .await
    }
}

/// Maps history entries to outgoing roles. Only "user" and "assistant" are
/// forwarded; any other tag is silently dropped.
fn map_history(history: &[ChatMessage]) -> Vec<ChatMessage> {
    history
        .iter()
        .filter(|msg| msg.role == "user" || msg.role == "assistant")
        .cloned()
        .collect()
}
