use std::sync::Arc;

use crate::config::AppConfig;
use crate::core::errors::RagError;
use crate::llm::{LlmProvider, OpenAiProvider, StreamingRelay};
use crate::rag::RagManager;

/// Shared application state.
///
/// The manager and relay are safe for concurrent use; each request is an
/// independent unit of work with no shared mutable per-request state.
pub struct AppState {
    pub config: AppConfig,
    pub rag: RagManager,
    pub llm: Arc<dyn LlmProvider>,
    pub relay: StreamingRelay,
}

impl AppState {
    pub async fn initialize(config: AppConfig) -> Result<Arc<Self>, RagError> {
        let rag = RagManager::from_config(&config).await?;

        let llm: Arc<dyn LlmProvider> = Arc::new(OpenAiProvider::new(
            config.base_url.clone(),
            config.api_key.clone(),
        ));
        let relay = StreamingRelay::new(llm.clone(), config.model.clone());

        Ok(Arc::new(Self {
            config,
            rag,
            llm,
            relay,
        }))
    }
}
