//! The retrieval-augmented orchestrator.
//!
//! Enabled or disabled once at construction, for the process lifetime.
//! Read-path failures degrade to the original query; write-path failures are
//! surfaced to the caller.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::core::errors::RagError;
use crate::embedding::{EmbeddingClient, HttpEmbeddingClient};
use crate::rag::{context, prompt, Retriever};
use crate::store::{Document, DocumentStore, SqliteDocumentStore};

pub struct RagManager {
    context_limit: usize,
    inner: Option<Inner>,
}

struct Inner {
    store: Arc<dyn DocumentStore>,
    embedder: Arc<dyn EmbeddingClient>,
    retriever: Retriever,
}

impl RagManager {
    /// Builds the manager from configuration. A disabled configuration yields
    /// a pass-through manager with no store connection at all.
    pub async fn from_config(config: &AppConfig) -> Result<Self, RagError> {
        if !config.rag_enabled {
            return Ok(Self::disabled());
        }

        let db_path = config.require_db_path()?;
        let store: Arc<dyn DocumentStore> = Arc::new(SqliteDocumentStore::connect(db_path).await?);
        let embedder: Arc<dyn EmbeddingClient> = Arc::new(HttpEmbeddingClient::new(
            config.base_url.clone(),
            config.api_key.clone(),
            config.embedding_model.clone(),
        ));

        Ok(Self::with_components(
            store,
            embedder,
            config.rag_context_limit,
        ))
    }

    pub fn disabled() -> Self {
        Self {
            context_limit: 0,
            inner: None,
        }
    }

    pub fn with_components(
        store: Arc<dyn DocumentStore>,
        embedder: Arc<dyn EmbeddingClient>,
        context_limit: usize,
    ) -> Self {
        let retriever = Retriever::new(store.clone());
        Self {
            context_limit,
            inner: Some(Inner {
                store,
                embedder,
                retriever,
            }),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Augments `query` with retrieved context.
    ///
    /// Never fails: when disabled, when retrieval errors, or when nothing
    /// relevant is found, the original query comes back unchanged. Chat must
    /// not depend on retrieval availability, so retrieval errors are logged
    /// at warn level and absorbed here.
    pub async fn enhance(&self, query: &str) -> String {
        let Some(inner) = &self.inner else {
            return query.to_string();
        };

        let results = match inner.retriever.search(query, self.context_limit as i64).await {
            Ok(results) => results,
            Err(err) => {
                tracing::warn!("Failed to enhance prompt with context: {}", err);
                return query.to_string();
            }
        };

        if results.is_empty() {
            return query.to_string();
        }

        prompt::build_prompt(query, &context::format_context(&results))
    }

    /// Ingests a document: embed first, then store.
    ///
    /// Either both steps succeed or the document is not ingested; an
    /// embedding failure aborts before any store write. The embedding itself
    /// is not used by keyword retrieval yet, but generating it is mandatory
    /// so an embedding-indexed store can take over without re-ingestion.
    pub async fn ingest(&self, doc: Document) -> Result<(), RagError> {
        let Some(inner) = &self.inner else {
            return Err(RagError::NotEnabled);
        };

        let text = format!("{}\n{}", doc.title, doc.content);
        inner.embedder.embed(&text).await?;

        inner.store.upsert(&doc).await?;

        tracing::debug!("Ingested document {}", doc.id);
        Ok(())
    }

    /// Releases the store connection. No-op when disabled.
    pub async fn close(&self) {
        if let Some(inner) = &self.inner {
            inner.store.close().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rag::testing::{FailingEmbedder, FailingStore, MemoryStore, StubEmbedder};

    fn make_doc(id: &str, title: &str, content: &str) -> Document {
        Document {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            url: None,
            embedding_ref: None,
        }
    }

    fn enabled_manager(store: Arc<dyn DocumentStore>) -> RagManager {
        RagManager::with_components(store, Arc::new(StubEmbedder), 5)
    }

    #[tokio::test]
    async fn disabled_enhance_is_identity() {
        let manager = RagManager::disabled();

        assert!(!manager.is_enabled());
        assert_eq!(manager.enhance("hello world").await, "hello world");
        assert_eq!(manager.enhance("").await, "");
    }

    #[tokio::test]
    async fn disabled_ingest_fails() {
        let manager = RagManager::disabled();

        let result = manager.ingest(make_doc("1", "T", "C")).await;
        assert!(matches!(result, Err(RagError::NotEnabled)));
    }

    #[tokio::test]
    async fn enhance_returns_query_when_store_empty() {
        let manager = enabled_manager(Arc::new(MemoryStore::default()));

        assert_eq!(manager.enhance("anything").await, "anything");
    }

    #[tokio::test]
    async fn enhance_degrades_to_query_on_retrieval_failure() {
        let manager = enabled_manager(Arc::new(FailingStore));

        assert_eq!(manager.enhance("anything").await, "anything");
    }

    #[tokio::test]
    async fn enhance_builds_prompt_from_matching_docs() {
        let store = MemoryStore::with_docs(vec![make_doc(
            "1",
            "AI",
            "Artificial intelligence is transforming the world",
        )]);
        let manager = enabled_manager(Arc::new(store));

        let enhanced = manager.enhance("Tell me about AI").await;
        assert!(enhanced.contains("Question: Tell me about AI"));
        assert!(enhanced.contains("[1] AI"));
        assert!(enhanced.contains("Artificial intelligence is transforming the world"));
    }

    #[tokio::test]
    async fn ingest_then_search_round_trip() {
        let store = Arc::new(MemoryStore::default());
        let manager = enabled_manager(store.clone());

        manager
            .ingest(make_doc("doc-1", "Tokio", "async runtime for Rust"))
            .await
            .unwrap();

        let retriever = Retriever::new(store);
        let results = retriever.search("runtime", 5).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].document.id, "doc-1");
    }

    #[tokio::test]
    async fn embedding_failure_aborts_before_store_write() {
        let store = Arc::new(MemoryStore::default());
        let manager =
            RagManager::with_components(store.clone(), Arc::new(FailingEmbedder), 5);

        let result = manager.ingest(make_doc("1", "T", "C")).await;
        assert!(matches!(result, Err(RagError::EmbeddingFailed(_))));
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn store_write_failure_is_surfaced() {
        let manager =
            RagManager::with_components(Arc::new(FailingStore), Arc::new(StubEmbedder), 5);

        let result = manager.ingest(make_doc("1", "T", "C")).await;
        assert!(matches!(result, Err(RagError::StoreWriteFailed(_))));
    }

    #[tokio::test]
    async fn close_is_idempotent_when_disabled() {
        let manager = RagManager::disabled();
        manager.close().await;
        manager.close().await;
    }
}
