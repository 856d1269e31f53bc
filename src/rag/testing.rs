//! In-memory test doubles for the store and embedding seams.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::errors::RagError;
use crate::embedding::EmbeddingClient;
use crate::store::{Document, DocumentStore};

/// In-memory store mirroring the SQLite search semantics: case-insensitive
/// substring filter, ordered by match count.
#[derive(Default)]
pub struct MemoryStore {
    docs: Mutex<Vec<Document>>,
}

impl MemoryStore {
    pub fn with_docs(docs: Vec<Document>) -> Self {
        Self {
            docs: Mutex::new(docs),
        }
    }

    pub fn len(&self) -> usize {
        self.docs.lock().unwrap().len()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn upsert(&self, doc: &Document) -> Result<(), RagError> {
        let mut docs = self.docs.lock().unwrap();
        if let Some(existing) = docs.iter_mut().find(|d| d.id == doc.id) {
            *existing = doc.clone();
        } else {
            docs.push(doc.clone());
        }
        Ok(())
    }

    async fn search_by_keywords(
        &self,
        keywords: &[String],
        limit: usize,
    ) -> Result<Vec<Document>, RagError> {
        let docs = self.docs.lock().unwrap();

        let mut matched: Vec<(usize, Document)> = docs
            .iter()
            .filter_map(|doc| {
                let content_lower = doc.content.to_lowercase();
                let count = keywords
                    .iter()
                    .filter(|k| content_lower.contains(&k.to_lowercase()))
                    .count();
                (count > 0).then(|| (count, doc.clone()))
            })
            .collect();

        matched.sort_by(|a, b| b.0.cmp(&a.0));
        matched.truncate(limit);

        Ok(matched.into_iter().map(|(_, doc)| doc).collect())
    }

    async fn close(&self) {}
}

/// Store whose reads fail with `StoreUnavailable` and writes with
/// `StoreWriteFailed`.
pub struct FailingStore;

#[async_trait]
impl DocumentStore for FailingStore {
    async fn upsert(&self, _doc: &Document) -> Result<(), RagError> {
        Err(RagError::StoreWriteFailed("store is down".into()))
    }

    async fn search_by_keywords(
        &self,
        _keywords: &[String],
        _limit: usize,
    ) -> Result<Vec<Document>, RagError> {
        Err(RagError::StoreUnavailable("store is down".into()))
    }

    async fn close(&self) {}
}

/// Embedder returning a fixed small vector.
pub struct StubEmbedder;

#[async_trait]
impl EmbeddingClient for StubEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, RagError> {
        Ok(vec![0.1, 0.2, 0.3, 0.4, 0.5])
    }
}

/// Embedder that always fails.
pub struct FailingEmbedder;

#[async_trait]
impl EmbeddingClient for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, RagError> {
        Err(RagError::EmbeddingFailed("embedding backend down".into()))
    }
}
