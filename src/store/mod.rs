//! DocumentStore trait — abstract interface for the document persistence
//! backend.
//!
//! The store exposes exactly the two operations the pipeline needs: upsert by
//! identifier and a coarse keyword search. The primary implementation is
//! `SqliteDocumentStore` in the `sqlite` module.

pub mod sqlite;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::errors::RagError;

pub use sqlite::SqliteDocumentStore;

/// A unit of knowledge in the store.
///
/// `id` is unique across the store; re-ingesting with the same id replaces
/// all fields. `title` and `content` are non-empty at ingestion time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Optional provenance.
    pub url: Option<String>,
    /// Back-reference to a stored embedding, identity only.
    pub embedding_ref: Option<String>,
}

/// Abstract trait for document storage backends.
///
/// The keyword search is a candidate-selection pass: case-insensitive
/// substring matching, ordered by store-side match count. Relevance scoring
/// happens in the retriever, not here.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert or replace a document by id.
    async fn upsert(&self, doc: &Document) -> Result<(), RagError>;

    /// Return documents whose content contains at least one keyword as a
    /// case-insensitive substring, in store relevance order, capped at
    /// `limit`.
    async fn search_by_keywords(
        &self,
        keywords: &[String],
        limit: usize,
    ) -> Result<Vec<Document>, RagError>;

    /// Release the underlying connection. Safe to call more than once.
    async fn close(&self);
}
