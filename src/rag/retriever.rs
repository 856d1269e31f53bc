//! Keyword retrieval and ranking over the document store.
//!
//! The store does a coarse case-insensitive substring filter; the score used
//! for ranking is computed here, also case-insensitively, as the fraction of
//! query keywords found in the document content. The two passes stay
//! separate: the filter selects candidates, the score ranks them.

use std::sync::Arc;

use crate::core::errors::RagError;
use crate::store::{Document, DocumentStore};

/// Fallback used by the default search path.
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// A document paired with its relevance score, valid for one query.
#[derive(Debug, Clone)]
pub struct ScoredResult {
    pub document: Document,
    /// Fraction of query keywords found in the content, in [0, 1].
    pub score: f64,
}

#[derive(Clone)]
pub struct Retriever {
    store: Arc<dyn DocumentStore>,
}

impl Retriever {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Search with the default result limit.
    pub async fn search_default(&self, query: &str) -> Result<Vec<ScoredResult>, RagError> {
        self.search(query, DEFAULT_SEARCH_LIMIT as i64).await
    }

    /// Retrieve documents relevant to `query`, ranked by keyword overlap.
    ///
    /// A query with zero keywords matches nothing and returns an empty vec.
    /// Callers passing `limit <= 0` get `InvalidLimit`; the default path goes
    /// through [`Retriever::search_default`] instead.
    pub async fn search(&self, query: &str, limit: i64) -> Result<Vec<ScoredResult>, RagError> {
        if limit <= 0 {
            return Err(RagError::InvalidLimit(limit));
        }

        let keywords: Vec<String> = query.split_whitespace().map(str::to_string).collect();
        if keywords.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = self
            .store
            .search_by_keywords(&keywords, limit as usize)
            .await?;

        let total = keywords.len() as f64;
        let keywords_lower: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();

        let mut results: Vec<ScoredResult> = candidates
            .into_iter()
            .filter_map(|document| {
                let content_lower = document.content.to_lowercase();
                let matched = keywords_lower
                    .iter()
                    .filter(|k| content_lower.contains(k.as_str()))
                    .count();
                if matched == 0 {
                    return None;
                }
                Some(ScoredResult {
                    document,
                    score: matched as f64 / total,
                })
            })
            .collect();

        // Stable sort keeps the store's relevance order for equal scores.
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(limit as usize);

        Ok(results)
    }
}
