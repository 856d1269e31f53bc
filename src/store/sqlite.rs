//! SQLite-backed document store implementation.
//!
//! Keyword search lowercases both sides of the `instr()` comparison, so the
//! store-side filter is a coarse case-insensitive candidate pass; ranking
//! happens in the retriever.

use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, SqlitePool};

use super::{Document, DocumentStore};
use crate::core::errors::RagError;

pub struct SqliteDocumentStore {
    pool: SqlitePool,
}

impl SqliteDocumentStore {
    pub async fn connect(db_path: &Path) -> Result<Self, RagError> {
        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(4)
            .connect_with(options)
            .await
            .map_err(RagError::store_unavailable)?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), RagError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS documents (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                url TEXT NOT NULL DEFAULT '',
                embedding_ref TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL DEFAULT (STRFTIME('%Y-%m-%dT%H:%M:%fZ', 'now'))
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(RagError::store_unavailable)?;

        Ok(())
    }

    fn row_to_document(row: &sqlx::sqlite::SqliteRow) -> Document {
        let url: String = row.get("url");
        let embedding_ref: String = row.get("embedding_ref");

        Document {
            id: row.get("id"),
            title: row.get("title"),
            content: row.get("content"),
            url: (!url.is_empty()).then_some(url),
            embedding_ref: (!embedding_ref.is_empty()).then_some(embedding_ref),
        }
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn upsert(&self, doc: &Document) -> Result<(), RagError> {
        sqlx::query(
            "INSERT OR REPLACE INTO documents (id, title, content, url, embedding_ref)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&doc.id)
        .bind(&doc.title)
        .bind(&doc.content)
        .bind(doc.url.as_deref().unwrap_or(""))
        .bind(doc.embedding_ref.as_deref().unwrap_or(""))
        .execute(&self.pool)
        .await
        .map_err(RagError::store_write)?;

        Ok(())
    }

    async fn search_by_keywords(
        &self,
        keywords: &[String],
        limit: usize,
    ) -> Result<Vec<Document>, RagError> {
        if keywords.is_empty() {
            return Ok(Vec::new());
        }

        // One placeholder per keyword, reused in the filter and the ordering
        // expression (store-side match count, descending). Each comparison is
        // parenthesized: SQLite binds `+` tighter than `>`, so the bare form
        // would not sum the matches.
        let predicates: Vec<String> = (1..=keywords.len())
            .map(|n| format!("(instr(lower(content), ?{}) > 0)", n))
            .collect();
        let sql = format!(
            "SELECT id, title, content, url, embedding_ref
             FROM documents
             WHERE {}
             ORDER BY ({}) DESC, created_at DESC
             LIMIT ?{}",
            predicates.join(" OR "),
            predicates.join(" + "),
            keywords.len() + 1,
        );

        let mut query = sqlx::query(&sql);
        for keyword in keywords {
            query = query.bind(keyword.to_lowercase());
        }
        query = query.bind(limit.max(1) as i64);

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(RagError::store_unavailable)?;

        Ok(rows.iter().map(Self::row_to_document).collect())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
