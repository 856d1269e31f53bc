use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::core::errors::ApiError;
use crate::state::AppState;
use crate::store::Document;

#[derive(Debug, Deserialize)]
pub struct DocumentRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Ingests a document into the knowledge base.
///
/// Ingestion failures are always surfaced; silent data loss is unacceptable
/// on the write path.
pub async fn add_document(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DocumentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.title.trim().is_empty() || req.content.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "title and content are required".to_string(),
        ));
    }

    let doc = Document {
        id: Uuid::new_v4().to_string(),
        title: req.title,
        content: req.content,
        url: req.url,
        embedding_ref: None,
    };
    let id = doc.id.clone();

    state.rag.ingest(doc).await.map_err(|err| {
        tracing::error!("Failed to add document: {}", err);
        ApiError::from(err)
    })?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}
