use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::state::AppState;

pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let backend_reachable = state.llm.health_check().await.unwrap_or(false);

    Json(json!({
        "status": "ok",
        "rag_enabled": state.rag.is_enabled(),
        "backend_reachable": backend_reachable,
    }))
}
