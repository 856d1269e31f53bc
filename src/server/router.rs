use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::server::handlers::{chat, documents, health};
use crate::state::AppState;

/// Builds the application router: health check, document ingestion, and the
/// streaming chat endpoint, behind CORS and request tracing.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/documents", post(documents::add_document))
        .route("/chat", post(chat::chat))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
