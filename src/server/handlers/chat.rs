use std::io;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures_util::StreamExt;
use serde::Deserialize;

use crate::core::errors::ApiError;
use crate::llm::ChatMessage;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatApiRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    pub message: String,
}

/// Streams a chat completion to the client.
///
/// The final user message is enhanced with retrieved context when RAG is
/// enabled; enhancement never fails the request. Deltas are written as they
/// arrive; a backend failure mid-stream aborts the body after the partial
/// output already sent.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatApiRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user_msg = state.rag.enhance(&req.message).await;

    let rx = state
        .relay
        .stream_chat(&req.messages, &user_msg)
        .await
        .map_err(|err| {
            tracing::error!("Failed to start generation stream: {}", err);
            ApiError::from(err)
        })?;

    let deltas = futures_util::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|item| (item, rx))
    })
    .map(|item| match item {
        Ok(delta) => Ok(delta.into_bytes()),
        Err(err) => {
            tracing::error!("Generation stream terminated: {}", err);
            Err(io::Error::new(io::ErrorKind::Other, err.to_string()))
        }
    });

    let response = Response::builder()
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(deltas))
        .map_err(ApiError::internal)?;

    Ok(response)
}
