//! RAG-augmented streaming chat backend.
//!
//! Stores and indexes documents, ranks them against incoming queries by
//! keyword overlap, splices a bounded context block into the outgoing prompt,
//! and relays the generated token stream back to the caller incrementally.
//! Retrieval failures degrade to the original query; chat never depends on
//! retrieval availability.

pub mod config;
pub mod core;
pub mod embedding;
pub mod llm;
pub mod logging;
pub mod rag;
pub mod server;
pub mod state;
pub mod store;

pub use crate::config::AppConfig;
pub use crate::core::errors::{ApiError, RagError};
pub use crate::rag::RagManager;
pub use crate::state::AppState;
