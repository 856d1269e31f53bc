//! Retrieval-augmented prompt pipeline.
//!
//! - `retriever` — keyword retrieval and ranking over the document store
//! - `context` — bounded context-block formatting
//! - `prompt` — prompt augmentation template
//! - `manager` — the orchestrator facade with pass-through degradation

pub mod context;
pub mod manager;
pub mod prompt;
pub mod retriever;

pub use manager::RagManager;
pub use retriever::{Retriever, ScoredResult};

#[cfg(test)]
pub(crate) mod testing;
