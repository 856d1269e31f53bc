//! Process configuration, read once from the environment at startup.

use std::env;
use std::path::PathBuf;

use crate::core::errors::RagError;

const DEFAULT_CONTEXT_LIMIT: usize = 5;
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";

/// Immutable application configuration.
///
/// RAG state (`rag_enabled`, `rag_context_limit`) is fixed here for the
/// process lifetime; there is no runtime reconfiguration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the OpenAI-compatible generation/embedding backend.
    pub base_url: String,
    pub api_key: String,
    /// Chat model identifier sent with completion requests.
    pub model: String,
    /// Embedding model identifier.
    pub embedding_model: String,
    pub rag_enabled: bool,
    /// Max documents considered per query.
    pub rag_context_limit: usize,
    /// SQLite database path; required when RAG is enabled.
    pub rag_db_path: Option<PathBuf>,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let rag_enabled = match env::var("RAG_ENABLED") {
            Ok(val) => match val.parse::<bool>() {
                Ok(parsed) => parsed,
                Err(_) => {
                    tracing::warn!("Invalid RAG_ENABLED value {:?}, defaulting to true", val);
                    true
                }
            },
            Err(_) => true,
        };

        let rag_context_limit = match env::var("RAG_CONTEXT_LIMIT") {
            Ok(val) => match val.parse::<usize>() {
                Ok(parsed) if parsed > 0 => parsed,
                _ => {
                    tracing::warn!(
                        "Invalid RAG_CONTEXT_LIMIT value {:?}, defaulting to {}",
                        val,
                        DEFAULT_CONTEXT_LIMIT
                    );
                    DEFAULT_CONTEXT_LIMIT
                }
            },
            Err(_) => DEFAULT_CONTEXT_LIMIT,
        };

        let port = env::var("PORT")
            .ok()
            .and_then(|val| val.parse::<u16>().ok())
            .unwrap_or(8080);

        Self {
            base_url: env::var("BASE_URL").unwrap_or_default(),
            api_key: env::var("API_KEY").unwrap_or_default(),
            model: env::var("MODEL").unwrap_or_default(),
            embedding_model: env::var("EMBEDDING_MODEL")
                .unwrap_or_else(|_| DEFAULT_EMBEDDING_MODEL.to_string()),
            rag_enabled,
            rag_context_limit,
            rag_db_path: env::var("RAG_DB_PATH").ok().map(PathBuf::from),
            port,
        }
    }

    /// Returns the store path, failing when RAG is enabled but the path is
    /// missing. Fatal at construction: an enabled manager without a store is
    /// not usable.
    pub fn require_db_path(&self) -> Result<&PathBuf, RagError> {
        self.rag_db_path
            .as_ref()
            .ok_or_else(|| RagError::Config("RAG_DB_PATH must be set when RAG is enabled".into()))
    }
}
