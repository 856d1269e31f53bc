pub mod openai;
pub mod provider;
pub mod relay;
pub mod types;

pub use openai::OpenAiProvider;
pub use provider::LlmProvider;
pub use relay::StreamingRelay;
pub use types::{ChatMessage, ChatRequest};
