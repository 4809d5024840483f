//! Chat-model reasoner adapter.
//!
//! Implements the application [`Reasoner`](agora_application::Reasoner) port
//! on top of an OpenAI-compatible chat-completions endpoint.

mod chat_client;
mod llm_reasoner;
mod routing;

pub use chat_client::{ChatClient, ChatMessage, ChatRequest, OpenAiChatClient};
pub use llm_reasoner::LlmReasoner;
pub use routing::{ModelChoice, ModelRouter};
