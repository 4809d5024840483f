//! Infrastructure layer for agora
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration file and dataset loading.

pub mod config;
pub mod dataset;
pub mod logging;
pub mod reasoner;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileDatasetConfig, FileLoggingConfig,
    FileModelTier, FileOutputConfig, FileReasonerConfig, FileSimulationConfig,
    FileTopologiesConfig,
};
pub use dataset::{DatasetError, load_gsm8k, parse_gsm8k, reference_answer};
pub use logging::JsonlConversationLogger;
pub use reasoner::{
    ChatClient, ChatMessage, ChatRequest, LlmReasoner, ModelChoice, ModelRouter, OpenAiChatClient,
};
