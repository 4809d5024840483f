//! Prompt domain
//!
//! Templates for the prompts sent to language-model reasoners at each debate step.

mod template;

pub use template::DebatePrompt;
