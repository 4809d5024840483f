//! Application layer for agora
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::DebateParams;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    progress::{DebateProgressNotifier, NoProgress},
    reasoner::{Reasoner, ReasonerError},
};
pub use use_cases::debate_pair::{DebateError, DebatePairUseCase};
pub use use_cases::run_debate::RunDebateUseCase;
pub use use_cases::run_simulation::{RunSimulationInput, RunSimulationUseCase, SimulationError};
pub use use_cases::solve_all::{SolveAllUseCase, SolveError};
