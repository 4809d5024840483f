//! Domain layer for agora
//!
//! This crate contains the core negotiation model: agents, the network they
//! are wired into, and the bookkeeping of the pairwise debate protocol.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Agent
//!
//! A participant holding one candidate answer and a fixed capability rank.
//! Agents go inactive after a fixed number of debate rounds.
//!
//! ## Network
//!
//! An undirected topology over agents plus a symmetric agreement flag per
//! edge. The network is **settled** when every edge between two active
//! agents agrees.
//!
//! ## Debate
//!
//! A bounded pairwise exchange (message, reply, update, equivalence check)
//! driven by an injected reasoner. Unresolved debates are broken by rank.

pub mod agent;
pub mod config;
pub mod core;
pub mod debate;
pub mod network;
pub mod prompt;
pub mod simulation;
pub mod util;

// Re-export commonly used types
pub use agent::{
    Agent, AgentId, AgentProfile, CapabilityRank, Confidence, DEFAULT_ROUND_CEILING, RankRange,
};
pub use config::OutputFormat;
pub use core::{
    error::DomainError,
    problem::{Problem, ProblemRecord},
};
pub use debate::{
    DebateEnd, DebateResult, EntryKind, TieBreak, Transcript, TranscriptEntry, UpdateVerdict,
    VerdictParseError, parse_update_verdict, parse_yes_no,
};
pub use network::{
    AgreementMatrix, CanonicalPair, Network, NodeSpec, Topology, TopologyPreset, TopologySpec,
};
pub use prompt::DebatePrompt;
pub use simulation::{
    AgentVerdict, DebateOutcome, ProblemOutcome, SimulationReport, Termination, TopologyReport,
};
