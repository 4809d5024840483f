//! Domain error types

use crate::agent::value_objects::AgentId;
use thiserror::Error;

/// Domain-level errors
///
/// Every variant signals a programming or configuration mistake (unknown ids,
/// malformed topologies, out-of-range ranks). Protocol outcomes such as a
/// debate that cannot start are not errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown agent: {0}")]
    UnknownAgent(AgentId),

    #[error("Duplicate agent id: {0}")]
    DuplicateAgent(AgentId),

    #[error("Agents {0} and {1} are not connected")]
    NotAnEdge(AgentId, AgentId),

    #[error("Edge connects agent {0} to itself")]
    SelfLoop(AgentId),

    #[error("Capability rank {rank} of agent {agent} is outside {min}..={max}")]
    RankOutOfRange {
        agent: AgentId,
        rank: u8,
        min: u8,
        max: u8,
    },

    #[error("Invalid rank range: {min} > {max}")]
    InvalidRankRange { min: u8, max: u8 },

    #[error("Problem statement cannot be empty")]
    EmptyProblem,

    #[error("Topology '{0}' has no agents")]
    EmptyTopology(String),
}

impl DomainError {
    /// Check if this error was caused by an id the network does not know
    pub fn is_unknown_agent(&self) -> bool {
        matches!(self, DomainError::UnknownAgent(_))
    }
}
