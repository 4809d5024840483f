//! Agent value objects - identity, capability and confidence.
//!
//! # Identifiers
//! - [`AgentId`] - Stable, totally ordered agent identifier
//!
//! # Capability
//! - [`CapabilityRank`] - Fixed tie-break rank, validated against a [`RankRange`]
//! - [`AgentProfile`] - The immutable (id, rank) pair handed to reasoners
//!
//! # Annotations
//! - [`Confidence`] - 0-100 confidence attached to an answer update

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Unique identifier for an agent within a network.
///
/// Ids are ordered so that agreement pairs can be canonicalized and sweeps
/// visit agents in a deterministic order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(u32);

impl AgentId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw numeric id.
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl From<u32> for AgentId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inclusive range of valid capability ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankRange {
    min: u8,
    max: u8,
}

impl RankRange {
    pub fn new(min: u8, max: u8) -> Result<Self, DomainError> {
        if min > max {
            return Err(DomainError::InvalidRankRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u8 {
        self.min
    }

    pub fn max(&self) -> u8 {
        self.max
    }

    pub fn contains(&self, rank: u8) -> bool {
        (self.min..=self.max).contains(&rank)
    }

    /// Clamp a raw value into the range (used by topology presets).
    pub fn clamp(&self, rank: u8) -> u8 {
        rank.clamp(self.min, self.max)
    }
}

impl Default for RankRange {
    fn default() -> Self {
        Self { min: 0, max: 5 }
    }
}

/// Capability rank of an agent.
///
/// Fixed at creation. The debate protocol only consults it to break
/// unresolved debates; reasoner adapters may also route models by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityRank(u8);

impl CapabilityRank {
    /// Validate `rank` against `range` for the given agent.
    pub fn new(agent: AgentId, rank: u8, range: &RankRange) -> Result<Self, DomainError> {
        if !range.contains(rank) {
            return Err(DomainError::RankOutOfRange {
                agent,
                rank,
                min: range.min(),
                max: range.max(),
            });
        }
        Ok(Self(rank))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for CapabilityRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable identity of an agent as seen by a reasoner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentProfile {
    pub id: AgentId,
    pub rank: CapabilityRank,
}

/// Confidence (0-100) reported alongside an updated answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confidence(u8);

impl Confidence {
    pub const MAX: u8 = 100;

    /// Returns `None` when the value exceeds 100.
    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX).then_some(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}
