//! Agent domain module
//!
//! Contains the negotiating [`Agent`] entity and its identity/capability
//! value objects.

pub mod entities;
pub mod value_objects;

pub use entities::{Agent, DEFAULT_ROUND_CEILING};
pub use value_objects::{AgentId, AgentProfile, CapabilityRank, Confidence, RankRange};
