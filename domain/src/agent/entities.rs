//! Agent domain entity
//!
//! [`Agent`] owns one participant's negotiation state and the single-agent
//! lifecycle rules:
//!
//! ```text
//!   new ──► Active ──(rounds_used >= round_ceiling)──► Inactive
//!             ▲                                            │
//!             └────────────────── reset() ◄────────────────┘
//! ```
//!
//! Reasoning itself is delegated to an injected reasoner; the entity only
//! records its results.

use super::value_objects::{AgentId, AgentProfile, CapabilityRank, Confidence};
use crate::debate::verdict::UpdateVerdict;
use serde::{Deserialize, Serialize};

/// Default number of debate rounds after which an agent goes inactive.
pub const DEFAULT_ROUND_CEILING: u32 = 10;

/// A single negotiating participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    id: AgentId,
    rank: CapabilityRank,
    current_answer: Option<String>,
    confidence: Option<Confidence>,
    reasoning: Option<String>,
    active: bool,
    rounds_used: u32,
    round_ceiling: u32,
}

impl Agent {
    /// Create an agent in its construction-time state.
    pub fn new(id: AgentId, rank: CapabilityRank) -> Self {
        Self::with_round_ceiling(id, rank, DEFAULT_ROUND_CEILING)
    }

    pub fn with_round_ceiling(id: AgentId, rank: CapabilityRank, round_ceiling: u32) -> Self {
        Self {
            id,
            rank,
            current_answer: None,
            confidence: None,
            reasoning: None,
            active: true,
            rounds_used: 0,
            round_ceiling,
        }
    }

    // ==================== Accessors ====================

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn rank(&self) -> CapabilityRank {
        self.rank
    }

    pub fn profile(&self) -> AgentProfile {
        AgentProfile {
            id: self.id,
            rank: self.rank,
        }
    }

    pub fn current_answer(&self) -> Option<&str> {
        self.current_answer.as_deref()
    }

    pub fn confidence(&self) -> Option<Confidence> {
        self.confidence
    }

    pub fn reasoning(&self) -> Option<&str> {
        self.reasoning.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn rounds_used(&self) -> u32 {
        self.rounds_used
    }

    pub fn round_ceiling(&self) -> u32 {
        self.round_ceiling
    }

    /// Whether the agent holds a non-empty answer.
    pub fn has_answer(&self) -> bool {
        self.current_answer
            .as_deref()
            .is_some_and(|a| !a.trim().is_empty())
    }

    /// Whether the agent may take part in a debate right now.
    pub fn can_debate(&self) -> bool {
        self.active && self.has_answer()
    }

    // ==================== State Transitions ====================

    /// Record the answer produced by a solve call.
    pub fn record_solution(&mut self, answer: impl Into<String>) {
        self.current_answer = Some(answer.into());
    }

    /// Apply an update verdict. Returns `true` when the answer changed.
    ///
    /// A verdict that reports no change (or a changed verdict with an empty
    /// answer) leaves the agent untouched.
    pub fn apply_update(&mut self, verdict: &UpdateVerdict) -> bool {
        let Some(new_answer) = verdict.proposed_answer() else {
            return false;
        };
        self.current_answer = Some(new_answer.to_string());
        self.confidence = Some(verdict.confidence);
        self.reasoning = Some(verdict.reasoning.clone());
        true
    }

    /// Overwrite the answer with one taken from a higher-ranked agent.
    pub fn adopt_answer(&mut self, answer: impl Into<String>) {
        self.current_answer = Some(answer.into());
    }

    /// Count one completed debate round.
    pub fn record_round(&mut self) {
        self.rounds_used = self.rounds_used.saturating_add(1);
    }

    /// Re-evaluate activity. Once the ceiling is reached the agent stays
    /// inactive until [`Agent::reset`]. Returns the resulting activity.
    pub fn check_active(&mut self) -> bool {
        if self.rounds_used >= self.round_ceiling {
            self.active = false;
        }
        self.active
    }

    /// Return to the construction-time state, keeping id, rank and ceiling.
    pub fn reset(&mut self) {
        self.current_answer = None;
        self.confidence = None;
        self.reasoning = None;
        self.active = true;
        self.rounds_used = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::value_objects::RankRange;

    fn agent(id: u32, rank: u8, ceiling: u32) -> Agent {
        let id = AgentId::new(id);
        let rank = CapabilityRank::new(id, rank, &RankRange::default()).unwrap();
        Agent::with_round_ceiling(id, rank, ceiling)
    }

    #[test]
    fn test_new_agent_state() {
        let a = agent(1, 3, 10);
        assert!(a.is_active());
        assert_eq!(a.rounds_used(), 0);
        assert!(a.current_answer().is_none());
        assert!(!a.has_answer());
        assert!(!a.can_debate());
        assert_eq!(a.profile().rank.value(), 3);
    }

    #[test]
    fn test_default_ceiling() {
        let id = AgentId::new(1);
        let rank = CapabilityRank::new(id, 1, &RankRange::default()).unwrap();
        assert_eq!(Agent::new(id, rank).round_ceiling(), DEFAULT_ROUND_CEILING);
    }

    #[test]
    fn test_whitespace_answer_is_not_an_answer() {
        let mut a = agent(1, 1, 10);
        a.record_solution("   ");
        assert!(!a.has_answer());
        a.record_solution("42");
        assert!(a.can_debate());
    }

    #[test]
    fn test_inactivity_is_terminal_until_reset() {
        let mut a = agent(1, 1, 2);
        a.record_round();
        assert!(a.check_active());
        a.record_round();
        assert!(!a.check_active());

        for _ in 0..5 {
            assert!(!a.check_active());
        }

        a.reset();
        assert!(a.is_active());
        assert_eq!(a.rounds_used(), 0);
    }

    #[test]
    fn test_apply_update_changed() {
        let mut a = agent(1, 1, 10);
        a.record_solution("41");
        let verdict = UpdateVerdict::changed("42", Confidence::new(90).unwrap(), "arithmetic slip");

        assert!(a.apply_update(&verdict));
        assert_eq!(a.current_answer(), Some("42"));
        assert_eq!(a.confidence().unwrap().value(), 90);
        assert_eq!(a.reasoning(), Some("arithmetic slip"));
    }

    #[test]
    fn test_apply_update_unchanged_keeps_answer() {
        let mut a = agent(1, 1, 10);
        a.record_solution("41");

        assert!(!a.apply_update(&UpdateVerdict::unchanged()));
        assert_eq!(a.current_answer(), Some("41"));
        assert!(a.confidence().is_none());
    }

    #[test]
    fn test_reset_preserves_identity() {
        let mut a = agent(4, 5, 10);
        a.record_solution("x");
        a.apply_update(&UpdateVerdict::changed("y", Confidence::new(10).unwrap(), "r"));
        a.record_round();

        a.reset();

        assert_eq!(a.id(), AgentId::new(4));
        assert_eq!(a.rank().value(), 5);
        assert!(a.current_answer().is_none());
        assert!(a.confidence().is_none());
        assert!(a.reasoning().is_none());
    }
}
