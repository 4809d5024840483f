//! Debate outcome value objects.

use crate::agent::value_objects::AgentId;
use serde::{Deserialize, Serialize};

/// How a single pairwise debate ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebateEnd {
    /// A participant was inactive or had no answer; nothing happened
    Skipped,
    /// The reasoner judged both answers equivalent
    Consensus,
    /// Every round ran without consensus
    Exhausted,
    /// A participant hit its round ceiling before the round budget ran out
    Inactive,
}

impl DebateEnd {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebateEnd::Skipped => "skipped",
            DebateEnd::Consensus => "consensus",
            DebateEnd::Exhausted => "exhausted",
            DebateEnd::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for DebateEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Answer override applied when a debate exhausts its rounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieBreak {
    /// Higher-ranked agent whose answer was kept
    pub winner: AgentId,
    /// Lower-ranked agent whose answer was overwritten
    pub loser: AgentId,
    pub answer: String,
}

/// Result of one pairwise debate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateResult {
    pub initiator: AgentId,
    pub responder: AgentId,
    pub end: DebateEnd,
    /// Rounds that ran to completion without consensus
    pub rounds: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tie_break: Option<TieBreak>,
}

impl DebateResult {
    pub fn skipped(initiator: AgentId, responder: AgentId) -> Self {
        Self {
            initiator,
            responder,
            end: DebateEnd::Skipped,
            rounds: 0,
            tie_break: None,
        }
    }

    /// `true` only when the pair reached consensus.
    pub fn is_consensus(&self) -> bool {
        self.end == DebateEnd::Consensus
    }

    pub fn was_skipped(&self) -> bool {
        self.end == DebateEnd::Skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skipped_result() {
        let r = DebateResult::skipped(AgentId::new(1), AgentId::new(2));
        assert!(r.was_skipped());
        assert!(!r.is_consensus());
        assert_eq!(r.rounds, 0);
    }

    #[test]
    fn test_debate_end_display() {
        assert_eq!(DebateEnd::Consensus.to_string(), "consensus");
        assert_eq!(DebateEnd::Exhausted.to_string(), "exhausted");
    }

    #[test]
    fn test_tie_break_omitted_from_json_when_absent() {
        let r = DebateResult::skipped(AgentId::new(1), AgentId::new(2));
        let json = serde_json::to_value(&r).unwrap();
        assert!(json.get("tie_break").is_none());
        assert_eq!(json["end"], "skipped");
    }
}
