//! Debate parameters - orchestration loop control.
//!
//! [`DebateParams`] groups the static limits that control the pairwise
//! protocol and the orchestrator sweep loop. These are application-layer
//! concerns, not domain policy.

use agora_domain::{DEFAULT_ROUND_CEILING, RankRange};
use serde::{Deserialize, Serialize};

/// Debate loop control parameters.
///
/// Used by [`DebatePairUseCase`](crate::use_cases::debate_pair::DebatePairUseCase),
/// [`RunDebateUseCase`](crate::use_cases::run_debate::RunDebateUseCase) and
/// [`RunSimulationUseCase`](crate::use_cases::run_simulation::RunSimulationUseCase).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateParams {
    /// Maximum rounds in a single pairwise debate before tie-break.
    pub max_rounds_per_pair: u32,
    /// Lifetime rounds an agent may spend before it goes inactive.
    pub round_ceiling: u32,
    /// Maximum orchestrator sweeps per problem. `None` runs until settled
    /// or stalled.
    pub max_sweeps: Option<usize>,
    /// Admissible capability ranks.
    pub rank_range: RankRange,
}

impl Default for DebateParams {
    fn default() -> Self {
        Self {
            max_rounds_per_pair: 3,
            round_ceiling: DEFAULT_ROUND_CEILING,
            max_sweeps: Some(50),
            rank_range: RankRange::default(),
        }
    }
}

impl DebateParams {
    // ==================== Builder Methods ====================

    pub fn with_max_rounds_per_pair(mut self, max: u32) -> Self {
        self.max_rounds_per_pair = max;
        self
    }

    pub fn with_round_ceiling(mut self, ceiling: u32) -> Self {
        self.round_ceiling = ceiling;
        self
    }

    pub fn with_max_sweeps(mut self, max: Option<usize>) -> Self {
        self.max_sweeps = max;
        self
    }

    pub fn with_rank_range(mut self, range: RankRange) -> Self {
        self.rank_range = range;
        self
    }

    /// Check limits that would make the protocol meaningless.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_rounds_per_pair == 0 {
            return Err("max_rounds_per_pair must be at least 1".to_string());
        }
        if self.round_ceiling == 0 {
            return Err("round_ceiling must be at least 1".to_string());
        }
        if self.max_sweeps == Some(0) {
            return Err("max_sweeps must be at least 1 when set".to_string());
        }
        Ok(())
    }
}
