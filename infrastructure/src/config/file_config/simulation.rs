//! Simulation configuration from TOML (`[simulation]` section)

use super::ConfigValidationError;
use agora_application::DebateParams;
use agora_domain::{DEFAULT_ROUND_CEILING, RankRange};
use serde::{Deserialize, Serialize};

/// Debate limits and capability range
///
/// # Example
///
/// ```toml
/// [simulation]
/// max_rounds_per_pair = 3   # Rounds before a pair is tie-broken
/// round_ceiling = 10        # Lifetime rounds before an agent goes inactive
/// max_sweeps = 50           # Orchestrator sweeps per problem (0 = unlimited)
/// rank_min = 0
/// rank_max = 5
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSimulationConfig {
    pub max_rounds_per_pair: u32,
    pub round_ceiling: u32,
    /// `0` disables the sweep cap
    pub max_sweeps: usize,
    pub rank_min: u8,
    pub rank_max: u8,
}

impl Default for FileSimulationConfig {
    fn default() -> Self {
        Self {
            max_rounds_per_pair: 3,
            round_ceiling: DEFAULT_ROUND_CEILING,
            max_sweeps: 50,
            rank_min: 0,
            rank_max: 5,
        }
    }
}

impl FileSimulationConfig {
    pub fn rank_range(&self) -> Result<RankRange, ConfigValidationError> {
        RankRange::new(self.rank_min, self.rank_max).map_err(|_| {
            ConfigValidationError::InvalidRankRange {
                min: self.rank_min,
                max: self.rank_max,
            }
        })
    }

    /// Convert to application-level debate parameters.
    pub fn to_debate_params(&self) -> Result<DebateParams, ConfigValidationError> {
        if self.max_rounds_per_pair == 0 {
            return Err(ConfigValidationError::InvalidMaxRounds);
        }
        if self.round_ceiling == 0 {
            return Err(ConfigValidationError::InvalidRoundCeiling);
        }
        Ok(DebateParams::default()
            .with_max_rounds_per_pair(self.max_rounds_per_pair)
            .with_round_ceiling(self.round_ceiling)
            .with_max_sweeps((self.max_sweeps > 0).then_some(self.max_sweeps))
            .with_rank_range(self.rank_range()?))
    }
}
