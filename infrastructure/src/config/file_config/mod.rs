//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod dataset;
mod logging;
mod output;
mod reasoner;
mod simulation;
mod topologies;

pub use dataset::FileDatasetConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use reasoner::{FileModelTier, FileReasonerConfig};
pub use simulation::FileSimulationConfig;
pub use topologies::FileTopologiesConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("simulation.max_rounds_per_pair must be at least 1")]
    InvalidMaxRounds,

    #[error("simulation.round_ceiling must be at least 1")]
    InvalidRoundCeiling,

    #[error("simulation.rank_min ({min}) cannot exceed rank_max ({max})")]
    InvalidRankRange { min: u8, max: u8 },

    #[error("reasoner.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("{field}: model name cannot be empty")]
    EmptyModelName { field: String },

    #[error("unknown topology preset '{0}'")]
    UnknownPreset(String),

    #[error("topologies.size must be at least 1")]
    InvalidTopologySize,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Debate limits
    pub simulation: FileSimulationConfig,
    /// Chat-completions endpoint and model routing
    pub reasoner: FileReasonerConfig,
    /// Problem set
    pub dataset: FileDatasetConfig,
    /// Networks to compare
    pub topologies: FileTopologiesConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Conversation log
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.simulation.to_debate_params()?;

        // Timeout of 0 seconds doesn't make sense
        if let Some(0) = self.reasoner.timeout_seconds {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        for (field, model) in self.reasoner.model_fields() {
            if model.trim().is_empty() {
                return Err(ConfigValidationError::EmptyModelName { field });
            }
        }

        self.topologies
            .to_specs(&self.simulation.rank_range()?)
            .map(|_| ())
    }
}
