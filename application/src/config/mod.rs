//! Application-level configuration.
//!
//! - [`DebateParams`] - protocol and orchestration limits (rounds, ceiling, sweeps)

pub mod debate_params;

pub use debate_params::DebateParams;
