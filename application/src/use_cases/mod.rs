//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod debate_pair;
pub mod run_debate;
pub mod run_simulation;
pub mod solve_all;
