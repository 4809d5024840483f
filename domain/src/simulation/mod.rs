//! Simulation result types.

pub mod value_objects;

pub use value_objects::{
    AgentVerdict, DebateOutcome, ProblemOutcome, SimulationReport, Termination, TopologyReport,
};
