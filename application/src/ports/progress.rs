//! Progress notification port
//!
//! Defines the interface for reporting progress during a simulation.

use agora_domain::{AgentId, DebateResult, ProblemOutcome, TopologyReport};

/// Callback for progress updates during a simulation
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain lines, etc.)
pub trait DebateProgressNotifier: Send + Sync {
    /// Called when a topology starts
    fn on_topology_start(&self, name: &str, agents: usize, problems: usize);

    /// Called when a problem starts on the current topology
    fn on_problem_start(&self, index: usize, total: usize);

    /// Called when a problem finishes (completed or failed)
    fn on_problem_complete(&self, outcome: &ProblemOutcome);

    /// Called when a topology finishes
    fn on_topology_complete(&self, report: &TopologyReport);

    // ==================== Fine-grained Callbacks ====================

    /// Called when one agent's solve call returns
    fn on_solve_complete(&self, _agent: AgentId, _success: bool) {}

    /// Called at the start of each orchestrator sweep (1-based)
    fn on_sweep_start(&self, _sweep: usize) {}

    /// Called after a debate that actually ran
    fn on_debate_complete(&self, _result: &DebateResult) {}

    /// Called when a debate aborts on a reasoner failure
    fn on_debate_failed(&self, _initiator: AgentId, _responder: AgentId, _error: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl DebateProgressNotifier for NoProgress {
    fn on_topology_start(&self, _name: &str, _agents: usize, _problems: usize) {}
    fn on_problem_start(&self, _index: usize, _total: usize) {}
    fn on_problem_complete(&self, _outcome: &ProblemOutcome) {}
    fn on_topology_complete(&self, _report: &TopologyReport) {}
}
