//! Simulation value objects - result types for debate runs.
//!
//! - [`DebateOutcome`] - How one orchestrated run over a network ended
//! - [`ProblemOutcome`] - Final answers and correctness for one problem
//! - [`TopologyReport`] - Aggregated correctness for one topology
//! - [`SimulationReport`] - Every topology in a simulation

use crate::agent::value_objects::AgentId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Why the orchestrator stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Every edge between active agents agrees
    Settled,
    /// The configured sweep cap was hit first
    SweepLimitReached,
    /// A full sweep found no debate that could run
    Stalled,
}

impl Termination {
    pub fn as_str(&self) -> &'static str {
        match self {
            Termination::Settled => "settled",
            Termination::SweepLimitReached => "sweep_limit_reached",
            Termination::Stalled => "stalled",
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Termination::Settled)
    }
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Counters for one orchestrated debate run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateOutcome {
    pub termination: Termination,
    /// Full sweeps over the agent set
    pub sweeps: usize,
    /// Debates that actually ran (skipped no-ops excluded)
    pub debates: usize,
    pub consensus: usize,
    pub tie_breaks: usize,
    /// Debates aborted by a reasoner failure
    pub failures: usize,
}

impl DebateOutcome {
    pub fn new(termination: Termination) -> Self {
        Self {
            termination,
            sweeps: 0,
            debates: 0,
            consensus: 0,
            tie_breaks: 0,
            failures: 0,
        }
    }
}

/// Final state of one agent after a problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentVerdict {
    pub agent: AgentId,
    pub rank: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    pub correct: bool,
    pub rounds_used: u32,
}

/// Result of running one problem on one topology
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemOutcome {
    /// 1-based problem index
    pub index: usize,
    /// `None` when the solve phase failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debate: Option<DebateOutcome>,
    pub agents: Vec<AgentVerdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProblemOutcome {
    pub fn completed(index: usize, debate: DebateOutcome, agents: Vec<AgentVerdict>) -> Self {
        Self {
            index,
            debate: Some(debate),
            agents,
            error: None,
        }
    }

    pub fn failed(index: usize, error: impl Into<String>) -> Self {
        Self {
            index,
            debate: None,
            agents: Vec::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    pub fn correct_count(&self) -> usize {
        self.agents.iter().filter(|a| a.correct).count()
    }
}

/// Correctness summary for one topology
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyReport {
    pub name: String,
    pub agent_count: usize,
    pub problems: Vec<ProblemOutcome>,
}

impl TopologyReport {
    pub fn new(name: impl Into<String>, agent_count: usize) -> Self {
        Self {
            name: name.into(),
            agent_count,
            problems: Vec::new(),
        }
    }

    /// Problems that completed and were scored.
    pub fn scored(&self) -> impl Iterator<Item = &ProblemOutcome> {
        self.problems.iter().filter(|p| !p.is_failed())
    }

    pub fn failed_count(&self) -> usize {
        self.problems.iter().filter(|p| p.is_failed()).count()
    }

    pub fn total_correct(&self) -> usize {
        self.scored().map(ProblemOutcome::correct_count).sum()
    }

    pub fn total_assessed(&self) -> usize {
        self.scored().count() * self.agent_count
    }

    /// Percentage of correct agent answers over scored problems.
    pub fn accuracy(&self) -> f64 {
        let total = self.total_assessed();
        if total == 0 {
            return 0.0;
        }
        self.total_correct() as f64 / total as f64 * 100.0
    }

    /// Correct answers per agent across scored problems.
    pub fn per_agent_correct(&self) -> BTreeMap<AgentId, usize> {
        let mut counts = BTreeMap::new();
        for problem in self.scored() {
            for verdict in &problem.agents {
                *counts.entry(verdict.agent).or_insert(0) += usize::from(verdict.correct);
            }
        }
        counts
    }
}

/// Complete simulation result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub problem_count: usize,
    pub topologies: Vec<TopologyReport>,
}

impl SimulationReport {
    pub fn new(problem_count: usize) -> Self {
        Self {
            problem_count,
            topologies: Vec::new(),
        }
    }

    /// The topology with the highest accuracy (first wins on ties).
    pub fn best_topology(&self) -> Option<&TopologyReport> {
        self.topologies.iter().fold(None, |best, t| match best {
            Some(b) if b.accuracy() >= t.accuracy() => Some(b),
            _ => Some(t),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(agent: u32, correct: bool) -> AgentVerdict {
        AgentVerdict {
            agent: AgentId::new(agent),
            rank: agent as u8,
            answer: Some("18".to_string()),
            correct,
            rounds_used: 1,
        }
    }

    fn report(name: &str, correct: &[bool]) -> TopologyReport {
        let mut r = TopologyReport::new(name, correct.len());
        let agents = correct
            .iter()
            .enumerate()
            .map(|(i, &c)| verdict(i as u32 + 1, c))
            .collect();
        r.problems.push(ProblemOutcome::completed(
            1,
            DebateOutcome::new(Termination::Settled),
            agents,
        ));
        r
    }

    #[test]
    fn test_accuracy_excludes_failed_problems() {
        let mut r = report("Chain", &[true, true, false, true]);
        r.problems.push(ProblemOutcome::failed(2, "solve failed"));

        assert_eq!(r.failed_count(), 1);
        assert_eq!(r.total_correct(), 3);
        assert_eq!(r.total_assessed(), 4);
        assert!((r.accuracy() - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_report_accuracy_is_zero() {
        assert_eq!(TopologyReport::new("Empty", 3).accuracy(), 0.0);
    }

    #[test]
    fn test_per_agent_correct() {
        let r = report("Pair", &[true, false]);
        let counts = r.per_agent_correct();
        assert_eq!(counts[&AgentId::new(1)], 1);
        assert_eq!(counts[&AgentId::new(2)], 0);
    }

    #[test]
    fn test_best_topology() {
        let mut sim = SimulationReport::new(1);
        sim.topologies.push(report("A", &[true, false]));
        sim.topologies.push(report("B", &[true, true]));
        sim.topologies.push(report("C", &[true, true]));
        assert_eq!(sim.best_topology().unwrap().name, "B");
    }

    #[test]
    fn test_termination_serializes_snake_case() {
        let json = serde_json::to_string(&Termination::SweepLimitReached).unwrap();
        assert_eq!(json, "\"sweep_limit_reached\"");
    }
}
