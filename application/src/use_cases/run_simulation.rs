//! Run Simulation use case
//!
//! For every topology and every problem: reset the network, let every agent
//! solve, run the debate orchestrator, then grade each agent's final answer
//! against the reference.

use crate::config::DebateParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::progress::{DebateProgressNotifier, NoProgress};
use crate::ports::reasoner::Reasoner;
use crate::use_cases::debate_pair::DebateError;
use crate::use_cases::run_debate::RunDebateUseCase;
use crate::use_cases::solve_all::SolveAllUseCase;
use agora_domain::{
    AgentVerdict, DomainError, Network, ProblemOutcome, ProblemRecord, SimulationReport,
    TopologyReport, TopologySpec,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that stop a simulation before or while it runs
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("No topologies configured")]
    NoTopologies,

    #[error("No problems to simulate")]
    NoProblems,

    #[error("Invalid debate parameters: {0}")]
    InvalidParams(String),

    #[error("Topology '{name}' is invalid: {source}")]
    InvalidTopology {
        name: String,
        #[source]
        source: DomainError,
    },

    #[error(transparent)]
    Debate(#[from] DebateError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Input for the RunSimulation use case
#[derive(Debug, Clone)]
pub struct RunSimulationInput {
    pub topologies: Vec<TopologySpec>,
    pub problems: Vec<ProblemRecord>,
    pub params: DebateParams,
}

impl RunSimulationInput {
    pub fn new(topologies: Vec<TopologySpec>, problems: Vec<ProblemRecord>) -> Self {
        Self {
            topologies,
            problems,
            params: DebateParams::default(),
        }
    }

    pub fn with_params(mut self, params: DebateParams) -> Self {
        self.params = params;
        self
    }
}

/// Use case for comparing topologies over a problem set
pub struct RunSimulationUseCase<R: Reasoner + 'static> {
    reasoner: Arc<R>,
    solver: SolveAllUseCase<R>,
    debate: RunDebateUseCase<R>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl<R: Reasoner + 'static> RunSimulationUseCase<R> {
    pub fn new(reasoner: Arc<R>) -> Self {
        Self {
            solver: SolveAllUseCase::new(Arc::clone(&reasoner)),
            debate: RunDebateUseCase::new(Arc::clone(&reasoner)),
            reasoner,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.solver = self.solver.with_conversation_logger(Arc::clone(&logger));
        self.debate = self.debate.with_conversation_logger(Arc::clone(&logger));
        self.conversation_logger = logger;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunSimulationInput,
    ) -> Result<SimulationReport, SimulationError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunSimulationInput,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<SimulationReport, SimulationError> {
        if input.topologies.is_empty() {
            return Err(SimulationError::NoTopologies);
        }
        if input.problems.is_empty() {
            return Err(SimulationError::NoProblems);
        }
        input
            .params
            .validate()
            .map_err(SimulationError::InvalidParams)?;

        // Build every network up front so a bad topology fails before any
        // reasoner call is made.
        let mut networks = Vec::with_capacity(input.topologies.len());
        for spec in &input.topologies {
            let network = Network::with_round_ceiling(
                spec,
                &input.params.rank_range,
                input.params.round_ceiling,
            )
            .map_err(|source| SimulationError::InvalidTopology {
                name: spec.name.clone(),
                source,
            })?;
            networks.push(network);
        }

        info!(
            "Starting simulation: {} topologies x {} problems",
            networks.len(),
            input.problems.len()
        );

        let mut report = SimulationReport::new(input.problems.len());
        for mut network in networks {
            let topology = self
                .run_topology(&mut network, &input.problems, &input.params, progress)
                .await?;
            report.topologies.push(topology);
        }

        Ok(report)
    }

    async fn run_topology(
        &self,
        network: &mut Network,
        problems: &[ProblemRecord],
        params: &DebateParams,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<TopologyReport, SimulationError> {
        let mut report = TopologyReport::new(network.name(), network.len());
        info!(
            "Topology '{}': {} agents, {} edges",
            network.name(),
            network.len(),
            network.edges().len()
        );
        progress.on_topology_start(network.name(), network.len(), problems.len());

        for record in problems {
            progress.on_problem_start(record.index, problems.len());
            let outcome = self.run_problem(network, record, params, progress).await?;
            progress.on_problem_complete(&outcome);
            report.problems.push(outcome);
        }

        info!(
            "Topology '{}' finished: {}/{} correct ({:.1}%)",
            report.name,
            report.total_correct(),
            report.total_assessed(),
            report.accuracy()
        );
        progress.on_topology_complete(&report);
        Ok(report)
    }

    async fn run_problem(
        &self,
        network: &mut Network,
        record: &ProblemRecord,
        params: &DebateParams,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<ProblemOutcome, SimulationError> {
        network.reset();
        self.conversation_logger.log(ConversationEvent::new(
            "problem_start",
            serde_json::json!({
                "topology": network.name(),
                "index": record.index,
                "problem": record.problem.statement(),
            }),
        ));

        if let Err(e) = self
            .solver
            .execute_with_progress(network, &record.problem, progress)
            .await
        {
            warn!(
                "Problem {} on '{}' skipped: {}",
                record.index,
                network.name(),
                e
            );
            return Ok(ProblemOutcome::failed(record.index, e.to_string()));
        }

        let debate = self
            .debate
            .execute_with_progress(network, &record.problem, params, progress)
            .await?;

        let mut verdicts = Vec::with_capacity(network.len());
        for agent in network.agents() {
            let answer = agent.current_answer().map(str::to_string);
            let correct = match &answer {
                Some(answer) => match self
                    .reasoner
                    .assess_correctness(answer, &record.reference)
                    .await
                {
                    Ok(correct) => correct,
                    Err(e) => {
                        warn!(
                            "Assessment of agent {} on problem {} failed, counting as incorrect: {}",
                            agent.id(),
                            record.index,
                            e
                        );
                        false
                    }
                },
                None => false,
            };
            verdicts.push(AgentVerdict {
                agent: agent.id(),
                rank: agent.rank().value(),
                answer,
                correct,
                rounds_used: agent.rounds_used(),
            });
        }

        self.conversation_logger.log(ConversationEvent::new(
            "problem_result",
            serde_json::json!({
                "topology": network.name(),
                "index": record.index,
                "termination": debate.termination.as_str(),
                "correct": verdicts.iter().filter(|v| v.correct).count(),
                "agents": verdicts.len(),
            }),
        ));

        Ok(ProblemOutcome::completed(record.index, debate, verdicts))
    }
}
