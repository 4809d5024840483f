//! Solve All use case
//!
//! Every agent answers the problem independently. Calls run in parallel and
//! results are applied to the network once all of them return.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::progress::{DebateProgressNotifier, NoProgress};
use crate::ports::reasoner::{Reasoner, ReasonerError};
use agora_domain::util::preview;
use agora_domain::{AgentId, DomainError, Network, Problem};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Errors that can occur while agents solve
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("Agent {agent} failed to solve: {source}")]
    Reasoner {
        agent: AgentId,
        #[source]
        source: ReasonerError,
    },

    #[error("Agent {agent} returned an empty answer")]
    EmptyAnswer { agent: AgentId },

    #[error("Solve task failed: {0}")]
    Join(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Use case for the initial independent answers
pub struct SolveAllUseCase<R: Reasoner + 'static> {
    reasoner: Arc<R>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl<R: Reasoner + 'static> SolveAllUseCase<R> {
    pub fn new(reasoner: Arc<R>) -> Self {
        Self {
            reasoner,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        network: &mut Network,
        problem: &Problem,
    ) -> Result<(), SolveError> {
        self.execute_with_progress(network, problem, &NoProgress)
            .await
    }

    /// Solve with every agent. Answers of agents that succeeded are applied
    /// even when another agent fails; the first failure (lowest id) is
    /// returned.
    pub async fn execute_with_progress(
        &self,
        network: &mut Network,
        problem: &Problem,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<(), SolveError> {
        info!("Solving with {} agents", network.len());

        let mut join_set = JoinSet::new();
        for agent in network.agents() {
            let reasoner = Arc::clone(&self.reasoner);
            let profile = agent.profile();
            let problem = problem.clone();

            join_set.spawn(async move {
                let result = reasoner.solve(&profile, &problem).await;
                (profile.id, result)
            });
        }

        let mut failures = Vec::new();
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((agent, Ok(answer))) if answer.trim().is_empty() => {
                    warn!("Agent {} returned an empty answer", agent);
                    progress.on_solve_complete(agent, false);
                    failures.push(SolveError::EmptyAnswer { agent });
                }
                Ok((agent, Ok(answer))) => {
                    debug!("Agent {} answered: {}", agent, preview(&answer, 80));
                    progress.on_solve_complete(agent, true);
                    self.conversation_logger.log(ConversationEvent::new(
                        "initial_answer",
                        serde_json::json!({
                            "agent": agent.value(),
                            "answer": answer,
                        }),
                    ));
                    network.agent_mut(agent)?.record_solution(answer);
                }
                Ok((agent, Err(source))) => {
                    warn!("Agent {} failed to solve: {}", agent, source);
                    progress.on_solve_complete(agent, false);
                    failures.push(SolveError::Reasoner { agent, source });
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                    failures.push(SolveError::Join(e.to_string()));
                }
            }
        }

        failures.sort_by_key(|f| match f {
            SolveError::Reasoner { agent, .. } | SolveError::EmptyAnswer { agent } => {
                Some(*agent)
            }
            _ => None,
        });
        match failures.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
