//! Run Debate use case
//!
//! Drives the network toward settlement by sweeping agents in ascending id
//! order and debating every active, disagreeing neighbour.

use crate::config::DebateParams;
use crate::ports::conversation_logger::ConversationLogger;
use crate::ports::progress::{DebateProgressNotifier, NoProgress};
use crate::ports::reasoner::Reasoner;
use crate::use_cases::debate_pair::{DebateError, DebatePairUseCase};
use agora_domain::{AgentId, DebateOutcome, Network, Problem, Termination};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Use case for running the orchestrator loop on one problem
pub struct RunDebateUseCase<R: Reasoner + 'static> {
    debate: DebatePairUseCase<R>,
}

impl<R: Reasoner + 'static> RunDebateUseCase<R> {
    pub fn new(reasoner: Arc<R>) -> Self {
        Self {
            debate: DebatePairUseCase::new(reasoner),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.debate = self.debate.with_conversation_logger(logger);
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        network: &mut Network,
        problem: &Problem,
        params: &DebateParams,
    ) -> Result<DebateOutcome, DebateError> {
        self.execute_with_progress(network, problem, params, &NoProgress)
            .await
    }

    /// Sweep until settled, stalled, or out of sweeps.
    ///
    /// Reasoner failures inside a debate are counted and logged; the pair is
    /// retried on the next sweep. Invalid parameters and domain errors
    /// propagate.
    pub async fn execute_with_progress(
        &self,
        network: &mut Network,
        problem: &Problem,
        params: &DebateParams,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<DebateOutcome, DebateError> {
        params.validate().map_err(DebateError::InvalidParams)?;

        let mut outcome = DebateOutcome::new(Termination::Settled);

        loop {
            if network.is_settled() {
                outcome.termination = Termination::Settled;
                break;
            }
            if let Some(max) = params.max_sweeps
                && outcome.sweeps >= max
            {
                warn!("Sweep limit {} reached without settling", max);
                outcome.termination = Termination::SweepLimitReached;
                break;
            }

            outcome.sweeps += 1;
            progress.on_sweep_start(outcome.sweeps);
            debug!(
                "Sweep {} ({} active agents)",
                outcome.sweeps,
                network.active_count()
            );

            let attempted = self
                .sweep(network, problem, params, progress, &mut outcome)
                .await?;

            if attempted == 0 && !network.is_settled() {
                warn!(
                    "Sweep {} could not run any debate; network is stalled",
                    outcome.sweeps
                );
                outcome.termination = Termination::Stalled;
                break;
            }
        }

        info!(
            "Debate finished: {} after {} sweep(s), {} debate(s), {} consensus, {} tie-break(s), {} failure(s)",
            outcome.termination,
            outcome.sweeps,
            outcome.debates,
            outcome.consensus,
            outcome.tie_breaks,
            outcome.failures
        );
        Ok(outcome)
    }

    /// One pass over every agent. Returns how many debates were attempted
    /// (completed or failed); precondition no-ops are not counted.
    async fn sweep(
        &self,
        network: &mut Network,
        problem: &Problem,
        params: &DebateParams,
        progress: &dyn DebateProgressNotifier,
        outcome: &mut DebateOutcome,
    ) -> Result<usize, DebateError> {
        let mut attempted = 0;

        for id in network.agent_ids() {
            let neighbors: Vec<AgentId> = network.neighbors(id)?.iter().copied().collect();
            for neighbor in neighbors {
                if !network.agent(id)?.is_active() {
                    break;
                }
                if !network.agent(neighbor)?.is_active()
                    || !network.agents_disagree(id, neighbor)?
                {
                    continue;
                }

                match self
                    .debate
                    .execute(network, id, neighbor, problem, params.max_rounds_per_pair)
                    .await
                {
                    Ok(result) if result.was_skipped() => {}
                    Ok(result) => {
                        attempted += 1;
                        outcome.debates += 1;
                        if result.is_consensus() {
                            outcome.consensus += 1;
                        }
                        if result.tie_break.is_some() {
                            outcome.tie_breaks += 1;
                        }
                        progress.on_debate_complete(&result);
                    }
                    Err(DebateError::Reasoner { source, .. }) => {
                        attempted += 1;
                        outcome.failures += 1;
                        warn!(
                            "Debate {} vs {} failed, retrying next sweep: {}",
                            id, neighbor, source
                        );
                        progress.on_debate_failed(id, neighbor, &source.to_string());
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        Ok(attempted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedReasoner, network, seed_answers};

    fn problem() -> Problem {
        Problem::new("Janet has 16 eggs and eats 3. How many are left?").unwrap()
    }

    fn chain() -> Network {
        network(
            &[(1, 1), (2, 2), (3, 3), (4, 4), (5, 5)],
            &[(1, 2), (2, 3), (3, 4), (4, 5)],
            10,
        )
    }

    #[tokio::test]
    async fn test_chain_settles_with_shared_answer() {
        let mut net = chain();
        seed_answers(
            &mut net,
            &[(1, "13"), (2, "12"), (3, "14"), (4, "19"), (5, "3")],
        );
        // Replier adopts the opener's answer in round 2, so equivalence
        // first holds on round 2 of every debate.
        let reasoner = Arc::new(ScriptedReasoner::new().adopting_after(4));
        let use_case = RunDebateUseCase::new(reasoner);

        let outcome = use_case
            .execute(&mut net, &problem(), &DebateParams::default())
            .await
            .unwrap();

        assert_eq!(outcome.termination, Termination::Settled);
        assert!(net.is_settled());
        assert_eq!(net.consensus_answer(), Some("13"));
        assert_eq!(outcome.debates, 4);
        assert_eq!(outcome.consensus, 4);
        assert_eq!(outcome.tie_breaks, 0);
        assert_eq!(outcome.failures, 0);
        assert_eq!(outcome.sweeps, 1);
    }

    #[tokio::test]
    async fn test_already_settled_network_runs_no_sweep() {
        let mut net = network(&[(1, 1), (2, 2)], &[(1, 2)], 10);
        seed_answers(&mut net, &[(1, "18"), (2, "18")]);
        net.update_agreement(AgentId::new(1), AgentId::new(2), true)
            .unwrap();
        let reasoner = Arc::new(ScriptedReasoner::new());
        let use_case = RunDebateUseCase::new(Arc::clone(&reasoner));

        let outcome = use_case
            .execute(&mut net, &problem(), &DebateParams::default())
            .await
            .unwrap();

        assert_eq!(outcome.termination, Termination::Settled);
        assert_eq!(outcome.sweeps, 0);
        assert_eq!(reasoner.calls.lock().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_agents_without_answers_stall() {
        let mut net = network(&[(1, 1), (2, 2)], &[(1, 2)], 10);
        let use_case = RunDebateUseCase::new(Arc::new(ScriptedReasoner::new()));

        let outcome = use_case
            .execute(&mut net, &problem(), &DebateParams::default())
            .await
            .unwrap();

        assert_eq!(outcome.termination, Termination::Stalled);
        assert_eq!(outcome.sweeps, 1);
        assert_eq!(outcome.debates, 0);
    }

    #[tokio::test]
    async fn test_round_ceiling_terminates_stubborn_agents() {
        // Equal ranks never tie-break and string answers never match, so
        // only the ceiling ends the debate.
        let mut net = network(&[(1, 2), (2, 2)], &[(1, 2)], 4);
        seed_answers(&mut net, &[(1, "18"), (2, "20")]);
        let use_case = RunDebateUseCase::new(Arc::new(ScriptedReasoner::new()));
        // The ceiling is fixed on the agents when the network is built
        let params = DebateParams::default().with_max_rounds_per_pair(3);

        let outcome = use_case
            .execute(&mut net, &problem(), &params)
            .await
            .unwrap();

        // Agent 1's debate exhausts 3 rounds, agent 2's reverse debate hits
        // the ceiling after 1 more; with nobody active the network settles.
        assert_eq!(outcome.termination, Termination::Settled);
        assert_eq!(outcome.sweeps, 1);
        assert_eq!(outcome.debates, 2);
        assert_eq!(net.active_count(), 0);
        assert_eq!(net.agent(AgentId::new(1)).unwrap().rounds_used(), 4);
    }

    #[tokio::test]
    async fn test_zero_rounds_rejected_before_sweeping() {
        let mut net = network(&[(1, 1), (2, 4)], &[(1, 2)], 10);
        seed_answers(&mut net, &[(1, "18"), (2, "20")]);
        let before = net.clone();
        let reasoner = Arc::new(ScriptedReasoner::new());
        let use_case = RunDebateUseCase::new(Arc::clone(&reasoner));
        let params = DebateParams::default()
            .with_max_rounds_per_pair(0)
            .with_max_sweeps(None);

        let err = use_case
            .execute(&mut net, &problem(), &params)
            .await
            .unwrap_err();

        assert!(matches!(err, DebateError::InvalidParams(_)));
        assert_eq!(net, before);
        assert!(reasoner.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sweep_limit_reached() {
        let mut net = network(&[(1, 2), (2, 2)], &[(1, 2)], 100);
        seed_answers(&mut net, &[(1, "18"), (2, "20")]);
        let use_case = RunDebateUseCase::new(Arc::new(ScriptedReasoner::new()));
        let params = DebateParams::default()
            .with_max_rounds_per_pair(1)
            .with_max_sweeps(Some(3));

        let outcome = use_case
            .execute(&mut net, &problem(), &params)
            .await
            .unwrap();

        assert_eq!(outcome.termination, Termination::SweepLimitReached);
        assert_eq!(outcome.sweeps, 3);
        // Both directions of the pair debate once per sweep
        assert_eq!(outcome.debates, 6);
    }

    #[tokio::test]
    async fn test_failed_debates_are_counted_and_retried() {
        let mut net = network(&[(1, 1), (2, 2)], &[(1, 2)], 10);
        seed_answers(&mut net, &[(1, "18"), (2, "20")]);
        let reasoner = Arc::new(ScriptedReasoner::new().failing_messages());
        let use_case = RunDebateUseCase::new(Arc::clone(&reasoner));
        let params = DebateParams::default().with_max_sweeps(Some(2));

        let outcome = use_case
            .execute(&mut net, &problem(), &params)
            .await
            .unwrap();

        assert_eq!(outcome.termination, Termination::SweepLimitReached);
        assert_eq!(outcome.failures, 4);
        assert_eq!(outcome.debates, 0);
        assert_eq!(reasoner.call_count("message"), 4);
        assert_eq!(
            net.agent(AgentId::new(1)).unwrap().current_answer(),
            Some("18")
        );
    }
}
