//! Debate Pair use case
//!
//! Runs the bounded pairwise protocol between two neighbouring agents:
//! message, reply, update (initiator first), equivalence check, and a
//! rank-based tie-break when every round runs out.
//!
//! The debate works on copies of both agents and a staged list of agreement
//! writes. Nothing reaches the [`Network`] unless the debate completes, so a
//! reasoner failure leaves agents and agreement exactly as they were.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::reasoner::{Reasoner, ReasonerError};
use agora_domain::util::preview;
use agora_domain::{
    Agent, AgentId, DebateEnd, DebateResult, DomainError, EntryKind, Network, Problem, TieBreak,
    Transcript,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that abort a debate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DebateError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Invalid debate parameters: {0}")]
    InvalidParams(String),

    #[error("Reasoner failed during debate {initiator} vs {responder}: {source}")]
    Reasoner {
        initiator: AgentId,
        responder: AgentId,
        #[source]
        source: ReasonerError,
    },
}

/// Agreement writes staged until the debate commits
#[derive(Default)]
struct StagedAgreement {
    writes: Vec<(AgentId, AgentId, bool)>,
}

impl StagedAgreement {
    fn set(&mut self, a: AgentId, b: AgentId, value: bool) {
        self.writes.push((a, b, value));
    }
}

/// One side of a debate: a working copy of the agent plus its neighbourhood
struct Side {
    agent: Agent,
    neighbors: BTreeSet<AgentId>,
}

impl Side {
    fn answer(&self) -> String {
        self.agent.current_answer().unwrap_or_default().to_string()
    }
}

/// Use case for debating one pair of agents
pub struct DebatePairUseCase<R: Reasoner + 'static> {
    reasoner: Arc<R>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl<R: Reasoner + 'static> DebatePairUseCase<R> {
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

    /// Debate `initiator` against `responder` on `problem`.
    ///
    /// Returns a skipped result (nothing mutated) when either side is
    /// inactive or has no answer. Consensus is reported via
    /// [`DebateResult::is_consensus`]. `max_rounds` must be at least 1.
    pub async fn execute(
        &self,
        network: &mut Network,
        initiator: AgentId,
        responder: AgentId,
        problem: &Problem,
        max_rounds: u32,
    ) -> Result<DebateResult, DebateError> {
        if max_rounds == 0 {
            return Err(DebateError::InvalidParams(
                "max_rounds must be at least 1".to_string(),
            ));
        }

        let mut a = Side {
            agent: network.agent(initiator)?.clone(),
            neighbors: network.neighbors(initiator)?.clone(),
        };
        let mut b = Side {
            agent: network.agent(responder)?.clone(),
            neighbors: network.neighbors(responder)?.clone(),
        };
        if !network.is_edge(initiator, responder) {
            return Err(DomainError::NotAnEdge(initiator, responder).into());
        }

        if !a.agent.can_debate() || !b.agent.can_debate() {
            debug!(
                "Skipping debate {} vs {}: participant inactive or without answer",
                initiator, responder
            );
            return Ok(DebateResult::skipped(initiator, responder));
        }

        info!("Debate {} vs {} started", initiator, responder);

        let mut staged = StagedAgreement::default();
        let result = self
            .run_rounds(&mut a, &mut b, &mut staged, problem, max_rounds)
            .await
            .map_err(|source| DebateError::Reasoner {
                initiator,
                responder,
                source,
            })?;

        // Commit: edges were validated above and neighbour sets come from the
        // topology, so every staged write targets a real edge.
        *network.agent_mut(initiator)? = a.agent;
        *network.agent_mut(responder)? = b.agent;
        for (x, y, value) in staged.writes {
            network.update_agreement(x, y, value)?;
        }

        info!(
            "Debate {} vs {} ended: {} after {} round(s)",
            initiator, responder, result.end, result.rounds
        );
        self.conversation_logger.log(ConversationEvent::new(
            "debate_result",
            serde_json::json!({
                "initiator": initiator.value(),
                "responder": responder.value(),
                "end": result.end.as_str(),
                "rounds": result.rounds,
                "tie_break": result.tie_break.as_ref().map(|t| t.winner.value()),
            }),
        ));

        Ok(result)
    }

    async fn run_rounds(
        &self,
        a: &mut Side,
        b: &mut Side,
        staged: &mut StagedAgreement,
        problem: &Problem,
        max_rounds: u32,
    ) -> Result<DebateResult, ReasonerError> {
        let (a_id, b_id) = (a.agent.id(), b.agent.id());
        let mut transcript = Transcript::new();
        let mut rounds = 0;
        let mut end = DebateEnd::Exhausted;

        for round in 1..=max_rounds {
            let a_answer = a.answer();
            let b_answer = b.answer();

            let message = self
                .reasoner
                .generate_message(
                    &a.agent.profile(),
                    problem,
                    &a_answer,
                    &b_answer,
                    &transcript,
                )
                .await?;
            let reply = self
                .reasoner
                .generate_reply(
                    &b.agent.profile(),
                    problem,
                    &b_answer,
                    &a_answer,
                    &message,
                    &transcript,
                )
                .await?;

            self.log_entry(a_id, b_id, round, EntryKind::Message, &message);
            self.log_entry(b_id, a_id, round, EntryKind::Reply, &reply);
            transcript.push(a_id, EntryKind::Message, message);
            transcript.push(b_id, EntryKind::Reply, reply);

            self.update(a, b_id, staged, problem, &transcript).await?;
            self.update(b, a_id, staged, problem, &transcript).await?;

            let (a_answer, b_answer) = (a.answer(), b.answer());
            let equivalent = self
                .reasoner
                .compare_equivalence(&a_answer, &b_answer)
                .await?;
            debug!(
                "Round {} equivalence {} vs {}: {}",
                round, a_id, b_id, equivalent
            );
            self.conversation_logger.log(ConversationEvent::new(
                "equivalence_check",
                serde_json::json!({
                    "agents": [a_id.value(), b_id.value()],
                    "round": round,
                    "equivalent": equivalent,
                }),
            ));

            if equivalent {
                staged.set(a_id, b_id, true);
                end = DebateEnd::Consensus;
                break;
            }

            staged.set(a_id, b_id, false);
            a.agent.record_round();
            b.agent.record_round();
            rounds += 1;

            let a_active = a.agent.check_active();
            let b_active = b.agent.check_active();
            if !(a_active && b_active) {
                if round < max_rounds {
                    end = DebateEnd::Inactive;
                }
                break;
            }
        }

        let tie_break = if end == DebateEnd::Exhausted {
            self.tie_break(a, b)
        } else {
            None
        };

        Ok(DebateResult {
            initiator: a_id,
            responder: b_id,
            end,
            rounds,
            tie_break,
        })
    }

    /// Let `side` reconsider its answer after the latest exchange.
    async fn update(
        &self,
        side: &mut Side,
        proposer: AgentId,
        staged: &mut StagedAgreement,
        problem: &Problem,
        transcript: &Transcript,
    ) -> Result<(), ReasonerError> {
        let id = side.agent.id();
        let current = side.answer();
        let verdict = match self
            .reasoner
            .evaluate_update(&side.agent.profile(), problem, &current, transcript)
            .await
        {
            Ok(verdict) => verdict,
            Err(e) if e.is_malformed() => {
                let reason = e.to_string();
                warn!("Agent {} produced a malformed update verdict: {}", id, reason);
                self.conversation_logger.log(ConversationEvent::new(
                    "update_rejected",
                    serde_json::json!({
                        "agent": id.value(),
                        "reason": reason,
                    }),
                ));
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        if !side.agent.apply_update(&verdict) {
            return Ok(());
        }

        info!(
            "Agent {} changed answer after debating {}: {}",
            id,
            proposer,
            preview(&verdict.new_answer, 60)
        );
        staged.set(id, proposer, true);
        for &neighbor in side.neighbors.iter().filter(|n| **n != proposer) {
            staged.set(id, neighbor, false);
        }
        self.conversation_logger.log(ConversationEvent::new(
            "answer_update",
            serde_json::json!({
                "agent": id.value(),
                "proposer": proposer.value(),
                "previous": current,
                "answer": verdict.new_answer,
                "confidence": verdict.confidence.value(),
                "reasoning": verdict.reasoning,
            }),
        ));
        Ok(())
    }

    /// Strictly higher rank wins; equal ranks leave both answers alone.
    fn tie_break(&self, a: &mut Side, b: &mut Side) -> Option<TieBreak> {
        let (winner, loser) = if a.agent.rank() > b.agent.rank() {
            (a, b)
        } else if b.agent.rank() > a.agent.rank() {
            (b, a)
        } else {
            debug!(
                "Tie-break {} vs {}: equal rank, answers unchanged",
                a.agent.id(),
                b.agent.id()
            );
            return None;
        };

        let answer = winner.answer();
        loser.agent.adopt_answer(answer.clone());
        info!(
            "Tie-break: agent {} (rank {}) overrides agent {} (rank {})",
            winner.agent.id(),
            winner.agent.rank().value(),
            loser.agent.id(),
            loser.agent.rank().value()
        );
        self.conversation_logger.log(ConversationEvent::new(
            "tie_break",
            serde_json::json!({
                "winner": winner.agent.id().value(),
                "loser": loser.agent.id().value(),
                "answer": answer,
            }),
        ));

        Some(TieBreak {
            winner: winner.agent.id(),
            loser: loser.agent.id(),
            answer,
        })
    }

    fn log_entry(
        &self,
        speaker: AgentId,
        listener: AgentId,
        round: u32,
        kind: EntryKind,
        text: &str,
    ) {
        let event_type = match kind {
            EntryKind::Message => "debate_message",
            EntryKind::Reply => "debate_reply",
        };
        self.conversation_logger.log(ConversationEvent::new(
            event_type,
            serde_json::json!({
                "speaker": speaker.value(),
                "listener": listener.value(),
                "round": round,
                "text": text,
            }),
        ));
    }
}
