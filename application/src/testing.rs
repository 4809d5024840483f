//! Scripted reasoner shared by the use case tests.

use crate::ports::reasoner::{Reasoner, ReasonerError};
use agora_domain::{
    AgentId, AgentProfile, Confidence, Network, NodeSpec, Problem, RankRange, TopologySpec,
    Transcript, UpdateVerdict,
};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

/// Deterministic reasoner driven by queued scripts with simple fallbacks.
///
/// - solve: per-agent answer, else `answer-{id}`
/// - message / reply: the speaker's own answer
/// - update: next scripted verdict, else the replier adopts the opener's
///   message once the transcript holds `adopt_after` entries
/// - equivalence: next scripted value, else string equality
/// - correctness: string equality with the reference
#[derive(Default)]
pub struct ScriptedReasoner {
    pub answers: HashMap<AgentId, String>,
    pub failing_solvers: HashSet<AgentId>,
    pub adopt_after: Option<usize>,
    pub updates: Mutex<VecDeque<Result<UpdateVerdict, ReasonerError>>>,
    pub equivalence: Mutex<VecDeque<Result<bool, ReasonerError>>>,
    pub fail_messages: bool,
    pub calls: Mutex<Vec<&'static str>>,
}

impl ScriptedReasoner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answer(mut self, id: u32, answer: &str) -> Self {
        self.answers.insert(AgentId::new(id), answer.to_string());
        self
    }

    pub fn with_failing_solver(mut self, id: u32) -> Self {
        self.failing_solvers.insert(AgentId::new(id));
        self
    }

    pub fn adopting_after(mut self, entries: usize) -> Self {
        self.adopt_after = Some(entries);
        self
    }

    pub fn with_updates(self, updates: Vec<Result<UpdateVerdict, ReasonerError>>) -> Self {
        *self.updates.lock().unwrap() = updates.into();
        self
    }

    pub fn with_equivalence(self, values: Vec<Result<bool, ReasonerError>>) -> Self {
        *self.equivalence.lock().unwrap() = values.into();
        self
    }

    pub fn failing_messages(mut self) -> Self {
        self.fail_messages = true;
        self
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == name).count()
    }

    fn record(&self, name: &'static str) {
        self.calls.lock().unwrap().push(name);
    }
}

#[async_trait]
impl Reasoner for ScriptedReasoner {
    async fn solve(
        &self,
        speaker: &AgentProfile,
        _problem: &Problem,
    ) -> Result<String, ReasonerError> {
        self.record("solve");
        if self.failing_solvers.contains(&speaker.id) {
            return Err(ReasonerError::RequestFailed("solver offline".to_string()));
        }
        Ok(self
            .answers
            .get(&speaker.id)
            .cloned()
            .unwrap_or_else(|| format!("answer-{}", speaker.id)))
    }

    async fn generate_message(
        &self,
        _speaker: &AgentProfile,
        _problem: &Problem,
        own_answer: &str,
        _other_answer: &str,
        _history: &Transcript,
    ) -> Result<String, ReasonerError> {
        self.record("message");
        if self.fail_messages {
            return Err(ReasonerError::Timeout);
        }
        Ok(own_answer.to_string())
    }

    async fn generate_reply(
        &self,
        _speaker: &AgentProfile,
        _problem: &Problem,
        own_answer: &str,
        _other_answer: &str,
        _incoming: &str,
        _history: &Transcript,
    ) -> Result<String, ReasonerError> {
        self.record("reply");
        Ok(own_answer.to_string())
    }

    async fn evaluate_update(
        &self,
        speaker: &AgentProfile,
        _problem: &Problem,
        current_answer: &str,
        history: &Transcript,
    ) -> Result<UpdateVerdict, ReasonerError> {
        self.record("update");
        if let Some(next) = self.updates.lock().unwrap().pop_front() {
            return next;
        }
        let entries = history.entries();
        if let Some(after) = self.adopt_after
            && entries.len() >= after
            && entries.len() >= 2
        {
            let opener = &entries[entries.len() - 2];
            let replier = &entries[entries.len() - 1];
            if speaker.id == replier.speaker && opener.content != current_answer {
                return Ok(UpdateVerdict::changed(
                    opener.content.clone(),
                    Confidence::new(90).unwrap(),
                    "persuaded by the opening message",
                ));
            }
        }
        Ok(UpdateVerdict::unchanged())
    }

    async fn compare_equivalence(
        &self,
        answer_a: &str,
        answer_b: &str,
    ) -> Result<bool, ReasonerError> {
        self.record("equivalence");
        if let Some(next) = self.equivalence.lock().unwrap().pop_front() {
            return next;
        }
        Ok(answer_a == answer_b)
    }

    async fn assess_correctness(
        &self,
        agent_answer: &str,
        reference_answer: &str,
    ) -> Result<bool, ReasonerError> {
        self.record("correctness");
        Ok(agent_answer == reference_answer)
    }
}

/// Build a network from `(id, rank)` nodes and edges with the given ceiling.
pub fn network(nodes: &[(u32, u8)], edges: &[(u32, u32)], ceiling: u32) -> Network {
    let spec = TopologySpec::new(
        "test",
        nodes
            .iter()
            .map(|&(id, rank)| NodeSpec::new(id, rank))
            .collect(),
        edges.to_vec(),
    );
    Network::with_round_ceiling(&spec, &RankRange::default(), ceiling).unwrap()
}

/// Give each listed agent an answer directly.
pub fn seed_answers(network: &mut Network, answers: &[(u32, &str)]) {
    for &(id, answer) in answers {
        network
            .agent_mut(AgentId::new(id))
            .unwrap()
            .record_solution(answer);
    }
}
