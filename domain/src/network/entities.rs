//! Network aggregate: agents, topology, and agreement.

use super::agreement::{AgreementMatrix, CanonicalPair};
use super::topology::{Topology, TopologySpec};
use crate::agent::entities::{Agent, DEFAULT_ROUND_CEILING};
use crate::agent::value_objects::{AgentId, CapabilityRank, RankRange};
use crate::core::error::DomainError;
use std::collections::{BTreeMap, BTreeSet};

/// A fixed population of agents wired into an undirected topology.
///
/// The network owns every agent. Edges are fixed at construction; only
/// agent state and agreement flags change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    name: String,
    agents: BTreeMap<AgentId, Agent>,
    topology: Topology,
    agreement: AgreementMatrix,
}

impl Network {
    /// Build a network with the default round ceiling.
    pub fn new(spec: &TopologySpec, ranks: &RankRange) -> Result<Self, DomainError> {
        Self::with_round_ceiling(spec, ranks, DEFAULT_ROUND_CEILING)
    }

    /// Build a network; every agent gets the same round ceiling.
    pub fn with_round_ceiling(
        spec: &TopologySpec,
        ranks: &RankRange,
        round_ceiling: u32,
    ) -> Result<Self, DomainError> {
        if spec.nodes.is_empty() {
            return Err(DomainError::EmptyTopology(spec.name.clone()));
        }
        let topology = Topology::new(spec.nodes.iter().map(|n| n.id), &spec.edges)?;

        let agents = spec
            .nodes
            .iter()
            .map(|node| {
                let rank = CapabilityRank::new(node.id, node.capability, ranks)?;
                Ok((node.id, Agent::with_round_ceiling(node.id, rank, round_ceiling)))
            })
            .collect::<Result<BTreeMap<_, _>, DomainError>>()?;

        let agreement = AgreementMatrix::new(topology.edges());

        Ok(Self {
            name: spec.name.clone(),
            agents,
            topology,
            agreement,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ==================== Agents ====================

    pub fn agent(&self, id: AgentId) -> Result<&Agent, DomainError> {
        self.agents.get(&id).ok_or(DomainError::UnknownAgent(id))
    }

    pub fn agent_mut(&mut self, id: AgentId) -> Result<&mut Agent, DomainError> {
        self.agents.get_mut(&id).ok_or(DomainError::UnknownAgent(id))
    }

    /// Agents in ascending id order.
    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    pub fn agent_ids(&self) -> Vec<AgentId> {
        self.agents.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.agents.values().filter(|a| a.is_active()).count()
    }

    /// The answer every agent holds, if they all hold the same non-empty one.
    pub fn consensus_answer(&self) -> Option<&str> {
        let mut answers = self.agents.values().map(|a| a.current_answer());
        let first = answers.next()??;
        if first.trim().is_empty() {
            return None;
        }
        answers.all(|a| a == Some(first)).then_some(first)
    }

    // ==================== Topology ====================

    pub fn neighbors(&self, id: AgentId) -> Result<&BTreeSet<AgentId>, DomainError> {
        self.topology.neighbors(id)
    }

    pub fn edges(&self) -> Vec<CanonicalPair> {
        self.topology.edges()
    }

    pub fn is_edge(&self, a: AgentId, b: AgentId) -> bool {
        self.topology.is_edge(a, b)
    }

    // ==================== Agreement ====================

    /// Write agreement for the canonical pair `(a, b)`.
    pub fn update_agreement(
        &mut self,
        a: AgentId,
        b: AgentId,
        value: bool,
    ) -> Result<(), DomainError> {
        self.ensure_known(a)?;
        self.ensure_known(b)?;
        if !self.agreement.set(a, b, value) {
            return Err(DomainError::NotAnEdge(a, b));
        }
        Ok(())
    }

    /// Last-known agreement between `a` and `b` (`None` for non-edges).
    pub fn agreement(&self, a: AgentId, b: AgentId) -> Result<Option<bool>, DomainError> {
        self.ensure_known(a)?;
        self.ensure_known(b)?;
        Ok(self.agreement.get(a, b))
    }

    /// `true` iff the canonical entry is absent or `false`.
    pub fn agents_disagree(&self, a: AgentId, b: AgentId) -> Result<bool, DomainError> {
        Ok(self.agreement(a, b)? != Some(true))
    }

    /// Settled iff every edge between two active agents has agreement `true`.
    ///
    /// Edges with an inactive endpoint are ignored; zero or one active agents
    /// is trivially settled.
    pub fn is_settled(&self) -> bool {
        if self.active_count() <= 1 {
            return true;
        }
        self.agreement.iter().all(|(pair, agreed)| {
            agreed || !(self.is_active(pair.low()) && self.is_active(pair.high()))
        })
    }

    /// Reset every agent and all agreement; topology is preserved.
    pub fn reset(&mut self) {
        self.agents.values_mut().for_each(Agent::reset);
        self.agreement.clear();
    }

    fn is_active(&self, id: AgentId) -> bool {
        self.agents.get(&id).is_some_and(Agent::is_active)
    }

    fn ensure_known(&self, id: AgentId) -> Result<(), DomainError> {
        if self.topology.contains(id) {
            Ok(())
        } else {
            Err(DomainError::UnknownAgent(id))
        }
    }
}
