//! Topology description and adjacency.
//!
//! [`TopologySpec`] is the serializable construction input (also the shape of
//! `[[topologies.custom]]` config entries). [`Topology`] is the validated,
//! immutable adjacency built from it.

use super::agreement::CanonicalPair;
use crate::agent::value_objects::AgentId;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Node record: an agent id and its capability rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: AgentId,
    pub capability: u8,
}

impl NodeSpec {
    pub fn new(id: u32, capability: u8) -> Self {
        Self {
            id: AgentId::new(id),
            capability,
        }
    }
}

/// Construction input for a network
///
/// # Example
///
/// ```toml
/// name = "Triangle"
/// nodes = [{ id = 1, capability = 1 }, { id = 2, capability = 3 }, { id = 3, capability = 5 }]
/// edges = [[1, 2], [2, 3], [3, 1]]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologySpec {
    pub name: String,
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub edges: Vec<(AgentId, AgentId)>,
}

impl TopologySpec {
    pub fn new(name: impl Into<String>, nodes: Vec<NodeSpec>, edges: Vec<(u32, u32)>) -> Self {
        Self {
            name: name.into(),
            nodes,
            edges: edges
                .into_iter()
                .map(|(a, b)| (AgentId::new(a), AgentId::new(b)))
                .collect(),
        }
    }
}

/// Validated undirected graph over agent ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    adjacency: BTreeMap<AgentId, BTreeSet<AgentId>>,
}

impl Topology {
    /// Build the adjacency from node ids and edges.
    ///
    /// Rejects duplicate node ids, self-loops, and edges that reference an
    /// unknown id. Duplicate edges collapse into one.
    pub fn new(
        ids: impl IntoIterator<Item = AgentId>,
        edges: &[(AgentId, AgentId)],
    ) -> Result<Self, DomainError> {
        let mut adjacency: BTreeMap<AgentId, BTreeSet<AgentId>> = BTreeMap::new();
        for id in ids {
            if adjacency.insert(id, BTreeSet::new()).is_some() {
                return Err(DomainError::DuplicateAgent(id));
            }
        }

        for &(a, b) in edges {
            if a == b {
                return Err(DomainError::SelfLoop(a));
            }
            for id in [a, b] {
                if !adjacency.contains_key(&id) {
                    return Err(DomainError::UnknownAgent(id));
                }
            }
            adjacency.entry(a).or_default().insert(b);
            adjacency.entry(b).or_default().insert(a);
        }

        Ok(Self { adjacency })
    }

    pub fn contains(&self, id: AgentId) -> bool {
        self.adjacency.contains_key(&id)
    }

    pub fn neighbors(&self, id: AgentId) -> Result<&BTreeSet<AgentId>, DomainError> {
        self.adjacency.get(&id).ok_or(DomainError::UnknownAgent(id))
    }

    pub fn is_edge(&self, a: AgentId, b: AgentId) -> bool {
        self.adjacency.get(&a).is_some_and(|n| n.contains(&b))
    }

    /// All edges, each once, in canonical order.
    pub fn edges(&self) -> Vec<CanonicalPair> {
        self.adjacency
            .iter()
            .flat_map(|(&a, ns)| ns.iter().filter(move |&&b| a < b).map(move |&b| (a, b)))
            .map(|(a, b)| CanonicalPair::new(a, b))
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }
}
