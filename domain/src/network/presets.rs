//! Canonical topology presets.
//!
//! Presets generate a [`TopologySpec`] for `n` agents with ids `1..=n`. Agent
//! `i` gets rank `i` clamped into the configured range, except for `star`
//! where the hub (agent 1) holds the highest rank. `mixed` is a fixed
//! five-agent layout whose ranks do not follow the ids.

use super::topology::{NodeSpec, TopologySpec};
use crate::agent::value_objects::RankRange;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// `mixed` ranks by id, and its edges.
const MIXED_RANKS: [u8; 5] = [1, 3, 2, 5, 4];
const MIXED_EDGES: [(u32, u32); 5] = [(1, 3), (2, 4), (3, 5), (1, 5), (1, 2)];

/// Probability that a non-tree pair becomes an edge in `random`.
const RANDOM_EXTRA_EDGE_PROBABILITY: f64 = 0.3;

/// Named topology shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopologyPreset {
    Chain,
    Ring,
    Star,
    FullyConnected,
    Random,
    Mixed,
}

impl TopologyPreset {
    pub const ALL: [TopologyPreset; 6] = [
        TopologyPreset::Chain,
        TopologyPreset::Ring,
        TopologyPreset::Star,
        TopologyPreset::FullyConnected,
        TopologyPreset::Random,
        TopologyPreset::Mixed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TopologyPreset::Chain => "chain",
            TopologyPreset::Ring => "ring",
            TopologyPreset::Star => "star",
            TopologyPreset::FullyConnected => "fully_connected",
            TopologyPreset::Random => "random",
            TopologyPreset::Mixed => "mixed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TopologyPreset::Chain => "Chain",
            TopologyPreset::Ring => "Ring",
            TopologyPreset::Star => "Star",
            TopologyPreset::FullyConnected => "FullyConnected",
            TopologyPreset::Random => "Random",
            TopologyPreset::Mixed => "Mixed",
        }
    }

    /// Build a topology of `size` agents. `seed` only affects `random`;
    /// `mixed` always has five agents.
    pub fn build(&self, size: u32, ranks: &RankRange, seed: u64) -> TopologySpec {
        let size = match self {
            TopologyPreset::Mixed => MIXED_RANKS.len() as u32,
            _ => size,
        };
        let ids: Vec<u32> = (1..=size).collect();

        let nodes = ids
            .iter()
            .map(|&i| {
                let raw = match self {
                    TopologyPreset::Star if i == 1 => u8::MAX,
                    TopologyPreset::Star => u8::try_from(i - 1).unwrap_or(u8::MAX),
                    TopologyPreset::Mixed => MIXED_RANKS[(i - 1) as usize],
                    _ => u8::try_from(i).unwrap_or(u8::MAX),
                };
                NodeSpec::new(i, ranks.clamp(raw))
            })
            .collect();

        let edges = match self {
            TopologyPreset::Chain => ids.windows(2).map(|w| (w[0], w[1])).collect(),
            TopologyPreset::Ring => {
                let mut edges: Vec<_> = ids.windows(2).map(|w| (w[0], w[1])).collect();
                if size > 2 {
                    edges.push((size, 1));
                }
                edges
            }
            TopologyPreset::Star => ids.iter().skip(1).map(|&i| (1, i)).collect(),
            TopologyPreset::FullyConnected => all_pairs(&ids),
            TopologyPreset::Random => random_connected(&ids, seed),
            TopologyPreset::Mixed => MIXED_EDGES.to_vec(),
        };

        TopologySpec::new(self.display_name(), nodes, edges)
    }
}

impl std::fmt::Display for TopologyPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TopologyPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "chain" => Ok(TopologyPreset::Chain),
            "ring" => Ok(TopologyPreset::Ring),
            "star" => Ok(TopologyPreset::Star),
            "fully_connected" | "full" | "complete" => Ok(TopologyPreset::FullyConnected),
            "random" => Ok(TopologyPreset::Random),
            "mixed" => Ok(TopologyPreset::Mixed),
            other => Err(format!("unknown topology preset: {}", other)),
        }
    }
}

fn all_pairs(ids: &[u32]) -> Vec<(u32, u32)> {
    ids.iter()
        .enumerate()
        .flat_map(|(i, &a)| ids[i + 1..].iter().map(move |&b| (a, b)))
        .collect()
}

/// Random spanning tree plus independent extra edges; always connected.
fn random_connected(ids: &[u32], seed: u64) -> Vec<(u32, u32)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut order = ids.to_vec();
    order.shuffle(&mut rng);

    let mut edges = Vec::new();
    for i in 1..order.len() {
        let parent = order[rng.gen_range(0..i)];
        edges.push(canonical(parent, order[i]));
    }

    for (a, b) in all_pairs(ids) {
        if !edges.contains(&(a, b)) && rng.gen_bool(RANDOM_EXTRA_EDGE_PROBABILITY) {
            edges.push((a, b));
        }
    }

    edges.sort_unstable();
    edges
}

fn canonical(a: u32, b: u32) -> (u32, u32) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::entities::Network;

    fn ranks(spec: &TopologySpec) -> Vec<u8> {
        spec.nodes.iter().map(|n| n.capability).collect()
    }

    #[test]
    fn test_chain_matches_reference_layout() {
        let spec = TopologyPreset::Chain.build(5, &RankRange::default(), 0);
        assert_eq!(spec.name, "Chain");
        assert_eq!(ranks(&spec), vec![1, 2, 3, 4, 5]);
        assert_eq!(
            spec,
            TopologySpec::new(
                "Chain",
                (1..=5).map(|i| NodeSpec::new(i, i as u8)).collect(),
                vec![(1, 2), (2, 3), (3, 4), (4, 5)],
            )
        );
    }

    #[test]
    fn test_ring_closes_loop() {
        let spec = TopologyPreset::Ring.build(5, &RankRange::default(), 0);
        assert_eq!(spec.edges.len(), 5);
        let net = Network::new(&spec, &RankRange::default()).unwrap();
        assert_eq!(net.neighbors(crate::agent::AgentId::new(1)).unwrap().len(), 2);
    }

    #[test]
    fn test_ring_of_two_has_single_edge() {
        let spec = TopologyPreset::Ring.build(2, &RankRange::default(), 0);
        assert_eq!(spec.edges.len(), 1);
    }

    #[test]
    fn test_star_hub_has_highest_rank() {
        let spec = TopologyPreset::Star.build(5, &RankRange::default(), 0);
        assert_eq!(ranks(&spec), vec![5, 1, 2, 3, 4]);
        assert!(spec.edges.iter().all(|(a, _)| a.value() == 1));
    }

    #[test]
    fn test_fully_connected_edge_count() {
        let spec = TopologyPreset::FullyConnected.build(5, &RankRange::default(), 0);
        assert_eq!(spec.edges.len(), 10);
    }

    #[test]
    fn test_ranks_clamped_into_range() {
        let spec = TopologyPreset::Chain.build(8, &RankRange::default(), 0);
        assert_eq!(ranks(&spec), vec![1, 2, 3, 4, 5, 5, 5, 5]);
    }

    #[test]
    fn test_random_is_seeded_and_connected() {
        let a = TopologyPreset::Random.build(6, &RankRange::default(), 42);
        let b = TopologyPreset::Random.build(6, &RankRange::default(), 42);
        assert_eq!(a, b);
        assert!(a.edges.len() >= 5);

        // Flood fill from agent 1 reaches every agent.
        let net = Network::new(&a, &RankRange::default()).unwrap();
        let mut seen = vec![crate::agent::AgentId::new(1)];
        let mut i = 0;
        while i < seen.len() {
            for n in net.neighbors(seen[i]).unwrap() {
                if !seen.contains(n) {
                    seen.push(*n);
                }
            }
            i += 1;
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_mixed_has_fixed_layout() {
        let spec = TopologyPreset::Mixed.build(8, &RankRange::default(), 7);
        assert_eq!(spec.name, "Mixed");
        assert_eq!(ranks(&spec), vec![1, 3, 2, 5, 4]);
        assert_eq!(spec, TopologyPreset::Mixed.build(5, &RankRange::default(), 0));

        let net = Network::new(&spec, &RankRange::default()).unwrap();
        let id = crate::agent::AgentId::new;
        assert!(net.is_edge(id(5), id(1)));
        assert!(net.is_edge(id(4), id(2)));
        assert!(!net.is_edge(id(2), id(3)));
        assert_eq!(net.neighbors(id(1)).unwrap().len(), 3);
        assert_eq!(net.neighbors(id(4)).unwrap().len(), 1);
    }

    #[test]
    fn test_mixed_ranks_clamped() {
        let spec = TopologyPreset::Mixed.build(5, &RankRange::new(2, 4).unwrap(), 0);
        assert_eq!(ranks(&spec), vec![2, 3, 2, 4, 4]);
    }

    #[test]
    fn test_parse_preset_names() {
        assert_eq!("chain".parse::<TopologyPreset>(), Ok(TopologyPreset::Chain));
        assert_eq!(
            "fully-connected".parse::<TopologyPreset>(),
            Ok(TopologyPreset::FullyConnected)
        );
        assert_eq!("Mixed".parse::<TopologyPreset>(), Ok(TopologyPreset::Mixed));
        assert!("mesh".parse::<TopologyPreset>().is_err());
    }
}
