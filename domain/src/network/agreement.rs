//! Canonical-pair agreement bookkeeping.
//!
//! Agreement between two connected agents is a single boolean stored under
//! a [`CanonicalPair`] (lower id first). There is no way to address a
//! directed entry, so `agreement(a, b) == agreement(b, a)` always holds.

use crate::agent::value_objects::AgentId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unordered pair of agent ids, stored lower id first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CanonicalPair {
    low: AgentId,
    high: AgentId,
}

impl CanonicalPair {
    pub fn new(a: AgentId, b: AgentId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn low(&self) -> AgentId {
        self.low
    }

    pub fn high(&self) -> AgentId {
        self.high
    }
}

impl std::fmt::Display for CanonicalPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.low, self.high)
    }
}

/// Last-known agreement flag per edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgreementMatrix {
    entries: BTreeMap<CanonicalPair, bool>,
}

impl AgreementMatrix {
    /// Create a matrix with every given pair set to `false`.
    pub fn new(pairs: impl IntoIterator<Item = CanonicalPair>) -> Self {
        Self {
            entries: pairs.into_iter().map(|p| (p, false)).collect(),
        }
    }

    /// Agreement for the pair, `None` when the pair is not tracked.
    pub fn get(&self, a: AgentId, b: AgentId) -> Option<bool> {
        self.entries.get(&CanonicalPair::new(a, b)).copied()
    }

    /// Overwrite a tracked pair. Returns `false` if the pair is not tracked.
    pub fn set(&mut self, a: AgentId, b: AgentId, value: bool) -> bool {
        match self.entries.get_mut(&CanonicalPair::new(a, b)) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Set every entry back to `false`.
    pub fn clear(&mut self) {
        self.entries.values_mut().for_each(|v| *v = false);
    }

    pub fn iter(&self) -> impl Iterator<Item = (CanonicalPair, bool)> + '_ {
        self.entries.iter().map(|(p, v)| (*p, *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> AgentId {
        AgentId::new(n)
    }

    #[test]
    fn test_canonical_pair_orders_ids() {
        let p = CanonicalPair::new(id(5), id(2));
        assert_eq!(p.low(), id(2));
        assert_eq!(p.high(), id(5));
        assert_eq!(p, CanonicalPair::new(id(2), id(5)));
        assert_eq!(p.to_string(), "(2, 5)");
    }

    #[test]
    fn test_symmetric_reads_and_writes() {
        let mut m = AgreementMatrix::new([CanonicalPair::new(id(1), id(2))]);
        assert_eq!(m.get(id(1), id(2)), Some(false));

        assert!(m.set(id(2), id(1), true));
        assert_eq!(m.get(id(1), id(2)), Some(true));
        assert_eq!(m.get(id(2), id(1)), Some(true));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn test_untracked_pair() {
        let mut m = AgreementMatrix::new([CanonicalPair::new(id(1), id(2))]);
        assert_eq!(m.get(id(1), id(3)), None);
        assert!(!m.set(id(1), id(3), true));
        assert_eq!(m.get(id(3), id(1)), None);
    }

    #[test]
    fn test_clear_resets_all() {
        let mut m = AgreementMatrix::new([
            CanonicalPair::new(id(1), id(2)),
            CanonicalPair::new(id(2), id(3)),
        ]);
        m.set(id(1), id(2), true);
        m.set(id(3), id(2), true);

        m.clear();

        assert!(m.iter().all(|(_, v)| !v));
    }
}
