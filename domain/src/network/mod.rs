//! Network domain
//!
//! - [`entities::Network`] - agents + topology + agreement, settlement queries
//! - [`agreement`] - canonical-pair agreement matrix
//! - [`topology`] - construction specs and validated adjacency
//! - [`presets`] - chain / ring / star / fully connected / random shapes

pub mod agreement;
pub mod entities;
pub mod presets;
pub mod topology;

pub use agreement::{AgreementMatrix, CanonicalPair};
pub use entities::Network;
pub use presets::TopologyPreset;
pub use topology::{NodeSpec, Topology, TopologySpec};
