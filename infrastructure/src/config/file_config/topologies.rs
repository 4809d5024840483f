//! Topology selection from TOML (`[topologies]` section)

use super::ConfigValidationError;
use agora_domain::{RankRange, TopologyPreset, TopologySpec};
use serde::{Deserialize, Serialize};

/// Which networks to simulate
///
/// # Example
///
/// ```toml
/// [topologies]
/// presets = ["chain", "star"]
/// size = 5
/// seed = 42
///
/// [[topologies.custom]]
/// name = "Triangle"
/// nodes = [{ id = 1, capability = 1 }, { id = 2, capability = 3 }, { id = 3, capability = 5 }]
/// edges = [[1, 2], [2, 3], [3, 1]]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTopologiesConfig {
    /// Preset names (`chain`, `ring`, `star`, `fully_connected`, `random`, `mixed`)
    pub presets: Vec<String>,
    /// Agent count for presets
    pub size: u32,
    /// Seed for the `random` preset
    pub seed: u64,
    /// Hand-written topologies
    pub custom: Vec<TopologySpec>,
}

impl Default for FileTopologiesConfig {
    fn default() -> Self {
        Self {
            presets: TopologyPreset::ALL
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
            size: 5,
            seed: 42,
            custom: Vec::new(),
        }
    }
}

impl FileTopologiesConfig {
    pub fn parse_presets(&self) -> Result<Vec<TopologyPreset>, ConfigValidationError> {
        self.presets
            .iter()
            .map(|name| {
                name.parse()
                    .map_err(|_| ConfigValidationError::UnknownPreset(name.clone()))
            })
            .collect()
    }

    /// Presets first (in configured order), then custom topologies.
    pub fn to_specs(
        &self,
        ranks: &RankRange,
    ) -> Result<Vec<TopologySpec>, ConfigValidationError> {
        let presets = self.parse_presets()?;
        if !presets.is_empty() && self.size == 0 {
            return Err(ConfigValidationError::InvalidTopologySize);
        }
        let mut specs: Vec<TopologySpec> = presets
            .iter()
            .map(|preset| preset.build(self.size, ranks, self.seed))
            .collect();
        specs.extend(self.custom.iter().cloned());
        Ok(specs)
    }
}

#[cfg(test)]
mod tests {
    use super::super::FileConfig;
    use super::*;

    #[test]
    fn test_default_builds_all_presets() {
        let config = FileTopologiesConfig::default();
        let specs = config.to_specs(&RankRange::default()).unwrap();
        let names: Vec<_> = specs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Chain", "Ring", "Star", "FullyConnected", "Random", "Mixed"]);
        assert!(specs.iter().all(|s| s.nodes.len() == 5));
    }

    #[test]
    fn test_custom_topology_deserialize() {
        let toml_str = r#"
[topologies]
presets = ["star"]
size = 3

[[topologies.custom]]
name = "Pair"
nodes = [{ id = 1, capability = 1 }, { id = 2, capability = 4 }]
edges = [[1, 2]]
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let specs = config.topologies.to_specs(&RankRange::default()).unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].name, "Star");
        assert_eq!(specs[1].name, "Pair");
        assert_eq!(specs[1].edges.len(), 1);
    }

    #[test]
    fn test_unknown_preset_is_rejected() {
        let config = FileTopologiesConfig {
            presets: vec!["mesh".to_string()],
            ..Default::default()
        };
        assert_eq!(
            config.parse_presets(),
            Err(ConfigValidationError::UnknownPreset("mesh".to_string()))
        );
    }
}
