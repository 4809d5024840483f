//! Reasoner configuration from TOML (`[reasoner]` section)

use serde::{Deserialize, Serialize};

/// Chat-completions endpoint and capability-tier model routing
///
/// Agents use the model of the highest tier whose `min_rank` does not exceed
/// their capability rank, falling back to `default_model`. Equivalence and
/// correctness judgments always use `judge_model`.
///
/// # Example
///
/// ```toml
/// [reasoner]
/// base_url = "https://api.openai.com/v1"
/// api_key_env = "OPENAI_API_KEY"
/// timeout_seconds = 120
/// judge_model = "gpt-4o-mini"
/// default_model = "gpt-4o-mini"
/// default_temperature = 0.7
///
/// [[reasoner.tiers]]
/// min_rank = 4
/// model = "gpt-4o"
/// temperature = 0.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReasonerConfig {
    pub base_url: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    pub timeout_seconds: Option<u64>,
    pub judge_model: String,
    pub default_model: String,
    pub default_temperature: Option<f32>,
    pub tiers: Vec<FileModelTier>,
}

/// One capability tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileModelTier {
    pub min_rank: u8,
    pub model: String,
    #[serde(default)]
    pub temperature: Option<f32>,
}

impl Default for FileReasonerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_seconds: Some(120),
            judge_model: "gpt-4o-mini".to_string(),
            default_model: "gpt-4o-mini".to_string(),
            default_temperature: Some(0.7),
            tiers: vec![
                FileModelTier {
                    min_rank: 4,
                    model: "gpt-4o".to_string(),
                    temperature: Some(0.0),
                },
                FileModelTier {
                    min_rank: 3,
                    model: "gpt-4o-mini".to_string(),
                    temperature: Some(0.5),
                },
            ],
        }
    }
}

impl FileReasonerConfig {
    /// Every configured model name paired with its field path.
    pub fn model_fields(&self) -> Vec<(String, &str)> {
        let mut fields = vec![
            ("reasoner.judge_model".to_string(), self.judge_model.as_str()),
            (
                "reasoner.default_model".to_string(),
                self.default_model.as_str(),
            ),
        ];
        for (i, tier) in self.tiers.iter().enumerate() {
            fields.push((format!("reasoner.tiers[{}].model", i), tier.model.as_str()));
        }
        fields
    }
}
