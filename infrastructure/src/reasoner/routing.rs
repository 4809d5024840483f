//! Capability-tier model routing.

use crate::config::FileReasonerConfig;

/// Model plus sampling temperature
#[derive(Debug, Clone, PartialEq)]
pub struct ModelChoice {
    pub model: String,
    pub temperature: Option<f32>,
}

impl ModelChoice {
    pub fn new(model: impl Into<String>, temperature: Option<f32>) -> Self {
        Self {
            model: model.into(),
            temperature,
        }
    }
}

/// Maps capability ranks to models
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRouter {
    /// Sorted by descending `min_rank`
    tiers: Vec<(u8, ModelChoice)>,
    default: ModelChoice,
    judge: ModelChoice,
}

impl ModelRouter {
    pub fn new(default: ModelChoice, judge: ModelChoice) -> Self {
        Self {
            tiers: Vec::new(),
            default,
            judge,
        }
    }

    pub fn with_tier(mut self, min_rank: u8, choice: ModelChoice) -> Self {
        self.tiers.push((min_rank, choice));
        self.tiers.sort_by(|a, b| b.0.cmp(&a.0));
        self
    }

    pub fn from_config(config: &FileReasonerConfig) -> Self {
        let router = Self::new(
            ModelChoice::new(&config.default_model, config.default_temperature),
            // Judgments are deterministic
            ModelChoice::new(&config.judge_model, Some(0.0)),
        );
        config.tiers.iter().fold(router, |router, tier| {
            router.with_tier(tier.min_rank, ModelChoice::new(&tier.model, tier.temperature))
        })
    }

    /// Highest tier whose `min_rank` does not exceed `rank`, else the default.
    pub fn for_rank(&self, rank: u8) -> &ModelChoice {
        self.tiers
            .iter()
            .find(|(min_rank, _)| rank >= *min_rank)
            .map(|(_, choice)| choice)
            .unwrap_or(&self.default)
    }

    pub fn judge(&self) -> &ModelChoice {
        &self.judge
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_routing() {
        let router = ModelRouter::from_config(&FileReasonerConfig::default());
        assert_eq!(router.for_rank(5).model, "gpt-4o");
        assert_eq!(router.for_rank(4).temperature, Some(0.0));
        assert_eq!(router.for_rank(3).temperature, Some(0.5));
        assert_eq!(router.for_rank(1).temperature, Some(0.7));
        assert_eq!(router.judge().model, "gpt-4o-mini");
    }

    #[test]
    fn test_tier_order_does_not_matter() {
        let router = ModelRouter::new(ModelChoice::new("small", None), ModelChoice::new("judge", None))
            .with_tier(2, ModelChoice::new("medium", None))
            .with_tier(4, ModelChoice::new("large", None));

        assert_eq!(router.for_rank(0).model, "small");
        assert_eq!(router.for_rank(2).model, "medium");
        assert_eq!(router.for_rank(3).model, "medium");
        assert_eq!(router.for_rank(5).model, "large");
    }
}
