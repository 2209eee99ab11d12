//! Explicit configuration record for a paid-ad campaign.

use std::collections::BTreeSet;

use creator_core::config::AdsConfig;
use creator_core::types::{Audience, CampaignDuration, Objective, Platform};
use serde::{Deserialize, Serialize};

/// Every choice the ad wizard collects before the A/B step.
///
/// All fields are named and typed; callers pre-seeding the wizard build a
/// complete record (usually `AdConfig { .., ..AdConfig::from_settings(..) }`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdConfig {
    /// Platforms the ads run on. Default: none selected; the first wizard
    /// step will not advance until one is picked.
    pub platforms: BTreeSet<Platform>,
    /// Total spend in whole currency units. Default: `ads.default_budget`
    /// (500). Forward navigation past the budget step requires at least
    /// `ads.min_budget` (100).
    pub total_budget: u32,
    /// Run length. Default: 7 days.
    pub duration: CampaignDuration,
    /// Optimization goal. Default: awareness.
    pub objective: Objective,
    /// Targeting mode. Default: broad.
    pub audience: Audience,
    /// Whether the A/B step is part of the flow. Default: off.
    pub ab_testing: bool,
}

impl AdConfig {
    pub fn from_settings(settings: &AdsConfig) -> Self {
        Self {
            platforms: BTreeSet::new(),
            total_budget: settings.default_budget,
            duration: CampaignDuration::default(),
            objective: Objective::default(),
            audience: Audience::default(),
            ab_testing: false,
        }
    }

    /// Daily spend, floored to whole currency units.
    pub fn daily_budget(&self) -> u32 {
        self.total_budget / self.duration.days()
    }
}

impl Default for AdConfig {
    fn default() -> Self {
        Self::from_settings(&AdsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AdConfig::default();
        assert!(config.platforms.is_empty());
        assert_eq!(config.total_budget, 500);
        assert_eq!(config.duration.days(), 7);
        assert_eq!(config.objective, Objective::Awareness);
        assert_eq!(config.audience, Audience::Broad);
        assert!(!config.ab_testing);
        assert_eq!(config.daily_budget(), 71);
    }
}
