//! Per-tier call timeouts (`[timeouts]` section)

use crate::config::issue::ConfigIssue;
use cascade_domain::Tier;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timeout for one invocation: `base_secs + per_tier_secs * (tier - 1)`.
///
/// Stronger tiers run slower models, so they get more time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTimeoutsConfig {
    pub base_secs: u64,
    pub per_tier_secs: u64,
}

impl Default for FileTimeoutsConfig {
    fn default() -> Self {
        Self {
            base_secs: 30,
            per_tier_secs: 15,
        }
    }
}

impl FileTimeoutsConfig {
    pub fn for_tier(&self, tier: Tier) -> Duration {
        let steps = u64::from(tier.get() - 1);
        Duration::from_secs(
            self.base_secs
                .saturating_add(self.per_tier_secs.saturating_mul(steps)),
        )
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        if self.base_secs == 0 {
            vec![ConfigIssue::error(
                "timeouts.base_secs",
                "must be greater than 0",
            )]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_grows_with_tier() {
        let timeouts = FileTimeoutsConfig::default();
        assert_eq!(timeouts.for_tier(Tier::lowest()), Duration::from_secs(30));
        assert_eq!(timeouts.for_tier(Tier::new(3).unwrap()), Duration::from_secs(60));
        assert_eq!(timeouts.for_tier(Tier::highest()), Duration::from_secs(165));
    }

    #[test]
    fn test_zero_base_rejected() {
        let timeouts = FileTimeoutsConfig {
            base_secs: 0,
            per_tier_secs: 5,
        };
        assert_eq!(timeouts.validate().len(), 1);
    }
}
