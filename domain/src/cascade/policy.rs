//! Cascade policy - how a session walks the tiers
//!
//! Two walk strategies exist and exactly one is chosen per deployment:
//!
//! | Strategy | On `Deferred` | On `Failed` | Coverage |
//! |----------|---------------|-------------|----------|
//! | [`ZigZag`](EscalationStrategy::ZigZag) (default) | climb | one retreat below the start tier, then climb | start tier upward, plus one step down |
//! | [`Sweep`](EscalationStrategy::Sweep) | climb | retreat, probing the nearest unvisited tier | every tier, once |

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tier walk strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscalationStrategy {
    /// Retreat once from the start tier after a failure, then climb.
    #[default]
    ZigZag,
    /// Visit every tier at most once, retreating on failure.
    Sweep,
}

impl EscalationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            EscalationStrategy::ZigZag => "zigzag",
            EscalationStrategy::Sweep => "sweep",
        }
    }
}

impl std::fmt::Display for EscalationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EscalationStrategy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "zigzag" => Ok(EscalationStrategy::ZigZag),
            "sweep" => Ok(EscalationStrategy::Sweep),
            other => Err(DomainError::InvalidPolicy(format!(
                "unknown strategy '{}' (expected zigzag or sweep)",
                other
            ))),
        }
    }
}

/// Bounded exponential cooldown after rate-limited failures.
///
/// The k-th consecutive rate-limited failure waits `min(base * 2^(k-1), max)`.
/// A zero `base` disables cooldowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownPolicy {
    pub base: Duration,
    pub max: Duration,
}

impl CooldownPolicy {
    pub fn disabled() -> Self {
        Self {
            base: Duration::ZERO,
            max: Duration::ZERO,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.base.is_zero()
    }

    /// Delay for the `consecutive`-th rate-limited failure (1-based).
    pub fn delay_for(&self, consecutive: u32) -> Option<Duration> {
        if !self.is_enabled() || consecutive == 0 {
            return None;
        }
        let factor = 2u32.saturating_pow(consecutive - 1);
        let delay = self.base.saturating_mul(factor).min(self.max.max(self.base));
        Some(delay)
    }
}

impl Default for CooldownPolicy {
    fn default() -> Self {
        Self {
            base: Duration::from_millis(500),
            max: Duration::from_secs(8),
        }
    }
}

/// Everything a [`CascadeSession`](super::CascadeSession) needs to decide its
/// next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CascadePolicy {
    pub strategy: EscalationStrategy,
    /// Hard cap on invocations per session, independent of the tier count.
    pub max_attempts: Option<usize>,
    pub cooldown: CooldownPolicy,
}

impl CascadePolicy {
    pub fn new(strategy: EscalationStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: Option<usize>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_cooldown(mut self, cooldown: CooldownPolicy) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_attempts == Some(0) {
            return Err(DomainError::InvalidPolicy(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        if self.cooldown.is_enabled() && self.cooldown.max < self.cooldown.base {
            return Err(DomainError::InvalidPolicy(
                "cooldown max must not be below cooldown base".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("zigzag".parse::<EscalationStrategy>().unwrap(), EscalationStrategy::ZigZag);
        assert_eq!("Zig-Zag".parse::<EscalationStrategy>().unwrap(), EscalationStrategy::ZigZag);
        assert_eq!("sweep".parse::<EscalationStrategy>().unwrap(), EscalationStrategy::Sweep);
        assert!("random".parse::<EscalationStrategy>().is_err());
    }

    #[test]
    fn test_default_strategy_is_zigzag() {
        assert_eq!(CascadePolicy::default().strategy, EscalationStrategy::ZigZag);
    }

    #[test]
    fn test_cooldown_doubles_until_bound() {
        let cooldown = CooldownPolicy {
            base: Duration::from_millis(100),
            max: Duration::from_millis(350),
        };
        assert_eq!(cooldown.delay_for(1), Some(Duration::from_millis(100)));
        assert_eq!(cooldown.delay_for(2), Some(Duration::from_millis(200)));
        assert_eq!(cooldown.delay_for(3), Some(Duration::from_millis(350)));
        assert_eq!(cooldown.delay_for(40), Some(Duration::from_millis(350)));
    }

    #[test]
    fn test_disabled_cooldown() {
        assert_eq!(CooldownPolicy::disabled().delay_for(1), None);
        assert_eq!(CooldownPolicy::default().delay_for(0), None);
    }

    #[test]
    fn test_validate() {
        assert!(CascadePolicy::default().validate().is_ok());
        assert!(CascadePolicy::default().with_max_attempts(Some(0)).validate().is_err());

        let inverted = CooldownPolicy {
            base: Duration::from_secs(2),
            max: Duration::from_secs(1),
        };
        assert!(CascadePolicy::default().with_cooldown(inverted).validate().is_err());
    }
}
