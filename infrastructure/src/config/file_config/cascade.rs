//! Cascade walk configuration (`[cascade]` section)

use crate::config::issue::ConfigIssue;
use cascade_domain::{CascadePolicy, CooldownPolicy, EscalationStrategy};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCascadeConfig {
    /// "zigzag" (default) or "sweep".
    pub strategy: String,
    /// Hard cap on invocations per task; unset means one attempt per tier at most.
    pub max_attempts: Option<usize>,
    /// Cooldown after the first rate-limited failure; 0 disables cooldowns.
    pub cooldown_ms: u64,
    /// Upper bound for the doubling cooldown.
    pub max_cooldown_ms: u64,
    /// Prefix a backend answer uses to decline the task.
    pub deferral_marker: String,
}

impl Default for FileCascadeConfig {
    fn default() -> Self {
        Self {
            strategy: EscalationStrategy::default().as_str().to_string(),
            max_attempts: None,
            cooldown_ms: 500,
            max_cooldown_ms: 8_000,
            deferral_marker: "[[DEFER]]".to_string(),
        }
    }
}

impl FileCascadeConfig {
    pub fn parse_strategy(&self) -> (Option<EscalationStrategy>, Vec<ConfigIssue>) {
        match self.strategy.parse::<EscalationStrategy>() {
            Ok(strategy) => (Some(strategy), Vec::new()),
            Err(_) => (
                None,
                vec![ConfigIssue::error(
                    "cascade.strategy",
                    format!(
                        "unknown strategy '{}' (expected 'zigzag' or 'sweep')",
                        self.strategy
                    ),
                )],
            ),
        }
    }

    pub fn cooldown(&self) -> CooldownPolicy {
        CooldownPolicy {
            base: Duration::from_millis(self.cooldown_ms),
            max: Duration::from_millis(self.max_cooldown_ms),
        }
    }

    /// Build the walk policy, reporting every problem found.
    pub fn to_policy(&self) -> (Option<CascadePolicy>, Vec<ConfigIssue>) {
        let (strategy, mut issues) = self.parse_strategy();

        if self.max_attempts == Some(0) {
            issues.push(ConfigIssue::error(
                "cascade.max_attempts",
                "must be at least 1 (omit it to allow one attempt per tier)",
            ));
        }
        if self.cooldown_ms > 0 && self.max_cooldown_ms < self.cooldown_ms {
            issues.push(ConfigIssue::error(
                "cascade.max_cooldown_ms",
                format!(
                    "{} is below cooldown_ms ({})",
                    self.max_cooldown_ms, self.cooldown_ms
                ),
            ));
        }
        if self.deferral_marker.trim().is_empty() {
            issues.push(ConfigIssue::error(
                "cascade.deferral_marker",
                "must not be empty",
            ));
        }

        let policy = match strategy {
            Some(strategy) if issues.is_empty() => Some(
                CascadePolicy::new(strategy)
                    .with_max_attempts(self.max_attempts)
                    .with_cooldown(self.cooldown()),
            ),
            _ => None,
        };
        (policy, issues)
    }
}
