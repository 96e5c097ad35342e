//! Cascade parameters - controller loop control.
//!
//! [`CascadeParams`] groups the static parameters that control the loop in
//! [`RunCascadeUseCase`](crate::use_cases::run_cascade::RunCascadeUseCase).
//! The walk rules themselves live in the domain [`CascadePolicy`]; this type
//! only carries it alongside the application-level knobs.

use cascade_domain::{CascadePolicy, CooldownPolicy, DomainError, EscalationStrategy};

/// Controller loop parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeParams {
    /// Walk strategy, attempt budget and cooldown.
    pub policy: CascadePolicy,
    /// Characters of a failure reason or answer kept in log lines.
    pub log_preview_chars: usize,
}

impl Default for CascadeParams {
    fn default() -> Self {
        Self {
            policy: CascadePolicy::default(),
            log_preview_chars: 120,
        }
    }
}

impl CascadeParams {
    // ==================== Builder Methods ====================

    pub fn with_policy(mut self, policy: CascadePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_strategy(mut self, strategy: EscalationStrategy) -> Self {
        self.policy.strategy = strategy;
        self
    }

    pub fn with_max_attempts(mut self, max: Option<usize>) -> Self {
        self.policy.max_attempts = max;
        self
    }

    pub fn with_cooldown(mut self, cooldown: CooldownPolicy) -> Self {
        self.policy.cooldown = cooldown;
        self
    }

    pub fn with_log_preview_chars(mut self, chars: usize) -> Self {
        self.log_preview_chars = chars;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        self.policy.validate()
    }
}
