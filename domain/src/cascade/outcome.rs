//! Outcome of one backend invocation

use super::task::Completion;
use serde::{Deserialize, Serialize};

/// Classified result of invoking one tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The backend produced a final answer.
    Completed(Completion),
    /// The backend declined: the task exceeds its capability.
    Deferred,
    /// Transport or provider error.
    Failed {
        reason: String,
        /// Rate limit or overload; the controller cools down before moving on.
        rate_limited: bool,
    },
}

impl Outcome {
    pub fn failed(reason: impl Into<String>) -> Self {
        Outcome::Failed {
            reason: reason.into(),
            rate_limited: false,
        }
    }

    pub fn rate_limited(reason: impl Into<String>) -> Self {
        Outcome::Failed {
            reason: reason.into(),
            rate_limited: true,
        }
    }

    pub fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::Completed(_) => OutcomeKind::Completed,
            Outcome::Deferred => OutcomeKind::Deferred,
            Outcome::Failed { .. } => OutcomeKind::Failed,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Outcome::Failed { rate_limited: true, .. })
    }
}

/// Payload-free tag of an [`Outcome`], used in attempt records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Completed,
    Deferred,
    Failed,
}

impl OutcomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::Completed => "completed",
            OutcomeKind::Deferred => "deferred",
            OutcomeKind::Failed => "failed",
        }
    }
}

impl std::fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiers::{BackendIdentity, ProviderKind, Tier};

    #[test]
    fn test_kind_tags() {
        let completion = Completion::new(
            "42",
            Tier::lowest(),
            BackendIdentity::new(ProviderKind::Groq, "m"),
        );
        assert_eq!(Outcome::Completed(completion).kind(), OutcomeKind::Completed);
        assert_eq!(Outcome::Deferred.kind(), OutcomeKind::Deferred);
        assert_eq!(Outcome::failed("boom").kind(), OutcomeKind::Failed);
    }

    #[test]
    fn test_rate_limit_flag() {
        assert!(Outcome::rate_limited("429").is_rate_limited());
        assert!(!Outcome::failed("500").is_rate_limited());
        assert!(!Outcome::Deferred.is_rate_limited());
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&OutcomeKind::Deferred).unwrap(),
            "\"deferred\""
        );
    }
}
