//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// These are raised while building domain values (tiers, tier maps, policies).
/// Per-invocation backend failures are never errors at this level; they are
/// [`Outcome::Failed`](crate::Outcome::Failed) values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Tier {0} is outside the supported range 1..={max}", max = crate::Tier::MAX)]
    InvalidTier(i64),

    #[error("Tier {0} has no backend configured")]
    MissingBackend(u8),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Invalid cascade policy: {0}")]
    InvalidPolicy(String),
}

impl DomainError {
    /// Check if this error comes from tier map construction
    pub fn is_tier_map_error(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidTier(_)
                | DomainError::MissingBackend(_)
                | DomainError::UnknownProvider(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_tier_display() {
        let error = DomainError::InvalidTier(11);
        assert_eq!(
            error.to_string(),
            "Tier 11 is outside the supported range 1..=10"
        );
    }

    #[test]
    fn test_is_tier_map_error() {
        assert!(DomainError::MissingBackend(3).is_tier_map_error());
        assert!(DomainError::UnknownProvider("x".to_string()).is_tier_map_error());
        assert!(!DomainError::InvalidPolicy("zero budget".to_string()).is_tier_map_error());
    }
}
