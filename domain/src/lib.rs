//! Domain layer for tier-cascade
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Tiers
//!
//! A task is routed to one of [`Tier::MAX`] interchangeable backends, ranked
//! from cheapest (tier 1) to strongest. The [`TierMap`] names the backend of
//! every tier.
//!
//! ## Cascade
//!
//! When a backend declines a task ([`Outcome::Deferred`]) or fails
//! ([`Outcome::Failed`]) the [`CascadeSession`] decides which tier to try
//! next, never revisiting a tier within the same session.

pub mod cascade;
pub mod core;
pub mod tiers;

// Re-export commonly used types
pub use cascade::{
    CascadePolicy, CascadeSession, CascadeTask, Completion, CooldownPolicy, EscalationStrategy,
    ExhaustionReason, Outcome, OutcomeKind, Step,
};
pub use crate::core::{error::DomainError, text::preview};
pub use tiers::{BackendIdentity, ProviderKind, Tier, TierMap, TierMapBuilder};
