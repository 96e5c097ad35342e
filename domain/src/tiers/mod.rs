//! Tiers and the tier map.
//!
//! A [`Tier`] ranks backends by presumed capability; the [`TierMap`] resolves
//! each tier to one [`BackendIdentity`].

pub mod provider;
pub mod tier;
pub mod tier_map;

pub use provider::{BackendIdentity, ProviderKind};
pub use tier::Tier;
pub use tier_map::{TierMap, TierMapBuilder};
