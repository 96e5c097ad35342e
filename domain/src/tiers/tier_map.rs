//! Tier map: the fixed tier -> backend table

use super::provider::{BackendIdentity, ProviderKind};
use super::tier::Tier;
use crate::core::error::DomainError;
use std::collections::BTreeMap;

/// Built-in backend for each tier, weakest first.
const DEFAULT_BACKENDS: [(ProviderKind, &str); Tier::MAX as usize] = [
    (ProviderKind::Groq, "llama-3.1-8b-instant"),
    (ProviderKind::Groq, "llama-3.3-70b-versatile"),
    (ProviderKind::Together, "meta-llama/Llama-3.3-70B-Instruct-Turbo"),
    (ProviderKind::OpenAi, "gpt-4.1-nano"),
    (ProviderKind::OpenAi, "gpt-4.1-mini"),
    (ProviderKind::Anthropic, "claude-haiku-4-5"),
    (ProviderKind::OpenAi, "gpt-4.1"),
    (ProviderKind::Anthropic, "claude-sonnet-4-5"),
    (ProviderKind::OpenAi, "o3"),
    (ProviderKind::Anthropic, "claude-opus-4-1"),
];

/// Read-only mapping from every [`Tier`] to its [`BackendIdentity`].
///
/// Always complete: a `TierMap` value has an entry for each tier in
/// `1..=Tier::MAX`. Build one with [`TierMap::builder`] at startup and share
/// it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierMap {
    entries: BTreeMap<Tier, BackendIdentity>,
}

impl TierMap {
    /// The built-in table
    pub fn defaults() -> Self {
        let entries = Tier::all()
            .zip(DEFAULT_BACKENDS)
            .map(|(tier, (provider, model))| (tier, BackendIdentity::new(provider, model)))
            .collect();
        Self { entries }
    }

    /// Start from the built-in table and override individual tiers.
    pub fn builder() -> TierMapBuilder {
        TierMapBuilder {
            entries: Self::defaults()
                .entries
                .into_iter()
                .map(|(tier, backend)| (tier, Some(backend)))
                .collect(),
        }
    }

    /// Backend for a tier. Total because the map is complete.
    pub fn backend(&self, tier: Tier) -> &BackendIdentity {
        &self.entries[&tier]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tier, &BackendIdentity)> {
        self.entries.iter().map(|(tier, backend)| (*tier, backend))
    }

    /// Distinct providers referenced by any tier.
    pub fn providers(&self) -> Vec<ProviderKind> {
        let mut kinds: Vec<ProviderKind> = self.entries.values().map(|b| b.provider).collect();
        kinds.sort();
        kinds.dedup();
        kinds
    }
}

impl Default for TierMap {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Collects per-tier overrides and validates completeness on [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct TierMapBuilder {
    entries: BTreeMap<Tier, Option<BackendIdentity>>,
}

impl TierMapBuilder {
    /// Replace the backend of one tier.
    pub fn set(mut self, tier: Tier, backend: BackendIdentity) -> Self {
        self.entries.insert(tier, Some(backend));
        self
    }

    /// Drop the backend of one tier, leaving it unresolved.
    pub fn unset(mut self, tier: Tier) -> Self {
        self.entries.insert(tier, None);
        self
    }

    pub fn build(self) -> Result<TierMap, DomainError> {
        let mut entries = BTreeMap::new();
        for tier in Tier::all() {
            match self.entries.get(&tier).cloned().flatten() {
                Some(backend) if !backend.model.trim().is_empty() => {
                    entries.insert(tier, backend);
                }
                _ => return Err(DomainError::MissingBackend(tier.get())),
            }
        }
        Ok(TierMap { entries })
    }
}
