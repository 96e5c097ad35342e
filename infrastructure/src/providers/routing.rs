//! Tier routing: the [`Invoker`] the controller talks to.
//!
//! Resolves a tier to its backend through the [`TierMap`], calls the adapter
//! for that backend's provider under the tier's timeout, and classifies the
//! result into an [`Outcome`].

use super::{AnthropicAdapter, OpenAiCompatibleAdapter, ProviderAdapter, ProviderError};
use crate::config::{ConfigError, FileConfig, FileTimeoutsConfig};
use async_trait::async_trait;
use cascade_application::ports::invoker::Invoker;
use cascade_domain::{BackendIdentity, CascadeTask, Completion, Outcome, ProviderKind, Tier, TierMap};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_DEFERRAL_MARKER: &str = "[[DEFER]]";

pub struct TierInvoker {
    tier_map: Arc<TierMap>,
    adapters: HashMap<ProviderKind, Arc<dyn ProviderAdapter>>,
    timeouts: FileTimeoutsConfig,
    deferral_marker: String,
}

impl std::fmt::Debug for TierInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut providers: Vec<_> = self.adapters.keys().collect();
        providers.sort();
        f.debug_struct("TierInvoker")
            .field("providers", &providers)
            .field("timeouts", &self.timeouts)
            .field("deferral_marker", &self.deferral_marker)
            .finish()
    }
}

impl TierInvoker {
    /// Route through `adapters`. Fails if any tier's provider has no adapter.
    pub fn new(
        tier_map: Arc<TierMap>,
        adapters: Vec<Arc<dyn ProviderAdapter>>,
    ) -> Result<Self, ConfigError> {
        let adapters: HashMap<ProviderKind, Arc<dyn ProviderAdapter>> = adapters
            .into_iter()
            .map(|adapter| (adapter.kind(), adapter))
            .collect();

        if let Some(missing) = tier_map
            .providers()
            .into_iter()
            .find(|kind| !adapters.contains_key(kind))
        {
            return Err(ConfigError::MissingAdapter(missing));
        }

        Ok(Self {
            tier_map,
            adapters,
            timeouts: FileTimeoutsConfig::default(),
            deferral_marker: DEFAULT_DEFERRAL_MARKER.to_string(),
        })
    }

    /// Build one HTTP adapter per provider the tier map uses.
    pub fn from_config(config: &FileConfig, tier_map: Arc<TierMap>) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("tier-cascade/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        let adapters = tier_map
            .providers()
            .into_iter()
            .map(|kind| {
                let settings = config.providers.resolve(kind);
                let adapter: Arc<dyn ProviderAdapter> = if kind.is_openai_compatible() {
                    Arc::new(OpenAiCompatibleAdapter::new(client.clone(), settings))
                } else {
                    Arc::new(AnthropicAdapter::new(client.clone(), settings))
                };
                adapter
            })
            .collect();

        Ok(Self::new(tier_map, adapters)?
            .with_timeouts(config.timeouts)
            .with_deferral_marker(config.cascade.deferral_marker.trim()))
    }

    pub fn with_timeouts(mut self, timeouts: FileTimeoutsConfig) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn with_deferral_marker(mut self, marker: impl Into<String>) -> Self {
        self.deferral_marker = marker.into();
        self
    }

    /// Fold an adapter result into an [`Outcome`].
    fn classify(
        &self,
        tier: Tier,
        backend: &BackendIdentity,
        result: Result<String, ProviderError>,
    ) -> Outcome {
        match result {
            Err(e) if e.is_rate_limited() => Outcome::rate_limited(e.to_string()),
            Err(e) => Outcome::failed(e.to_string()),
            Ok(text) => {
                let answer = text.trim();
                if answer.is_empty() {
                    Outcome::failed("Backend returned an empty answer")
                } else if answer.starts_with(&self.deferral_marker) {
                    Outcome::Deferred
                } else {
                    Outcome::Completed(Completion::new(answer, tier, backend.clone()))
                }
            }
        }
    }
}

#[async_trait]
impl Invoker for TierInvoker {
    async fn invoke(&self, tier: Tier, task: &CascadeTask) -> Outcome {
        let backend = self.tier_map.backend(tier);
        let Some(adapter) = self.adapters.get(&backend.provider) else {
            return Outcome::failed(format!("No adapter for provider {}", backend.provider));
        };

        let limit = self.timeouts.for_tier(tier);
        debug!("Invoking {} on tier {} (timeout {}s)", backend, tier, limit.as_secs());

        let result = match tokio::time::timeout(limit, adapter.complete(&backend.model, task)).await
        {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(limit)),
        };

        self.classify(tier, backend, result)
    }
}
