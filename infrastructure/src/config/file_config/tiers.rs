//! Per-tier backend overrides (`[tiers.N]` sections)
//!
//! Keys are tier numbers. A section may override the provider, the model, or
//! both; tiers without a section keep their built-in backend.
//!
//! ```toml
//! [tiers.3]
//! provider = "openai"
//! model = "gpt-4.1"
//! ```

use crate::config::issue::ConfigIssue;
use cascade_domain::{BackendIdentity, ProviderKind, Tier, TierMap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTierConfig {
    pub provider: Option<String>,
    pub model: Option<String>,
}

/// Layer the overrides over the built-in table.
///
/// Returns `None` when any override is invalid; the issues list every problem.
pub fn build_tier_map(
    overrides: &BTreeMap<String, FileTierConfig>,
) -> (Option<TierMap>, Vec<ConfigIssue>) {
    let defaults = TierMap::defaults();
    let mut builder = TierMap::builder();
    let mut issues = Vec::new();

    for (key, entry) in overrides {
        let field = format!("tiers.{}", key);
        let Some(tier) = key.trim().parse::<Tier>().ok() else {
            issues.push(ConfigIssue::error(
                field,
                format!("not a tier number in 1..={}", Tier::MAX),
            ));
            continue;
        };

        let current = defaults.backend(tier);
        let provider = match entry.provider.as_deref() {
            None => Some(current.provider),
            Some(name) => match name.parse::<ProviderKind>() {
                Ok(kind) => Some(kind),
                Err(_) => {
                    let valid: Vec<&str> = ProviderKind::all().iter().map(|k| k.as_str()).collect();
                    issues.push(ConfigIssue::error(
                        format!("{}.provider", field),
                        format!("unknown provider '{}' (expected one of: {})", name, valid.join(", ")),
                    ));
                    None
                }
            },
        };
        let model = match entry.model.as_deref() {
            None => Some(current.model.clone()),
            Some(name) if name.trim().is_empty() => {
                issues.push(ConfigIssue::error(
                    format!("{}.model", field),
                    "model name must not be empty",
                ));
                None
            }
            Some(name) => Some(name.trim().to_string()),
        };

        if entry.provider.is_some() && entry.model.is_none() {
            issues.push(ConfigIssue::warning(
                format!("{}.model", field),
                format!(
                    "provider overridden but model kept as '{}'",
                    current.model
                ),
            ));
        }

        if let (Some(provider), Some(model)) = (provider, model) {
            builder = builder.set(tier, BackendIdentity::new(provider, model));
        }
    }

    if issues.iter().any(ConfigIssue::is_error) {
        return (None, issues);
    }
    match builder.build() {
        Ok(map) => (Some(map), issues),
        Err(e) => {
            issues.push(ConfigIssue::error("tiers", e.to_string()));
            (None, issues)
        }
    }
}
