//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; conversion into domain values reports every
//! problem as a [`ConfigIssue`].

mod cascade;
mod providers;
mod server;
mod tiers;
mod timeouts;

pub use cascade::FileCascadeConfig;
pub use providers::{FileProviderConfig, FileProvidersConfig, ProviderSettings};
pub use server::FileServerConfig;
pub use tiers::{FileTierConfig, build_tier_map};
pub use timeouts::FileTimeoutsConfig;

use super::error::ConfigError;
use super::issue::ConfigIssue;
use cascade_domain::{CascadePolicy, TierMap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// HTTP surface settings
    pub server: FileServerConfig,
    /// Walk strategy, budget, cooldown and deferral marker
    pub cascade: FileCascadeConfig,
    /// Per-tier call timeouts
    pub timeouts: FileTimeoutsConfig,
    /// Per-tier backend overrides, keyed by tier number
    pub tiers: BTreeMap<String, FileTierConfig>,
    /// Provider endpoints and credentials
    pub providers: FileProvidersConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.server.parse_bind().1);
        issues.extend(self.cascade.to_policy().1);
        issues.extend(self.timeouts.validate());

        let (tier_map, tier_issues) = build_tier_map(&self.tiers);
        issues.extend(tier_issues);

        // Only providers some tier actually routes to are checked
        if let Some(map) = tier_map {
            issues.extend(self.providers.validate(&map.providers()));
        }

        issues
    }

    /// Fail on any error-level issue; return the warnings otherwise.
    pub fn ensure_valid(&self) -> Result<Vec<ConfigIssue>, ConfigError> {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            self.validate().into_iter().partition(ConfigIssue::is_error);
        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }

    pub fn tier_map(&self) -> Result<TierMap, ConfigError> {
        match build_tier_map(&self.tiers) {
            (Some(map), _) => Ok(map),
            (None, issues) => Err(ConfigError::Invalid(
                issues.into_iter().filter(ConfigIssue::is_error).collect(),
            )),
        }
    }

    pub fn policy(&self) -> Result<CascadePolicy, ConfigError> {
        match self.cascade.to_policy() {
            (Some(policy), _) => Ok(policy),
            (None, issues) => Err(ConfigError::Invalid(issues)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cascade_domain::{EscalationStrategy, ProviderKind, Tier};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[server]
bind = "0.0.0.0:9000"
auth_token_env = "MY_TOKEN"

[cascade]
strategy = "sweep"
max_attempts = 6
cooldown_ms = 250
max_cooldown_ms = 2000
deferral_marker = "<<ESCALATE>>"

[timeouts]
base_secs = 10
per_tier_secs = 5

[tiers.3]
provider = "openai"
model = "gpt-4.1"

[providers.ollama]
base_url = "http://gpu-box:11434/v1"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(config.server.auth_token_env, "MY_TOKEN");
        assert_eq!(config.cascade.deferral_marker, "<<ESCALATE>>");
        assert_eq!(config.timeouts.base_secs, 10);
        assert_eq!(
            config.providers.ollama.base_url.as_deref(),
            Some("http://gpu-box:11434/v1")
        );

        let policy = config.policy().unwrap();
        assert_eq!(policy.strategy, EscalationStrategy::Sweep);
        assert_eq!(policy.max_attempts, Some(6));

        let map = config.tier_map().unwrap();
        assert_eq!(map.backend(Tier::new(3).unwrap()).provider, ProviderKind::OpenAi);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[cascade]
max_attempts = 3
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.cascade.max_attempts, Some(3));
        // Defaults should apply
        assert_eq!(config.cascade.strategy, "zigzag");
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert!(config.tiers.is_empty());
    }

    #[test]
    fn test_default_config_has_no_errors() {
        let config = FileConfig::default();
        assert!(config.ensure_valid().is_ok());
        assert_eq!(config.tier_map().unwrap(), TierMap::defaults());
    }

    #[test]
    fn test_invalid_config_reports_every_error() {
        let toml_str = r#"
[server]
bind = "nowhere"

[cascade]
strategy = "random"

[tiers.12]
model = "gpt-9"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        match config.ensure_valid() {
            Err(ConfigError::Invalid(errors)) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert!(fields.contains(&"server.bind"));
                assert!(fields.contains(&"cascade.strategy"));
                assert!(fields.contains(&"tiers.12"));
            }
            other => panic!("expected invalid config, got {other:?}"),
        }
    }
}
