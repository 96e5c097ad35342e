//! Provider configuration from TOML (`[providers.<kind>]` sections)
//!
//! Every field is optional; unset fields fall back to the provider's built-in
//! defaults via [`FileProvidersConfig::resolve`].

use crate::config::issue::ConfigIssue;
use cascade_domain::ProviderKind;
use serde::{Deserialize, Serialize};

const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Settings for one provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Environment variable name for the API key.
    pub api_key_env: Option<String>,
    /// Direct API key (not recommended - use the env var instead).
    pub api_key: Option<String>,
    /// Base URL of the API, including any version prefix for OpenAI-compatible providers.
    pub base_url: Option<String>,
    /// Max tokens per answer.
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    pub openai: FileProviderConfig,
    pub anthropic: FileProviderConfig,
    pub groq: FileProviderConfig,
    pub together: FileProviderConfig,
    pub ollama: FileProviderConfig,
}

/// Fully resolved connection settings for one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    pub base_url: String,
    pub api_key: Option<String>,
    pub max_tokens: u32,
}

impl FileProvidersConfig {
    pub fn get(&self, kind: ProviderKind) -> &FileProviderConfig {
        match kind {
            ProviderKind::OpenAi => &self.openai,
            ProviderKind::Anthropic => &self.anthropic,
            ProviderKind::Groq => &self.groq,
            ProviderKind::Together => &self.together,
            ProviderKind::Ollama => &self.ollama,
        }
    }

    /// Merge the file settings of `kind` with its built-in defaults.
    ///
    /// The API key comes from `api_key` if set, otherwise from the configured
    /// (or default) environment variable.
    pub fn resolve(&self, kind: ProviderKind) -> ProviderSettings {
        let file = self.get(kind);
        let api_key = file
            .api_key
            .clone()
            .or_else(|| {
                file.api_key_env
                    .as_deref()
                    .or(default_api_key_env(kind))
                    .and_then(|var| std::env::var(var).ok())
            })
            .filter(|key| !key.trim().is_empty());

        ProviderSettings {
            kind,
            base_url: file
                .base_url
                .clone()
                .unwrap_or_else(|| default_base_url(kind).to_string())
                .trim_end_matches('/')
                .to_string(),
            api_key,
            max_tokens: file.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        }
    }

    /// Warn about providers the tier map uses but that have no API key.
    pub fn validate(&self, used: &[ProviderKind]) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        for &kind in used {
            let file = self.get(kind);
            if file.max_tokens == Some(0) {
                issues.push(ConfigIssue::error(
                    format!("providers.{}.max_tokens", kind),
                    "must be greater than 0",
                ));
            }
            if let Some(url) = &file.base_url
                && !(url.starts_with("http://") || url.starts_with("https://"))
            {
                issues.push(ConfigIssue::error(
                    format!("providers.{}.base_url", kind),
                    format!("'{}' is not an http(s) URL", url),
                ));
            }
            if default_api_key_env(kind).is_some() && self.resolve(kind).api_key.is_none() {
                let var = file
                    .api_key_env
                    .as_deref()
                    .or(default_api_key_env(kind))
                    .unwrap_or_default();
                issues.push(ConfigIssue::warning(
                    format!("providers.{}", kind),
                    format!("no API key found (set {}); its tiers will fail", var),
                ));
            }
        }
        issues
    }
}

fn default_base_url(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::OpenAi => "https://api.openai.com/v1",
        ProviderKind::Anthropic => "https://api.anthropic.com",
        ProviderKind::Groq => "https://api.groq.com/openai/v1",
        ProviderKind::Together => "https://api.together.xyz/v1",
        ProviderKind::Ollama => "http://localhost:11434/v1",
    }
}

/// Local providers need no key.
fn default_api_key_env(kind: ProviderKind) -> Option<&'static str> {
    match kind {
        ProviderKind::OpenAi => Some("OPENAI_API_KEY"),
        ProviderKind::Anthropic => Some("ANTHROPIC_API_KEY"),
        ProviderKind::Groq => Some("GROQ_API_KEY"),
        ProviderKind::Together => Some("TOGETHER_API_KEY"),
        ProviderKind::Ollama => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let settings = FileProvidersConfig::default().resolve(ProviderKind::Groq);
        assert_eq!(settings.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(settings.max_tokens, 4096);
    }

    #[test]
    fn test_resolve_overrides() {
        let config = FileProvidersConfig {
            openai: FileProviderConfig {
                api_key: Some("sk-test".to_string()),
                base_url: Some("http://localhost:9999/v1/".to_string()),
                max_tokens: Some(256),
                ..Default::default()
            },
            ..Default::default()
        };
        let settings = config.resolve(ProviderKind::OpenAi);
        assert_eq!(settings.api_key.as_deref(), Some("sk-test"));
        assert_eq!(settings.base_url, "http://localhost:9999/v1");
        assert_eq!(settings.max_tokens, 256);
    }

    #[test]
    fn test_ollama_needs_no_key() {
        let issues = FileProvidersConfig::default().validate(&[ProviderKind::Ollama]);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_bad_url_and_zero_tokens_are_errors() {
        let config = FileProvidersConfig {
            anthropic: FileProviderConfig {
                api_key: Some("k".to_string()),
                base_url: Some("api.anthropic.com".to_string()),
                max_tokens: Some(0),
                ..Default::default()
            },
            ..Default::default()
        };
        let issues = config.validate(&[ProviderKind::Anthropic]);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.is_error()));
    }
}
