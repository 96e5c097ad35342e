//! Startup configuration errors.

use super::issue::ConfigIssue;
use cascade_domain::{DomainError, ProviderKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Invalid configuration:\n{}", format_issues(.0))]
    Invalid(Vec<ConfigIssue>),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("No adapter registered for provider '{0}'")]
    MissingAdapter(ProviderKind),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

fn format_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("  - {}", issue))
        .collect::<Vec<_>>()
        .join("\n")
}
