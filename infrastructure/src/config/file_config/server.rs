//! HTTP server configuration (`[server]` section)

use crate::config::issue::ConfigIssue;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Listen address for `serve` (default: "127.0.0.1:8080").
    pub bind: String,
    /// Shared auth token (not recommended - use the env var instead).
    pub auth_token: Option<String>,
    /// Environment variable holding the auth token.
    pub auth_token_env: String,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            auth_token: None,
            auth_token_env: "TIER_CASCADE_AUTH_TOKEN".to_string(),
        }
    }
}

impl FileServerConfig {
    pub fn parse_bind(&self) -> (Option<SocketAddr>, Vec<ConfigIssue>) {
        match self.bind.parse() {
            Ok(addr) => (Some(addr), Vec::new()),
            Err(_) => (
                None,
                vec![ConfigIssue::error(
                    "server.bind",
                    format!("'{}' is not a socket address", self.bind),
                )],
            ),
        }
    }

    /// The configured token, from the file or the environment. Empty values count as unset.
    pub fn resolve_auth_token(&self) -> Option<String> {
        self.auth_token
            .clone()
            .or_else(|| std::env::var(&self.auth_token_env).ok())
            .filter(|token| !token.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bind_parses() {
        let (addr, issues) = FileServerConfig::default().parse_bind();
        assert_eq!(addr.unwrap().port(), 8080);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_invalid_bind_is_error() {
        let config = FileServerConfig {
            bind: "localhost".to_string(),
            ..Default::default()
        };
        let (addr, issues) = config.parse_bind();
        assert!(addr.is_none());
        assert!(issues[0].is_error());
    }

    #[test]
    fn test_file_token_wins_and_blank_is_unset() {
        let config = FileServerConfig {
            auth_token: Some("abc".to_string()),
            auth_token_env: "TIER_CASCADE_TEST_UNSET_TOKEN_VAR".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_auth_token().as_deref(), Some("abc"));

        let blank = FileServerConfig {
            auth_token: Some("  ".to_string()),
            auth_token_env: "TIER_CASCADE_TEST_UNSET_TOKEN_VAR".to_string(),
            ..Default::default()
        };
        assert!(blank.resolve_auth_token().is_none());
    }
}
