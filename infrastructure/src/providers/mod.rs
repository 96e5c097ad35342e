//! Provider adapters
//!
//! Each adapter speaks one wire format and turns a [`CascadeTask`] into answer
//! text. Problems come back as [`ProviderError`]; the [`TierInvoker`] folds them
//! into [`Outcome`](cascade_domain::Outcome) values so the controller never sees
//! a provider-specific error.

pub mod anthropic;
pub mod openai_compatible;
pub mod routing;

pub use anthropic::AnthropicAdapter;
pub use openai_compatible::OpenAiCompatibleAdapter;
pub use routing::TierInvoker;

use async_trait::async_trait;
use cascade_domain::{CascadeTask, ProviderKind, preview};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Characters of an error body kept in the failure reason.
const ERROR_BODY_PREVIEW: usize = 200;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Rate limited (HTTP {status}{}): {message}", retry_hint(.retry_after))]
    RateLimited {
        status: u16,
        retry_after: Option<u64>,
        message: String,
    },

    #[error("Authentication failed (HTTP {status}): {message}")]
    Auth { status: u16, message: String },

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("No API key configured for {0}")]
    MissingApiKey(ProviderKind),

    #[error("Network error: {0}")]
    Network(String),

    #[error("timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Unparseable response: {0}")]
    Parse(String),
}

fn retry_hint(retry_after: &Option<u64>) -> String {
    retry_after
        .map(|secs| format!(", retry after {secs}s"))
        .unwrap_or_default()
}

impl ProviderError {
    /// Classify a non-2xx response.
    ///
    /// 503 and 529 are "overloaded" answers and count as rate limits.
    pub fn from_status(status: u16, body: &str, retry_after: Option<u64>) -> Self {
        let message = preview(body.trim(), ERROR_BODY_PREVIEW);
        match status {
            429 | 503 | 529 => ProviderError::RateLimited {
                status,
                retry_after,
                message,
            },
            401 | 403 => ProviderError::Auth { status, message },
            _ => ProviderError::Http { status, message },
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ProviderError::RateLimited { .. })
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ProviderError::Parse(e.to_string())
        } else {
            ProviderError::Network(e.to_string())
        }
    }
}

/// One wire format, one provider endpoint.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Send `task` to `model` and return the raw answer text.
    async fn complete(&self, model: &str, task: &CascadeTask) -> Result<String, ProviderError>;
}

/// Decode a 2xx JSON body, or classify the failure.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok());
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::from_status(status.as_u16(), &body, retry_after));
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ProviderError::Parse(e.to_string()))
}
