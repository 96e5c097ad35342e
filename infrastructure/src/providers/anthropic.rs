//! Anthropic Messages API adapter

use super::{ProviderAdapter, ProviderError, read_json};
use crate::config::ProviderSettings;
use async_trait::async_trait;
use cascade_domain::{CascadeTask, ProviderKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

const API_VERSION: &str = "2023-06-01";

pub struct AnthropicAdapter {
    client: reqwest::Client,
    settings: ProviderSettings,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: [UserMessage<'a>; 1],
}

#[derive(Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl AnthropicAdapter {
    pub fn new(client: reqwest::Client, settings: ProviderSettings) -> Self {
        Self { client, settings }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.settings.base_url)
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    async fn complete(&self, model: &str, task: &CascadeTask) -> Result<String, ProviderError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingApiKey(ProviderKind::Anthropic))?;

        let body = MessagesRequest {
            model,
            max_tokens: self.settings.max_tokens,
            system: task.system.as_deref(),
            messages: [UserMessage {
                role: "user",
                content: &task.prompt,
            }],
        };

        debug!("POST {} (model {})", self.endpoint(), model);
        let response = self
            .client
            .post(self.endpoint())
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await?;
        let body: MessagesResponse = read_json(response).await?;

        // Only text blocks carry the answer
        Ok(body
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn adapter(server: &MockServer) -> AnthropicAdapter {
        AnthropicAdapter::new(
            reqwest::Client::new(),
            ProviderSettings {
                kind: ProviderKind::Anthropic,
                base_url: server.uri(),
                api_key: Some("sk-ant-test".to_string()),
                max_tokens: 512,
            },
        )
    }

    #[tokio::test]
    async fn test_joins_text_blocks() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "sk-ant-test"))
            .and(header("anthropic-version", API_VERSION))
            .and(body_partial_json(serde_json::json!({
                "model": "claude-haiku-4-5",
                "max_tokens": 512,
                "system": "answer in French",
                "messages": [{"role": "user", "content": "hello"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "msg_1",
                "type": "message",
                "content": [
                    {"type": "thinking", "thinking": "..."},
                    {"type": "text", "text": "Bonjour"},
                    {"type": "text", "text": " !"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = adapter(&server)
            .complete(
                "claude-haiku-4-5",
                &CascadeTask::new("hello").with_system("answer in French"),
            )
            .await
            .unwrap();

        assert_eq!(text, "Bonjour !");
    }

    #[tokio::test]
    async fn test_overloaded_counts_as_rate_limit() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(529).set_body_json(serde_json::json!({
                "type": "error",
                "error": {"type": "overloaded_error", "message": "Overloaded"}
            })))
            .mount(&server)
            .await;

        let err = adapter(&server)
            .complete("claude-opus-4-1", &CascadeTask::new("hello"))
            .await
            .unwrap_err();

        assert!(err.is_rate_limited());
    }

    #[tokio::test]
    async fn test_bad_key_is_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid x-api-key"))
            .mount(&server)
            .await;

        let err = adapter(&server)
            .complete("claude-opus-4-1", &CascadeTask::new("hello"))
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::Auth { status: 401, .. }));
    }
}
