//! OpenAI chat-completions adapter
//!
//! Serves every provider that speaks the `/chat/completions` format: OpenAI
//! itself, Groq, Together and a local Ollama.

use super::{ProviderAdapter, ProviderError, read_json};
use crate::config::ProviderSettings;
use async_trait::async_trait;
use cascade_domain::{CascadeTask, ProviderKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub struct OpenAiCompatibleAdapter {
    client: reqwest::Client,
    settings: ProviderSettings,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

impl OpenAiCompatibleAdapter {
    pub fn new(client: reqwest::Client, settings: ProviderSettings) -> Self {
        Self { client, settings }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.settings.base_url)
    }

    fn request_body<'a>(&self, model: &'a str, task: &'a CascadeTask) -> ChatRequest<'a> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = task.system.as_deref() {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &task.prompt,
        });

        // OpenAI's reasoning models only accept the newer field name
        let (max_tokens, max_completion_tokens) = match self.settings.kind {
            ProviderKind::OpenAi => (None, Some(self.settings.max_tokens)),
            _ => (Some(self.settings.max_tokens), None),
        };

        ChatRequest {
            model,
            messages,
            max_tokens,
            max_completion_tokens,
        }
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiCompatibleAdapter {
    fn kind(&self) -> ProviderKind {
        self.settings.kind
    }

    async fn complete(&self, model: &str, task: &CascadeTask) -> Result<String, ProviderError> {
        let mut request = self
            .client
            .post(self.endpoint())
            .json(&self.request_body(model, task));

        match &self.settings.api_key {
            Some(key) => request = request.bearer_auth(key),
            None if self.settings.kind != ProviderKind::Ollama => {
                return Err(ProviderError::MissingApiKey(self.settings.kind));
            }
            None => {}
        }

        debug!("POST {} (model {})", self.endpoint(), model);
        let response = request.send().await?;
        let body: ChatResponse = read_json(response).await?;

        Ok(body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}
