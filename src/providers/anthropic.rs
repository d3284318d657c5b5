use crate::config::{Provider, ProviderSettings};
use crate::core::error::AgentError;
use crate::providers::base_client::{HttpClient, HttpTransport};
use crate::providers::{LLMProvider, Message};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 2000;

#[derive(Clone)]
pub struct AnthropicProvider {
    client: HttpClient,
    model: String,
}

impl AnthropicProvider {
    pub fn new(settings: &ProviderSettings, transport: Arc<dyn HttpTransport>) -> Self {
        let mut extra_headers = HashMap::new();
        extra_headers.insert(
            "anthropic-version".to_string(),
            ANTHROPIC_VERSION.to_string(),
        );
        Self {
            client: HttpClient::new(
                Provider::Anthropic.default_base_url().to_string(),
                Some(("x-api-key".to_string(), settings.api_key.clone())),
                Some(extra_headers),
                transport,
            ),
            model: settings.model.clone(),
        }
    }
}

#[async_trait]
impl LLMProvider for AnthropicProvider {
    async fn get_response(&self, messages: &[Message]) -> Result<String, AgentError> {
        let payload = AnthropicRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| AnthropicMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            max_tokens: MAX_TOKENS,
        };

        let parsed: AnthropicResponse = self.client.post("messages", &payload).await?;

        parsed
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .ok_or_else(|| {
                AgentError::MalformedResponse("Empty response from Anthropic".to_string())
            })
    }

    fn name(&self) -> &'static str {
        "anthropic"
    }
}

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct AnthropicMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: Option<String>,
}
