use crate::core::error::AgentError;
use crate::providers::Message;
use crate::providers::base_client::{HttpClient, HttpTransport};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 2000;

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatCompletionMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatCompletionMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: Option<String>,
}

/// Shared `chat/completions` client used by every OpenAI-shaped backend.
#[derive(Clone)]
pub struct OpenAIStyleProvider {
    client: HttpClient,
    pub model: String,
}

impl OpenAIStyleProvider {
    pub fn new(
        base_url: String,
        api_key: &str,
        model: String,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let auth_header = Some(("Authorization".to_string(), format!("Bearer {}", api_key)));
        Self {
            client: HttpClient::new(base_url, auth_header, None, transport),
            model,
        }
    }

    pub async fn get_response(&self, messages: &[Message]) -> Result<String, AgentError> {
        let payload = ChatCompletionRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| ChatCompletionMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let parsed: ChatCompletionResponse = self.client.post("chat/completions", &payload).await?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AgentError::MalformedResponse("No choices in API response".to_string()))
    }
}
