use crate::config::GeminiHistory;
use crate::core::error::AgentError;
use crate::providers::base_client::{HttpClient, HttpTransport};
use crate::providers::gemini::types::*;
use crate::providers::{Message, Role};
use std::sync::Arc;

#[derive(Clone)]
pub struct GeminiClient {
    pub model: String,
    history: GeminiHistory,
    client: HttpClient,
}

impl GeminiClient {
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        history: GeminiHistory,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let mut client = HttpClient::new(base_url, None, None, transport);

        // Gemini authenticates through the query string
        client.add_query_param("key", api_key);

        Self {
            client,
            history,
            model,
        }
    }

    pub async fn generate_content(&self, messages: &[Message]) -> Result<String, AgentError> {
        let payload = self.build_payload(messages);
        let parsed: GeminiResponse = self
            .client
            .post(&format!("models/{}:generateContent", self.model), &payload)
            .await?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| {
                AgentError::MalformedResponse("No valid response from Gemini".to_string())
            })
    }

    fn build_payload(&self, messages: &[Message]) -> GeminiRequest {
        let contents = match self.history {
            GeminiHistory::Full => messages
                .iter()
                .map(|message| GeminiContentPart {
                    role: Some(match message.role {
                        Role::User => "user",
                        Role::Assistant => "model",
                    }),
                    parts: vec![GeminiPart {
                        text: message.content.clone(),
                    }],
                })
                .collect(),
            GeminiHistory::Latest => messages
                .last()
                .map(|message| GeminiContentPart {
                    role: None,
                    parts: vec![GeminiPart {
                        text: message.content.clone(),
                    }],
                })
                .into_iter()
                .collect(),
        };

        GeminiRequest { contents }
    }
}
