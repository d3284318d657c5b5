use crate::config::{Provider, ProviderSettings};
use crate::core::error::AgentError;
use crate::providers::base_client::HttpTransport;
use crate::providers::{LLMProvider, Message};
use async_trait::async_trait;
use std::sync::Arc;

mod client;
mod types;

pub use client::GeminiClient;

#[derive(Clone)]
pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    pub fn new(settings: &ProviderSettings, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            client: GeminiClient::new(
                Provider::Gemini.default_base_url().to_string(),
                settings.api_key.clone(),
                settings.model.clone(),
                settings.gemini_history,
                transport,
            ),
        }
    }
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    async fn get_response(&self, messages: &[Message]) -> Result<String, AgentError> {
        self.client.generate_content(messages).await
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
