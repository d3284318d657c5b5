use super::LLMProvider;
use crate::config::{Provider, ProviderSettings};
use crate::core::error::AgentError;
use crate::providers::Message;
use crate::providers::base_client::HttpTransport;
use crate::providers::openai_style::OpenAIStyleProvider;
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Clone)]
pub struct DeepSeekProvider {
    inner: OpenAIStyleProvider,
}

impl DeepSeekProvider {
    pub fn new(settings: &ProviderSettings, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            inner: OpenAIStyleProvider::new(
                Provider::DeepSeek.default_base_url().to_string(),
                &settings.api_key,
                settings.model.clone(),
                transport,
            ),
        }
    }
}

#[async_trait]
impl LLMProvider for DeepSeekProvider {
    async fn get_response(&self, messages: &[Message]) -> Result<String, AgentError> {
        self.inner.get_response(messages).await
    }

    fn name(&self) -> &'static str {
        "deepseek"
    }
}
