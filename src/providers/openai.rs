use super::LLMProvider;
use crate::config::{Provider, ProviderSettings};
use crate::core::error::AgentError;
use crate::providers::Message;
use crate::providers::base_client::HttpTransport;
use crate::providers::openai_style::OpenAIStyleProvider;
use async_trait::async_trait;
use std::sync::Arc;

/// OpenAI or any server speaking its API; the only backend whose base URL
/// can be overridden through `api_endpoint`.
#[derive(Clone)]
pub struct OpenAIProvider {
    inner: OpenAIStyleProvider,
}

impl OpenAIProvider {
    pub fn new(settings: &ProviderSettings, transport: Arc<dyn HttpTransport>) -> Self {
        let endpoint = settings
            .api_endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(Provider::OpenAI.default_base_url())
            .to_string();
        Self {
            inner: OpenAIStyleProvider::new(
                endpoint,
                &settings.api_key,
                settings.model.clone(),
                transport,
            ),
        }
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    async fn get_response(&self, messages: &[Message]) -> Result<String, AgentError> {
        self.inner.get_response(messages).await
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
