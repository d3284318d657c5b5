use crate::config::{Provider, ProviderSettings};
use crate::core::error::AgentError;
use crate::providers::base_client::HttpTransport;
use crate::providers::{
    LLMProvider, anthropic::AnthropicProvider, deepseek::DeepSeekProvider,
    gemini::GeminiProvider, openai::OpenAIProvider,
};
use std::collections::HashMap;
use std::sync::Arc;

type ProviderCreator =
    Box<dyn Fn(&ProviderSettings, Arc<dyn HttpTransport>) -> Box<dyn LLMProvider> + Send + Sync>;

pub struct ProviderFactory {
    creators: HashMap<Provider, ProviderCreator>,
}

impl Default for ProviderFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderFactory {
    pub fn new() -> Self {
        let mut creators: HashMap<Provider, ProviderCreator> = HashMap::new();

        creators.insert(
            Provider::OpenAI,
            Box::new(
                |settings: &ProviderSettings, transport: Arc<dyn HttpTransport>| {
                    Box::new(OpenAIProvider::new(settings, transport)) as Box<dyn LLMProvider>
                },
            ) as ProviderCreator,
        );
        creators.insert(
            Provider::Anthropic,
            Box::new(
                |settings: &ProviderSettings, transport: Arc<dyn HttpTransport>| {
                    Box::new(AnthropicProvider::new(settings, transport)) as Box<dyn LLMProvider>
                },
            ) as ProviderCreator,
        );
        creators.insert(
            Provider::DeepSeek,
            Box::new(
                |settings: &ProviderSettings, transport: Arc<dyn HttpTransport>| {
                    Box::new(DeepSeekProvider::new(settings, transport)) as Box<dyn LLMProvider>
                },
            ) as ProviderCreator,
        );
        creators.insert(
            Provider::Gemini,
            Box::new(
                |settings: &ProviderSettings, transport: Arc<dyn HttpTransport>| {
                    Box::new(GeminiProvider::new(settings, transport)) as Box<dyn LLMProvider>
                },
            ) as ProviderCreator,
        );

        Self { creators }
    }

    /// Resolves the backend from the model prefix and builds it.
    pub fn create(
        &self,
        settings: &ProviderSettings,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Box<dyn LLMProvider>, AgentError> {
        let provider = Provider::from_model(&settings.model)?;
        self.creators
            .get(&provider)
            .map(|creator| creator(settings, transport))
            .ok_or_else(|| AgentError::Config(format!("Provider not registered: {:?}", provider)))
    }
}
