use crate::config::{Provider, ProviderSettings};
use crate::core::error::AgentError;
use crate::providers::Message;
use crate::providers::base_client::{HttpTransport, ReqwestTransport};
use crate::providers::factory::ProviderFactory;
use crate::session::Session;
use std::sync::Arc;

/// Sends one user turn to whichever backend the model names and records the
/// exchange in the session.
pub struct ChatClient {
    factory: ProviderFactory,
    transport: Arc<dyn HttpTransport>,
}

impl Default for ChatClient {
    fn default() -> Self {
        Self::new(Arc::new(ReqwestTransport::new()))
    }
}

impl ChatClient {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            factory: ProviderFactory::new(),
            transport,
        }
    }

    /// Single attempt, no retry. On failure the session is left untouched.
    pub async fn send(
        &self,
        session: &mut Session,
        settings: &ProviderSettings,
        text: &str,
    ) -> Result<String, AgentError> {
        // Fail before any network traffic for unknown models.
        let kind = Provider::from_model(&settings.model)?;
        let provider = self.factory.create(settings, self.transport.clone())?;

        let user = Message::user(text);
        let mut history = session.messages().to_vec();
        history.push(user.clone());

        tracing::info!(
            provider = ?kind,
            model = %settings.model,
            turns = history.len(),
            "dispatching chat turn"
        );
        let reply = provider.get_response(&history).await.inspect_err(|e| {
            tracing::warn!(provider = provider.name(), error = %e, "provider call failed");
        })?;

        session.append_turn(user, Message::assistant(reply.clone()))?;
        Ok(reply)
    }
}
