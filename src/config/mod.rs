use crate::core::error::AgentError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAI,
    Anthropic,
    DeepSeek,
    Gemini,
}

impl Provider {
    const PREFIXES: [(&'static str, Provider); 4] = [
        ("gpt-", Provider::OpenAI),
        ("claude-", Provider::Anthropic),
        ("deepseek-", Provider::DeepSeek),
        ("gemini-", Provider::Gemini),
    ];

    /// Picks the backend from the model identifier's prefix.
    pub fn from_model(model: &str) -> Result<Self, AgentError> {
        Self::PREFIXES
            .iter()
            .find(|(prefix, _)| model.starts_with(prefix))
            .map(|(_, provider)| *provider)
            .ok_or_else(|| AgentError::UnsupportedModel(model.to_string()))
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::OpenAI => "https://api.openai.com/v1",
            Provider::Anthropic => "https://api.anthropic.com/v1",
            Provider::DeepSeek => "https://api.deepseek.com/v1",
            Provider::Gemini => "https://generativelanguage.googleapis.com/v1",
        }
    }
}

/// How much dialogue is replayed to Gemini.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeminiHistory {
    /// Replay the whole conversation, like the other backends
    #[default]
    Full,
    /// Send only the most recent message
    Latest,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
    #[serde(default)]
    pub gemini_history: GeminiHistory,
}

impl ProviderSettings {
    /// Presence check only; the model prefix is checked by the provider factory.
    pub fn validate(&self) -> Result<(), AgentError> {
        if self.api_key.trim().is_empty() || self.model.trim().is_empty() {
            return Err(AgentError::Config(
                "Please configure your API key and model first".to_string(),
            ));
        }
        Ok(())
    }

    /// Environment variables win over the file.
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("BESTAGENT_API_KEY") {
            self.api_key = key;
        }
        if let Ok(model) = std::env::var("BESTAGENT_MODEL") {
            self.model = model;
        }
        if let Ok(endpoint) = std::env::var("BESTAGENT_API_ENDPOINT") {
            self.api_endpoint = Some(endpoint);
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub settings: ProviderSettings,
}

impl Config {
    fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".bestagent")
    }

    fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    pub fn sessions_dir() -> PathBuf {
        Self::config_dir().join("sessions")
    }

    pub fn input_history_path() -> PathBuf {
        Self::config_dir().join("input_history.txt")
    }

    pub fn load() -> Result<Config, AgentError> {
        Self::load_from(&Self::config_path())
    }

    /// Reads the config at `path`, writing a default one when it is missing.
    pub fn load_from(path: &Path) -> Result<Config, AgentError> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            return serde_yml::from_str::<Config>(&contents)
                .map_err(|e| AgentError::Config(format!("Parse {}: {}", path.display(), e)));
        }

        let config = Config::default();
        if let Err(e) = config.save_to(path) {
            tracing::warn!(path = %path.display(), error = %e, "could not write default config");
        }
        Ok(config)
    }

    pub fn save(&self) -> Result<(), AgentError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), AgentError> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let yaml_content = serde_yml::to_string(self)?;
        fs::write(path, yaml_content)?;
        Ok(())
    }
}
