use std::io;
use thiserror::Error;

/// Unified error type for bestagent
#[derive(Error, Debug)]
pub enum AgentError {
    /// Model identifier does not map to any known provider
    #[error("Unsupported model: {0}")]
    UnsupportedModel(String),

    /// Non-2xx response from a provider. The message is shown verbatim.
    #[error("{message}")]
    Provider { status: u16, message: String },

    /// 2xx response that lacks the documented reply field
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// User input errors
    #[error("Input error: {0}")]
    Input(String),

    /// Workspace command issued with no folder open
    #[error("No workspace folder is open")]
    NoWorkspace,

    /// IO-related errors
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Network-related errors
    #[error("Network error: {0}")]
    Network(String),
}

impl AgentError {
    /// Builds a provider error from a status code and an optional body.
    ///
    /// Uses `error.message` from the body when it parses, otherwise falls
    /// back to `API error: <status>`.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("API error: {}", status));
        AgentError::Provider { status, message }
    }
}

impl From<reqwest::Error> for AgentError {
    fn from(err: reqwest::Error) -> Self {
        // The URL can carry an API key in its query string.
        let err = err.without_url();
        if err.is_timeout() {
            AgentError::Network(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            AgentError::Network(format!("Connection failed: {}", err))
        } else {
            AgentError::Network(format!("Request failed: {}", err))
        }
    }
}

impl From<serde_json::Error> for AgentError {
    fn from(err: serde_json::Error) -> Self {
        AgentError::Serialization(format!("JSON error: {}", err))
    }
}

impl From<serde_yml::Error> for AgentError {
    fn from(err: serde_yml::Error) -> Self {
        AgentError::Serialization(format!("YAML error: {}", err))
    }
}
