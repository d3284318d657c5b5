use crate::core::error::AgentError;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;

/// A fully resolved outbound POST.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Wire-level seam. Non-2xx statuses are returned, not turned into errors.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn post_json(&self, request: HttpRequest) -> Result<HttpResponse, AgentError>;
}

#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(&self, request: HttpRequest) -> Result<HttpResponse, AgentError> {
        let mut builder = self
            .client
            .post(&request.url)
            .body(serde_json::to_vec(&request.body)?);
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

#[derive(Clone)]
pub struct HttpClient {
    base_url: String,
    auth_header: Option<(String, String)>,
    extra_headers: HashMap<String, String>,
    query_params: Vec<(String, String)>,
    transport: Arc<dyn HttpTransport>,
}

impl HttpClient {
    pub fn new(
        base_url: String,
        auth_header: Option<(String, String)>,
        extra_headers: Option<HashMap<String, String>>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            base_url,
            auth_header,
            extra_headers: extra_headers.unwrap_or_default(),
            query_params: Vec::new(),
            transport,
        }
    }

    pub fn add_query_param(&mut self, key: &str, value: String) {
        self.query_params.push((key.to_string(), value));
    }

    pub fn url_for(&self, path: &str) -> Result<String, AgentError> {
        let raw = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let url = if self.query_params.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, &self.query_params)
        }
        .map_err(|e| AgentError::Config(format!("Invalid endpoint {}: {}", self.base_url, e)))?;
        Ok(url.to_string())
    }

    /// Posts `payload` and decodes a 2xx body into `R`.
    pub async fn post<T, R>(&self, path: &str, payload: &T) -> Result<R, AgentError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some((key, value)) = &self.auth_header {
            headers.push((key.clone(), value.clone()));
        }
        for (key, value) in &self.extra_headers {
            headers.push((key.clone(), value.clone()));
        }

        let request = HttpRequest {
            url: self.url_for(path)?,
            headers,
            body: serde_json::to_value(payload)?,
        };

        // The URL may carry the API key as a query parameter, so only the path is logged.
        tracing::debug!(base_url = %self.base_url, path, "sending provider request");
        let response = self.transport.post_json(request).await?;
        tracing::debug!(status = response.status, "provider responded");

        if !response.is_success() {
            return Err(AgentError::from_status(response.status, &response.body));
        }

        serde_json::from_str(&response.body)
            .map_err(|e| AgentError::MalformedResponse(format!("Unexpected response body: {}", e)))
    }
}
