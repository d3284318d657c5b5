#![allow(dead_code)]

use async_trait::async_trait;
use bestagent::config::ProviderSettings;
use bestagent::core::error::AgentError;
use bestagent::providers::base_client::{HttpRequest, HttpResponse, HttpTransport};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Records every request and answers from a queue of canned responses.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    requests: Arc<Mutex<Vec<HttpRequest>>>,
    responses: Arc<Mutex<VecDeque<HttpResponse>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: serde_json::Value) -> &Self {
        self.responses.lock().unwrap().push_back(HttpResponse {
            status,
            body: body.to_string(),
        });
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("no request was sent")
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn post_json(&self, request: HttpRequest) -> Result<HttpResponse, AgentError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AgentError::Network("no canned response left".to_string()))
    }
}

pub fn settings(model: &str) -> ProviderSettings {
    ProviderSettings {
        api_key: "k".to_string(),
        model: model.to_string(),
        ..Default::default()
    }
}

pub fn header<'a>(request: &'a HttpRequest, name: &str) -> Option<&'a str> {
    request
        .headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}
