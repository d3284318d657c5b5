mod common;

use bestagent::chat::ChatClient;
use bestagent::config::GeminiHistory;
use bestagent::core::error::AgentError;
use bestagent::providers::Message;
use bestagent::providers::base_client::{HttpClient, ReqwestTransport};
use bestagent::session::{MemorySessionStore, Session, SessionState};
use common::{RecordingTransport, header, settings};
use serde_json::json;
use std::sync::Arc;

fn session_with(messages: Vec<Message>) -> (Session, MemorySessionStore) {
    let store = MemorySessionStore::with_state(SessionState {
        messages,
        welcome_shown: true,
    });
    let session = Session::open(Box::new(store.clone())).unwrap();
    (session, store)
}

#[tokio::test]
async fn openai_replays_history_and_records_reply() {
    let transport = RecordingTransport::new();
    transport.respond(
        200,
        json!({"choices": [{"message": {"role": "assistant", "content": "hi"}}]}),
    );
    let client = ChatClient::new(Arc::new(transport.clone()));
    let (mut session, store) =
        session_with(vec![Message::user("earlier"), Message::assistant("noted")]);

    let reply = client
        .send(&mut session, &settings("gpt-4o"), "hello")
        .await
        .unwrap();

    assert_eq!(reply, "hi");
    let request = transport.last_request();
    assert_eq!(request.url, "https://api.openai.com/v1/chat/completions");
    assert_eq!(header(&request, "authorization"), Some("Bearer k"));
    assert_eq!(
        request.body,
        json!({
            "model": "gpt-4o",
            "messages": [
                {"role": "user", "content": "earlier"},
                {"role": "assistant", "content": "noted"},
                {"role": "user", "content": "hello"}
            ],
            "temperature": 0.7,
            "max_tokens": 2000
        })
    );
    assert_eq!(
        session.messages().last(),
        Some(&Message::assistant("hi"))
    );
    assert_eq!(store.snapshot().messages.len(), 4);
}

#[tokio::test]
async fn openai_endpoint_override_is_honoured() {
    let transport = RecordingTransport::new();
    transport.respond(200, json!({"choices": [{"message": {"content": "ok"}}]}));
    let client = ChatClient::new(Arc::new(transport.clone()));
    let (mut session, _) = session_with(Vec::new());

    let mut settings = settings("gpt-4o-mini");
    settings.api_endpoint = Some("http://localhost:8080/v1/".to_string());
    client.send(&mut session, &settings, "ping").await.unwrap();

    assert_eq!(
        transport.last_request().url,
        "http://localhost:8080/v1/chat/completions"
    );
}

#[tokio::test]
async fn provider_error_message_is_surfaced_and_log_untouched() {
    let transport = RecordingTransport::new();
    transport.respond(401, json!({"error": {"message": "invalid key"}}));
    let client = ChatClient::new(Arc::new(transport.clone()));
    let before = vec![Message::user("a"), Message::assistant("b")];
    let (mut session, store) = session_with(before.clone());

    let err = client
        .send(&mut session, &settings("gpt-4o"), "hello")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "invalid key");
    assert!(matches!(err, AgentError::Provider { status: 401, .. }));
    assert_eq!(session.messages(), before.as_slice());
    assert_eq!(store.save_count(), 0);
}

#[tokio::test]
async fn non_json_error_body_gets_generic_message() {
    let transport = RecordingTransport::new();
    transport.respond(503, json!("service unavailable"));
    let client = ChatClient::new(Arc::new(transport.clone()));
    let (mut session, _) = session_with(Vec::new());

    let err = client
        .send(&mut session, &settings("deepseek-chat"), "hello")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "API error: 503");
    assert!(session.messages().is_empty());
}

#[tokio::test]
async fn unsupported_model_makes_no_request() {
    let transport = RecordingTransport::new();
    let client = ChatClient::new(Arc::new(transport.clone()));
    let (mut session, _) = session_with(Vec::new());

    for model in ["llama-3-70b", "mistral-large", "o1-preview", ""] {
        let err = client
            .send(&mut session, &settings(model), "hello")
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::UnsupportedModel(_)), "model {model:?}");
    }

    assert!(transport.requests().is_empty());
    assert!(session.messages().is_empty());
}

#[tokio::test]
async fn anthropic_request_shape() {
    let transport = RecordingTransport::new();
    transport.respond(200, json!({"content": [{"type": "text", "text": "bonjour"}]}));
    let client = ChatClient::new(Arc::new(transport.clone()));
    let (mut session, _) = session_with(Vec::new());

    let reply = client
        .send(&mut session, &settings("claude-3-5-sonnet-20241022"), "hello")
        .await
        .unwrap();

    assert_eq!(reply, "bonjour");
    let request = transport.last_request();
    assert_eq!(request.url, "https://api.anthropic.com/v1/messages");
    assert_eq!(header(&request, "x-api-key"), Some("k"));
    assert_eq!(header(&request, "anthropic-version"), Some("2023-06-01"));
    assert_eq!(header(&request, "authorization"), None);
    assert_eq!(
        request.body,
        json!({
            "model": "claude-3-5-sonnet-20241022",
            "messages": [{"role": "user", "content": "hello"}],
            "max_tokens": 2000
        })
    );
}

#[tokio::test]
async fn deepseek_uses_fixed_base_url() {
    let transport = RecordingTransport::new();
    transport.respond(200, json!({"choices": [{"message": {"content": "深度"}}]}));
    let client = ChatClient::new(Arc::new(transport.clone()));
    let (mut session, _) = session_with(Vec::new());

    let mut settings = settings("deepseek-reasoner");
    settings.api_endpoint = Some("http://ignored.local/v1".to_string());
    let reply = client.send(&mut session, &settings, "hi").await.unwrap();

    assert_eq!(reply, "深度");
    assert_eq!(
        transport.last_request().url,
        "https://api.deepseek.com/v1/chat/completions"
    );
}

#[tokio::test]
async fn gemini_replays_full_history_by_default() {
    let transport = RecordingTransport::new();
    transport.respond(
        200,
        json!({"candidates": [{"content": {"role": "model", "parts": [{"text": "g'day"}]}}]}),
    );
    let client = ChatClient::new(Arc::new(transport.clone()));
    let (mut session, _) = session_with(vec![Message::user("q1"), Message::assistant("a1")]);

    let reply = client
        .send(&mut session, &settings("gemini-pro"), "q2")
        .await
        .unwrap();

    assert_eq!(reply, "g'day");
    let request = transport.last_request();
    assert_eq!(
        request.url,
        "https://generativelanguage.googleapis.com/v1/models/gemini-pro:generateContent?key=k"
    );
    assert_eq!(header(&request, "authorization"), None);
    assert_eq!(
        request.body,
        json!({
            "contents": [
                {"role": "user", "parts": [{"text": "q1"}]},
                {"role": "model", "parts": [{"text": "a1"}]},
                {"role": "user", "parts": [{"text": "q2"}]}
            ]
        })
    );
}

#[tokio::test]
async fn gemini_latest_mode_sends_only_last_message() {
    let transport = RecordingTransport::new();
    transport.respond(
        200,
        json!({"candidates": [{"content": {"parts": [{"text": "short"}]}}]}),
    );
    let client = ChatClient::new(Arc::new(transport.clone()));
    let (mut session, _) = session_with(vec![Message::user("q1"), Message::assistant("a1")]);

    let mut settings = settings("gemini-1.5-flash");
    settings.gemini_history = GeminiHistory::Latest;
    client.send(&mut session, &settings, "q2").await.unwrap();

    assert_eq!(
        transport.last_request().body,
        json!({"contents": [{"parts": [{"text": "q2"}]}]})
    );
    // The local log still keeps every turn.
    assert_eq!(session.messages().len(), 4);
}

#[tokio::test]
async fn success_without_reply_field_is_malformed() {
    let transport = RecordingTransport::new();
    transport.respond(200, json!({"choices": []}));
    let client = ChatClient::new(Arc::new(transport.clone()));
    let (mut session, _) = session_with(Vec::new());

    let err = client
        .send(&mut session, &settings("gpt-4o"), "hello")
        .await
        .unwrap_err();

    assert!(matches!(err, AgentError::MalformedResponse(_)));
    assert!(session.messages().is_empty());
}

#[tokio::test]
async fn gemini_api_key_is_url_encoded() {
    let transport = RecordingTransport::new();
    transport.respond(
        200,
        json!({"candidates": [{"content": {"parts": [{"text": "x"}]}}]}),
    );
    let client = ChatClient::new(Arc::new(transport.clone()));
    let (mut session, _) = session_with(Vec::new());

    let mut settings = settings("gemini-pro");
    settings.api_key = "a b&c".to_string();
    client.send(&mut session, &settings, "hi").await.unwrap();

    assert!(transport.last_request().url.ends_with("?key=a+b%26c"));
}

#[tokio::test]
async fn connection_failure_does_not_leak_query_key() {
    // Nothing listens on port 1, so the request fails before any response.
    let mut client = HttpClient::new(
        "http://127.0.0.1:1/v1".to_string(),
        None,
        None,
        Arc::new(ReqwestTransport::new()),
    );
    client.add_query_param("key", "SECRET-KEY-123".to_string());

    let err = client
        .post::<_, serde_json::Value>("models/gemini-pro:generateContent", &json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, AgentError::Network(_)));
    assert!(!err.to_string().contains("SECRET-KEY-123"), "{err}");
}
