mod common;

use std::time::Duration;

use research_agent_rs::llm::{CompletionRequest, OpenAIAdapter, OpenAIConfig, ProviderAdapter};
use research_agent_rs::session::SessionItem;
use research_agent_rs::tools::{SearchConfig, SearchTool};
use serde_json::json;

fn adapter(base_url: &str, keys: &[&str]) -> OpenAIAdapter {
    OpenAIAdapter::new(OpenAIConfig {
        api_keys: keys.iter().map(|key| key.to_string()).collect(),
        base_url: base_url.to_string(),
        model: "gpt-4.1-mini".to_string(),
        temperature: None,
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

fn request() -> CompletionRequest {
    let search = SearchTool::new(SearchConfig {
        api_key: String::new(),
        base_url: String::new(),
    })
    .unwrap();
    CompletionRequest {
        instructions: "research things".to_string(),
        input: vec![SessionItem::user("latest on solid-state batteries?")],
        tools: vec![search.schema()],
        temperature: None,
        model: None,
        provider: None,
    }
}

#[test]
fn sends_responses_request_and_parses_tool_call() {
    let body = json!({
        "id": "resp_123",
        "output": [
            {
                "type": "function_call",
                "call_id": "call_abc",
                "name": "tavily_search",
                "arguments": "{\"query\":\"solid-state batteries 2025\",\"max_results\":3}"
            }
        ]
    })
    .to_string();
    let (base_url, server) = common::serve_once("200 OK", &body);

    let response = adapter(&format!("{}/v1", base_url), &["sk-test"])
        .complete(request())
        .unwrap();

    assert!(response.content.is_empty());
    assert_eq!(response.tool_calls.len(), 1);
    assert_eq!(response.tool_calls[0].name, "tavily_search");
    assert_eq!(
        response.tool_calls[0].args,
        json!({"query": "solid-state batteries 2025", "max_results": 3})
    );

    let captured = server.join().unwrap();
    assert_eq!(captured.request_line, "POST /v1/responses HTTP/1.1");
    assert_eq!(captured.header("authorization"), Some("Bearer sk-test"));
    let sent = captured.json();
    assert_eq!(sent["model"], "gpt-4.1-mini");
    assert_eq!(sent["instructions"], "research things");
    assert_eq!(sent["input"][0]["role"], "user");
    assert_eq!(sent["tools"][0]["type"], "function");
    assert_eq!(sent["tools"][0]["name"], "tavily_search");
}

#[test]
fn final_message_text_is_returned() {
    let body = json!({
        "output": [
            {
                "type": "message",
                "role": "assistant",
                "content": [{"type": "output_text", "text": "According to a web search, prices fell."}]
            }
        ]
    })
    .to_string();
    let (base_url, server) = common::serve_once("200 OK", &body);

    let response = adapter(&base_url, &["sk-test"]).complete(request()).unwrap();

    assert_eq!(response.content, "According to a web search, prices fell.");
    assert!(response.tool_calls.is_empty());
    server.join().unwrap();
}

#[test]
fn bad_request_is_not_retried() {
    let (base_url, server) = common::serve_once("400 Bad Request", r#"{"error": {"message": "bad"}}"#);

    let err = adapter(&base_url, &["sk-one", "sk-two"])
        .complete(request())
        .unwrap_err();

    assert_eq!(err.code, "api_error");
    assert!(!err.retryable);
    server.join().unwrap();
}

#[test]
fn rate_limit_is_retryable() {
    let (base_url, server) = common::serve_once("429 Too Many Requests", "{}");

    let err = adapter(&base_url, &["sk-only"]).complete(request()).unwrap_err();

    assert_eq!(err.code, "rate_limit");
    assert!(err.retryable);
    server.join().unwrap();
}

#[test]
fn rate_limited_key_falls_through_to_the_next() {
    let body = json!({
        "output": [
            {
                "type": "message",
                "role": "assistant",
                "content": [{"type": "output_text", "text": "second key answered"}]
            }
        ]
    })
    .to_string();
    let (base_url, server) = common::serve_sequence(&[
        ("429 Too Many Requests", r#"{"error": {"message": "slow down"}}"#),
        ("200 OK", body.as_str()),
    ]);

    let response = adapter(&base_url, &["sk-one", "sk-two"])
        .complete(request())
        .unwrap();

    assert_eq!(response.content, "second key answered");
    let captured = server.join().unwrap();
    assert_eq!(captured.len(), 2);
    assert_eq!(captured[0].header("authorization"), Some("Bearer sk-one"));
    assert_eq!(captured[1].header("authorization"), Some("Bearer sk-two"));
}

#[test]
fn unauthorized_is_an_auth_error() {
    let (base_url, server) = common::serve_once("401 Unauthorized", r#"{"error": {"message": "bad key"}}"#);

    let err = adapter(&base_url, &["sk-revoked"]).complete(request()).unwrap_err();

    assert_eq!(err.code, "auth_error");
    assert!(err.retryable);
    server.join().unwrap();
}

#[test]
fn unavailable_is_a_server_error() {
    let (base_url, server) = common::serve_once("503 Service Unavailable", "{}");

    let err = adapter(&base_url, &["sk-only"]).complete(request()).unwrap_err();

    assert_eq!(err.code, "server_error");
    assert!(err.retryable);
    server.join().unwrap();
}

#[test]
fn missing_keys_fail_fast() {
    let err = adapter("http://127.0.0.1:9", &[]).complete(request()).unwrap_err();
    assert_eq!(err.code, "auth_error");
}
