#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use research_agent_rs::api::AppState;
use research_agent_rs::config::AgentConfig;
use research_agent_rs::llm::{
    CompletionRequest, LLMResponse, LLMRouter, ProviderAdapter, ProviderError, ToolCall,
};
use research_agent_rs::presets::{analyst, live_researcher};
use research_agent_rs::session::{SessionItem, SqliteSession};
use research_agent_rs::tools::{SearchConfig, SearchTool};
use serde_json::Value;

#[derive(Debug)]
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Serves exactly one HTTP request with a canned response and hands back
/// what the client sent.
pub fn serve_once(status: &str, body: &str) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Length: {}\r\nContent-Type: application/json\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = thread::spawn(move || {
        let (mut socket, _) = listener.accept().unwrap();
        let captured = read_request(&mut socket);
        socket.write_all(response.as_bytes()).unwrap();
        socket.flush().unwrap();
        captured
    });

    (format!("http://{}", addr), handle)
}

/// Serves one connection per canned response, in order. Every response
/// closes its connection, so each client request lands on the next one.
pub fn serve_sequence(responses: &[(&str, &str)]) -> (String, JoinHandle<Vec<CapturedRequest>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let responses: Vec<String> = responses
        .iter()
        .map(|(status, body)| {
            format!(
                "HTTP/1.1 {status}\r\nContent-Length: {}\r\nContent-Type: application/json\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
        })
        .collect();

    let handle = thread::spawn(move || {
        responses
            .iter()
            .map(|response| {
                let (mut socket, _) = listener.accept().unwrap();
                let captured = read_request(&mut socket);
                socket.write_all(response.as_bytes()).unwrap();
                socket.flush().unwrap();
                captured
            })
            .collect()
    });

    (format!("http://{}", addr), handle)
}

fn read_request(socket: &mut impl Read) -> CapturedRequest {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    let header_end = loop {
        let n = socket.read(&mut buf).unwrap();
        assert!(n > 0, "connection closed before headers");
        data.extend_from_slice(&buf[..n]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&data[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect();
    let content_length = headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);

    while data.len() < header_end + content_length {
        let n = socket.read(&mut buf).unwrap();
        assert!(n > 0, "connection closed before body");
        data.extend_from_slice(&buf[..n]);
    }

    CapturedRequest {
        request_line,
        headers,
        body: String::from_utf8_lossy(&data[header_end..header_end + content_length]).to_string(),
    }
}

/// Model provider that replays queued replies and records every request.
#[derive(Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<LLMResponse, ProviderError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub fn push(&self, reply: Result<LLMResponse, ProviderError>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl ProviderAdapter for ScriptedProvider {
    fn complete(&self, request: CompletionRequest) -> Result<LLMResponse, ProviderError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::new("script_exhausted", "no reply queued", false)))
    }
}

pub fn answer(text: &str) -> Result<LLMResponse, ProviderError> {
    Ok(LLMResponse {
        content: text.to_string(),
        tool_calls: Vec::new(),
        items: vec![SessionItem::assistant(text)],
        raw: None,
    })
}

pub fn search_call(call_id: &str, query: &str) -> Result<LLMResponse, ProviderError> {
    let args = serde_json::json!({"query": query});
    Ok(LLMResponse {
        content: String::new(),
        tool_calls: vec![ToolCall {
            call_id: call_id.to_string(),
            name: "tavily_search".to_string(),
            args: args.clone(),
        }],
        items: vec![SessionItem::FunctionCall {
            call_id: call_id.to_string(),
            name: "tavily_search".to_string(),
            arguments: args.to_string(),
        }],
        raw: None,
    })
}

/// Builds the state on a blocking thread; the search tool owns a blocking
/// HTTP client.
pub async fn app_state(provider: Arc<ScriptedProvider>, search_base_url: &str) -> AppState {
    let search_base_url = search_base_url.to_string();
    tokio::task::spawn_blocking(move || build_state(provider, &search_base_url))
        .await
        .unwrap()
}

fn build_state(provider: Arc<ScriptedProvider>, search_base_url: &str) -> AppState {
    let mut router = LLMRouter::new("openai");
    router.register_provider("openai", provider);
    let router = Arc::new(router);
    let search = SearchTool::new(SearchConfig {
        api_key: "tvly-test".to_string(),
        base_url: search_base_url.to_string(),
    })
    .unwrap();
    let live = live_researcher(router.clone(), search.clone(), AgentConfig::default()).unwrap();
    let analyst = analyst(router, search, AgentConfig::default()).unwrap();
    let session = SqliteSession::in_memory("live_researcher_practice").unwrap();
    AppState::new(Arc::new(live), Arc::new(analyst), Arc::new(session))
}
