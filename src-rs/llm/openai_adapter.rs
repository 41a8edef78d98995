use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::rotation::Rotator;
use super::types::{CompletionRequest, LLMResponse, ProviderAdapter, ProviderError, ToolCall};
use crate::session::SessionItem;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4.1-mini";

pub struct OpenAIConfig {
    pub api_keys: Vec<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: Option<f64>,
    pub timeout: Duration,
}

/// Client for the OpenAI Responses API.
pub struct OpenAIAdapter {
    cfg: OpenAIConfig,
    rotator: Rotator,
    client: Client,
}

impl OpenAIAdapter {
    pub fn new(mut cfg: OpenAIConfig) -> Result<Self, ProviderError> {
        if cfg.base_url.is_empty() {
            cfg.base_url = DEFAULT_OPENAI_BASE_URL.to_string();
        }
        if cfg.model.is_empty() {
            cfg.model = DEFAULT_OPENAI_MODEL.to_string();
        }
        let client = Client::builder()
            .timeout(cfg.timeout)
            .build()
            .map_err(|err| ProviderError::new("client_error", &err.to_string(), false))?;
        Ok(Self {
            rotator: Rotator::new(cfg.api_keys.clone()),
            cfg,
            client,
        })
    }
}

impl ProviderAdapter for OpenAIAdapter {
    fn complete(&self, request: CompletionRequest) -> Result<LLMResponse, ProviderError> {
        let model = request
            .model
            .clone()
            .unwrap_or_else(|| self.cfg.model.clone());
        let temperature = request.temperature.or(self.cfg.temperature);
        let payload = build_payload(&request, &model, temperature);

        let tries = self.rotator.len();
        if tries == 0 {
            return Err(ProviderError::new("auth_error", "no OpenAI API keys", false));
        }
        let mut last_err = None;
        for _ in 0..tries {
            let key = match self.rotator.next() {
                Some(key) => key,
                None => break,
            };
            match send_request(&self.client, &self.cfg.base_url, &key, &payload) {
                Ok(resp) => return Ok(resp),
                Err(err) if err.retryable => {
                    warn!(code = %err.code, "model request failed, trying next key");
                    last_err = Some(err);
                }
                Err(err) => return Err(err),
            }
        }
        Err(last_err.unwrap_or_else(|| ProviderError::new("api_error", "request failed", true)))
    }
}

pub fn build_payload(request: &CompletionRequest, model: &str, temperature: Option<f64>) -> Value {
    let input: Vec<Value> = request.input.iter().map(to_input_item).collect();
    let mut payload = json!({
        "model": model,
        "instructions": request.instructions,
        "input": input,
    });
    if !request.tools.is_empty() {
        payload["tools"] = json!(request.tools);
    }
    if let Some(temperature) = temperature {
        payload["temperature"] = json!(temperature);
    }
    payload
}

fn to_input_item(item: &SessionItem) -> Value {
    match item {
        SessionItem::Message { role, content } => json!({
            "role": role,
            "content": content,
        }),
        SessionItem::FunctionCall {
            call_id,
            name,
            arguments,
        } => json!({
            "type": "function_call",
            "call_id": call_id,
            "name": name,
            "arguments": arguments,
        }),
        SessionItem::FunctionCallOutput { call_id, output } => json!({
            "type": "function_call_output",
            "call_id": call_id,
            "output": output,
        }),
        SessionItem::HostedToolCall { raw, .. } => raw.clone(),
    }
}

fn send_request(
    client: &Client,
    base_url: &str,
    api_key: &str,
    payload: &Value,
) -> Result<LLMResponse, ProviderError> {
    let endpoint = format!("{}/responses", base_url.trim_end_matches('/'));
    debug!(endpoint = %endpoint, "sending model request");
    let resp = client
        .post(endpoint)
        .header("Content-Type", "application/json")
        .bearer_auth(api_key)
        .json(payload)
        .send()
        .map_err(|err| ProviderError::new("network_error", &err.to_string(), true))?;

    let status = resp.status();
    let body = resp.text().unwrap_or_default();
    if status.is_client_error() || status.is_server_error() {
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(ProviderError::new("auth_error", &body, true));
        }
        if status.as_u16() == 429 {
            return Err(ProviderError::new("rate_limit", &body, true));
        }
        if status.is_server_error() {
            return Err(ProviderError::new("server_error", &body, true));
        }
        return Err(ProviderError::new("api_error", &body, false));
    }

    let raw: Value = serde_json::from_str(&body)
        .map_err(|_| ProviderError::new("parse_error", "invalid json", false))?;
    if let Some(error) = raw.get("error").filter(|value| !value.is_null()) {
        let message = error
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("model returned an error");
        return Err(ProviderError::new("api_error", message, false));
    }
    let (content, tool_calls, items) = parse_response(&raw);
    Ok(LLMResponse {
        content,
        tool_calls,
        items,
        raw: Some(raw),
    })
}

pub fn parse_response(raw: &Value) -> (String, Vec<ToolCall>, Vec<SessionItem>) {
    let mut text = String::new();
    let mut tool_calls = Vec::new();
    let mut items = Vec::new();

    let output = match raw.get("output").and_then(|v| v.as_array()) {
        Some(output) => output,
        None => return (text, tool_calls, items),
    };

    for item in output {
        let kind = item.get("type").and_then(|v| v.as_str()).unwrap_or("");
        match kind {
            "message" => {
                let chunk: String = item
                    .get("content")
                    .and_then(|v| v.as_array())
                    .map(|parts| {
                        parts
                            .iter()
                            .filter(|part| part.get("type").and_then(|v| v.as_str()) == Some("output_text"))
                            .filter_map(|part| part.get("text").and_then(|v| v.as_str()))
                            .collect()
                    })
                    .unwrap_or_default();
                if !chunk.is_empty() {
                    text.push_str(&chunk);
                    items.push(SessionItem::assistant(&chunk));
                }
            }
            "function_call" => {
                let name = item.get("name").and_then(|v| v.as_str()).unwrap_or("");
                let call_id = item.get("call_id").and_then(|v| v.as_str()).unwrap_or("");
                let arguments = item.get("arguments").and_then(|v| v.as_str()).unwrap_or("{}");
                let args = serde_json::from_str(arguments)
                    .unwrap_or_else(|_| Value::String(arguments.to_string()));
                items.push(SessionItem::FunctionCall {
                    call_id: call_id.to_string(),
                    name: name.to_string(),
                    arguments: arguments.to_string(),
                });
                tool_calls.push(ToolCall {
                    call_id: call_id.to_string(),
                    name: name.to_string(),
                    args,
                });
            }
            hosted if hosted.ends_with("_call") => {
                items.push(SessionItem::HostedToolCall {
                    tool: hosted.to_string(),
                    raw: item.clone(),
                });
            }
            _ => {}
        }
    }

    (text, tool_calls, items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{CodeInterpreterTool, Tool};

    #[test]
    fn parses_text_function_and_hosted_calls() {
        let raw = json!({
            "id": "resp_1",
            "output": [
                {
                    "type": "code_interpreter_call",
                    "id": "ci_1",
                    "code": "print(2**10)",
                    "container_id": "cntr_1"
                },
                {
                    "type": "message",
                    "role": "assistant",
                    "content": [
                        {"type": "output_text", "text": "Let me check. "},
                        {"type": "output_text", "text": "One moment."}
                    ]
                },
                {
                    "type": "function_call",
                    "call_id": "call_7",
                    "name": "tavily_search",
                    "arguments": "{\"query\":\"latest gpu launch\"}"
                }
            ]
        });

        let (text, calls, items) = parse_response(&raw);
        assert_eq!(text, "Let me check. One moment.");
        assert_eq!(
            calls,
            vec![ToolCall {
                call_id: "call_7".to_string(),
                name: "tavily_search".to_string(),
                args: json!({"query": "latest gpu launch"}),
            }]
        );
        assert_eq!(items.len(), 3);
        assert!(matches!(&items[0], SessionItem::HostedToolCall { tool, .. } if tool == "code_interpreter_call"));
        assert_eq!(items[1], SessionItem::assistant("Let me check. One moment."));
        assert!(matches!(&items[2], SessionItem::FunctionCall { call_id, .. } if call_id == "call_7"));
    }

    #[test]
    fn bad_arguments_are_passed_through_as_text() {
        let raw = json!({
            "output": [
                {"type": "function_call", "call_id": "c", "name": "tavily_search", "arguments": "not json"}
            ]
        });
        let (_, calls, _) = parse_response(&raw);
        assert_eq!(calls[0].args, json!("not json"));
    }

    #[test]
    fn payload_replays_history_and_tools() {
        let request = CompletionRequest {
            instructions: "be brief".to_string(),
            input: vec![
                SessionItem::user("hi"),
                SessionItem::FunctionCall {
                    call_id: "c1".to_string(),
                    name: "tavily_search".to_string(),
                    arguments: "{}".to_string(),
                },
                SessionItem::FunctionCallOutput {
                    call_id: "c1".to_string(),
                    output: "No relevant results found.".to_string(),
                },
            ],
            tools: vec![Tool::CodeInterpreter(CodeInterpreterTool::default()).schema()],
            temperature: None,
            model: None,
            provider: None,
        };

        let payload = build_payload(&request, "gpt-4.1-mini", None);
        assert_eq!(payload["model"], "gpt-4.1-mini");
        assert_eq!(payload["instructions"], "be brief");
        assert!(payload.get("temperature").is_none());
        assert_eq!(payload["input"][0], json!({"role": "user", "content": "hi"}));
        assert_eq!(payload["input"][1]["type"], "function_call");
        assert_eq!(
            payload["input"][2],
            json!({"type": "function_call_output", "call_id": "c1", "output": "No relevant results found."})
        );
        assert_eq!(
            payload["tools"],
            json!([{"type": "code_interpreter", "container": {"type": "auto"}}])
        );
    }
}
