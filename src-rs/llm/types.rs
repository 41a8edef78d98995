use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::session::SessionItem;
use crate::tools::ToolSchema;

/// A function call the model asked the service to run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub call_id: String,
    pub name: String,
    pub args: Value,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LLMResponse {
    /// Concatenated assistant text of this turn.
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
    /// Every output item of this turn, in order, ready to append to the
    /// conversation.
    pub items: Vec<SessionItem>,
    pub raw: Option<Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub instructions: String,
    pub input: Vec<SessionItem>,
    pub tools: Vec<ToolSchema>,
    pub temperature: Option<f64>,
    pub model: Option<String>,
    pub provider: Option<String>,
}

#[derive(Clone, Debug, Error)]
#[error("{code}: {message}")]
pub struct ProviderError {
    pub code: String,
    pub message: String,
    pub retryable: bool,
}

impl ProviderError {
    pub fn new(code: &str, message: &str, retryable: bool) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            retryable,
        }
    }
}

pub trait ProviderAdapter: Send + Sync {
    fn complete(&self, request: CompletionRequest) -> Result<LLMResponse, ProviderError>;
}
