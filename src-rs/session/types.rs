use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// One entry of a conversation log, in the order the model saw it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionItem {
    Message {
        role: String,
        content: String,
    },
    FunctionCall {
        call_id: String,
        name: String,
        arguments: String,
    },
    FunctionCallOutput {
        call_id: String,
        output: String,
    },
    /// A call the provider executed itself (e.g. code interpreter). Kept
    /// verbatim so it can be replayed as context.
    HostedToolCall {
        tool: String,
        raw: Value,
    },
}

impl SessionItem {
    pub fn user(content: &str) -> Self {
        SessionItem::Message {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }

    pub fn assistant(content: &str) -> Self {
        SessionItem::Message {
            role: "assistant".to_string(),
            content: content.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("session item encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("session lock poisoned")]
    Lock,
}
