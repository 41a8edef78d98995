use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug)]
pub struct CLIConfig {
    pub base_url: String,
    pub agent: AgentKind,
    pub debug: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AgentKind {
    Live,
    Analyst,
}

impl AgentKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "live" | "researcher" => Some(AgentKind::Live),
            "analyst" => Some(AgentKind::Analyst),
            _ => None,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            AgentKind::Live => "/ask/live",
            AgentKind::Analyst => "/ask/analyst",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgentKind::Live => "live",
            AgentKind::Analyst => "analyst",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct SessionInfo {
    pub session_id: String,
    pub items: Vec<Value>,
}
