use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::code_interpreter::CodeInterpreterTool;
use super::search::SearchTool;

/// Tool declaration as advertised to the model provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolSchema {
    Function {
        name: String,
        description: String,
        parameters: Value,
    },
    CodeInterpreter {
        container: Value,
    },
}

impl ToolSchema {
    pub fn name(&self) -> &str {
        match self {
            ToolSchema::Function { name, .. } => name.as_str(),
            ToolSchema::CodeInterpreter { .. } => super::code_interpreter::CODE_INTERPRETER_TOOL_NAME,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    pub output: Option<String>,
    pub error: Option<String>,
}

impl ToolResult {
    /// Text handed back to the model for this invocation.
    pub fn render(&self, tool: &str) -> String {
        if self.success {
            self.output.clone().unwrap_or_default()
        } else {
            format!(
                "Tool {} error: {}",
                tool,
                self.error.as_deref().unwrap_or("unknown error")
            )
        }
    }
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("invalid tool name")]
    InvalidName,

    #[error("tool already registered: {0}")]
    Duplicate(String),

    #[error("tool not found: {0}")]
    NotFound(String),

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("tool {0} is executed by the model provider")]
    Hosted(String),

    #[error("tool client error: {0}")]
    Client(String),
}

/// Every capability an agent can be bound to.
#[derive(Clone, Debug)]
pub enum Tool {
    Search(SearchTool),
    CodeInterpreter(CodeInterpreterTool),
}

impl Tool {
    pub fn name(&self) -> &str {
        match self {
            Tool::Search(_) => super::search::SEARCH_TOOL_NAME,
            Tool::CodeInterpreter(_) => super::code_interpreter::CODE_INTERPRETER_TOOL_NAME,
        }
    }

    pub fn schema(&self) -> ToolSchema {
        match self {
            Tool::Search(tool) => tool.schema(),
            Tool::CodeInterpreter(tool) => tool.schema(),
        }
    }

    pub fn invoke(&self, args: Value) -> Result<String, ToolError> {
        match self {
            Tool::Search(tool) => tool.invoke(args),
            Tool::CodeInterpreter(tool) => tool.invoke(args),
        }
    }
}
