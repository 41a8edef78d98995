use serde_json::{json, Value};

use super::types::{ToolError, ToolSchema};

pub const CODE_INTERPRETER_TOOL_NAME: &str = "code_interpreter";

/// Sandboxed code execution hosted by the model provider. The service only
/// advertises it; the provider runs the code in a container it manages.
#[derive(Clone, Debug)]
pub struct CodeInterpreterTool {
    pub container: Value,
}

impl Default for CodeInterpreterTool {
    fn default() -> Self {
        Self {
            container: json!({"type": "auto"}),
        }
    }
}

impl CodeInterpreterTool {
    pub fn schema(&self) -> ToolSchema {
        ToolSchema::CodeInterpreter {
            container: self.container.clone(),
        }
    }

    pub fn invoke(&self, _args: Value) -> Result<String, ToolError> {
        Err(ToolError::Hosted(CODE_INTERPRETER_TOOL_NAME.to_string()))
    }
}
