use serde_json::Value;
use tracing::debug;

use super::types::{Tool, ToolError, ToolResult, ToolSchema};

/// Ordered set of tools bound to one agent. Registration order is the order
/// the tools are advertised to the model.
#[derive(Clone, Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<Tool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    pub fn register(&mut self, tool: Tool) -> Result<(), ToolError> {
        let name = tool.name().to_string();
        if name.is_empty() {
            return Err(ToolError::InvalidName);
        }
        if self.has(&name) {
            return Err(ToolError::Duplicate(name));
        }
        self.tools.push(tool);
        Ok(())
    }

    pub fn execute(&self, name: &str, args: Value) -> ToolResult {
        let outcome = match self.tools.iter().find(|tool| tool.name() == name) {
            Some(tool) => tool.invoke(args),
            None => Err(ToolError::NotFound(name.to_string())),
        };

        match outcome {
            Ok(output) => ToolResult {
                success: true,
                output: Some(output),
                error: None,
            },
            Err(err) => {
                debug!(tool = name, error = %err, "tool invocation failed");
                ToolResult {
                    success: false,
                    output: None,
                    error: Some(err.to_string()),
                }
            }
        }
    }

    pub fn get_schemas(&self) -> Vec<ToolSchema> {
        self.tools.iter().map(Tool::schema).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(Tool::name).collect()
    }

    pub fn has(&self, name: &str) -> bool {
        self.tools.iter().any(|tool| tool.name() == name)
    }

    pub fn count(&self) -> usize {
        self.tools.len()
    }
}
