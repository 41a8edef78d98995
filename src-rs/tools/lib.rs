pub mod code_interpreter;
pub mod registry;
pub mod search;
pub mod types;

pub use code_interpreter::{CodeInterpreterTool, CODE_INTERPRETER_TOOL_NAME};
pub use registry::ToolRegistry;
pub use search::{SearchConfig, SearchHit, SearchParams, SearchTool, SEARCH_TOOL_NAME};
pub use types::{Tool, ToolError, ToolResult, ToolSchema};
