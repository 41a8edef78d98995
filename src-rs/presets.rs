//! The two agents the service exposes.

use std::sync::Arc;

use crate::agent::Agent;
use crate::config::AgentConfig;
use crate::llm::LLMRouter;
use crate::tools::{CodeInterpreterTool, SearchTool, Tool, ToolError, ToolRegistry};

pub const LIVE_RESEARCHER_NAME: &str = "Live Market Researcher";
pub const ANALYST_NAME: &str = "Analyst Agent";

pub const LIVE_RESEARCHER_INSTRUCTIONS: &str = r#"
CONTEXT:
You are a world-class market research assistant with access to real-time web search via the tavily_search tool.

INSTRUCTION:
- Analyze the user's question and determine if recent or real-time information is needed.
- If the question involves recent events, news, or product info, always call tavily_search.
- Summarize search results clearly and concisely, do not copy-paste.
- Always start your answer with: "According to a web search …"
"#;

pub const ANALYST_INSTRUCTIONS: &str = r#"
CONTEXT:
You are a world-class market research assistant with access to both real-time web search (via the tavily_search tool) and Python code execution (via the code_interpreter tool).

INSTRUCTION:
- Carefully analyze the user's question to determine whether it requires:
    - Recent or real-time information
    - Data analysis or calculations
    - Or both
- Use tavily_search for up-to-date facts.
- Use code_interpreter for calculations.
- Summarize findings clearly.
- When using search, begin with: "According to a web search …"
"#;

/// Search-only agent for news and product questions.
pub fn live_researcher(
    router: Arc<LLMRouter>,
    search: SearchTool,
    config: AgentConfig,
) -> Result<Agent, ToolError> {
    let mut tools = ToolRegistry::new();
    tools.register(Tool::Search(search))?;
    Ok(Agent::new(
        LIVE_RESEARCHER_NAME,
        config,
        LIVE_RESEARCHER_INSTRUCTIONS,
        router,
        tools,
    ))
}

/// Search plus provider-hosted code execution.
pub fn analyst(
    router: Arc<LLMRouter>,
    search: SearchTool,
    config: AgentConfig,
) -> Result<Agent, ToolError> {
    let mut tools = ToolRegistry::new();
    tools.register(Tool::Search(search))?;
    tools.register(Tool::CodeInterpreter(CodeInterpreterTool::default()))?;
    Ok(Agent::new(ANALYST_NAME, config, ANALYST_INSTRUCTIONS, router, tools))
}
