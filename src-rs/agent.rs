use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::AgentConfig;
use crate::llm::{CompletionRequest, LLMRouter};
use crate::result::{AgentError, AgentResult};
use crate::session::{SessionItem, SqliteSession};
use crate::tools::ToolRegistry;

/// A named pairing of instructions, model settings and tools. Immutable
/// once built; the same agent serves every request.
pub struct Agent {
    pub name: String,
    pub config: AgentConfig,
    pub instructions: String,
    pub router: Arc<LLMRouter>,
    pub tools: ToolRegistry,
}

impl Agent {
    pub fn new(
        name: &str,
        mut config: AgentConfig,
        instructions: &str,
        router: Arc<LLMRouter>,
        tools: ToolRegistry,
    ) -> Self {
        let resolved_name = if name.is_empty() { "agent" } else { name };
        let instructions = if instructions.is_empty() {
            "You are a helpful assistant."
        } else {
            instructions
        };
        if config.provider.is_empty() {
            config.provider = AgentConfig::default().provider;
        }
        if config.model.is_empty() {
            config.model = AgentConfig::default().model;
        }
        if config.max_iterations == 0 {
            config.max_iterations = AgentConfig::default().max_iterations;
        }
        Self {
            name: resolved_name.to_string(),
            config,
            instructions: instructions.to_string(),
            router,
            tools,
        }
    }

    /// Runs the tool-call loop to completion on the calling thread.
    ///
    /// Prior session items are replayed as context. The new turn (question,
    /// model output, tool records) is appended to the session only when the
    /// run produces a final answer.
    pub fn execute(&self, session: &SqliteSession, input: &str) -> Result<AgentResult, AgentError> {
        let history = session.get_items(None)?;
        let mut turn = vec![SessionItem::user(input)];
        let tool_schemas = self.tools.get_schemas();
        let mut invoked = Vec::new();

        debug!(agent = %self.name, history = history.len(), "starting run");

        for iteration in 1..=self.config.max_iterations {
            let request = CompletionRequest {
                instructions: self.instructions.clone(),
                input: history.iter().chain(turn.iter()).cloned().collect(),
                tools: tool_schemas.clone(),
                temperature: self.config.temperature,
                model: Some(self.config.model.clone()),
                provider: Some(self.config.provider.clone()),
            };
            let response = self.router.complete(request)?;
            turn.extend(response.items);

            if response.tool_calls.is_empty() {
                session.add_items(&turn)?;
                info!(agent = %self.name, iterations = iteration, tools = ?invoked, "run completed");
                return Ok(AgentResult {
                    output: response.content,
                    iterations: iteration,
                    tool_calls: invoked,
                });
            }

            for call in response.tool_calls {
                debug!(agent = %self.name, tool = %call.name, "invoking tool");
                let result = self.tools.execute(&call.name, call.args);
                turn.push(SessionItem::FunctionCallOutput {
                    call_id: call.call_id,
                    output: result.render(&call.name),
                });
                invoked.push(call.name);
            }
        }

        warn!(agent = %self.name, limit = self.config.max_iterations, "run hit iteration limit");
        Err(AgentError::MaxIterations(self.config.max_iterations))
    }
}
