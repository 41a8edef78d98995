use thiserror::Error;

use crate::llm::ProviderError;
use crate::session::SessionError;

#[derive(Clone, Debug)]
pub struct AgentResult {
    pub output: String,
    pub iterations: usize,
    /// Names of the function tools invoked during the run, in call order.
    pub tool_calls: Vec<String>,
}

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("model provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("max iterations reached ({0})")]
    MaxIterations(usize),
}
