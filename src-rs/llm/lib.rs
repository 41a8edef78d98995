pub mod openai_adapter;
pub mod rotation;
pub mod router;
pub mod types;

pub use openai_adapter::{OpenAIAdapter, OpenAIConfig};
pub use rotation::Rotator;
pub use router::LLMRouter;
pub use types::{CompletionRequest, LLMResponse, ProviderAdapter, ProviderError, ToolCall};
