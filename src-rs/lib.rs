pub mod agent;
pub mod config;
pub mod helpers;
pub mod presets;
pub mod result;

#[path = "llm/lib.rs"]
pub mod llm;
#[path = "tools/lib.rs"]
pub mod tools;
#[path = "session/lib.rs"]
pub mod session;
#[path = "api/lib.rs"]
pub mod api;

pub use agent::Agent;
pub use config::{AgentConfig, AppConfig};
pub use result::{AgentError, AgentResult};
