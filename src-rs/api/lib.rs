pub mod handlers;
pub mod server;

pub use handlers::{ApiError, AppState, AskRequest, AskResponse};
pub use server::{router, AgentServer};
