pub mod store;
pub mod types;

pub use store::SqliteSession;
pub use types::{SessionError, SessionItem};
