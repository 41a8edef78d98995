use std::net::SocketAddr;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::{
    handle_ask_analyst, handle_ask_live, handle_clear_session, handle_health, handle_session,
    AppState,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/session", get(handle_session).delete(handle_clear_session))
        .route("/ask/live", post(handle_ask_live))
        .route("/ask/analyst", post(handle_ask_analyst))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub struct AgentServer {
    pub host: String,
    pub port: u16,
    pub state: AppState,
}

impl AgentServer {
    pub fn new(host: &str, port: u16, state: AppState) -> Self {
        Self {
            host: host.to_string(),
            port,
            state,
        }
    }

    pub async fn start(&self) -> anyhow::Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.host, self.port).parse()?;
        let app = router(self.state.clone());
        info!("listening on {}", addr);
        axum::Server::bind(&addr)
            .serve(app.into_make_service())
            .await?;
        Ok(())
    }
}
