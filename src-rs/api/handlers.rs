use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{error, info};

use crate::agent::Agent;
use crate::result::AgentError;
use crate::session::{SessionError, SessionItem, SqliteSession};

/// Shared by every handler. Both agents write to the same session.
#[derive(Clone)]
pub struct AppState {
    pub live: Arc<Agent>,
    pub analyst: Arc<Agent>,
    pub session: Arc<SqliteSession>,
}

impl AppState {
    pub fn new(live: Arc<Agent>, analyst: Arc<Agent>, session: Arc<SqliteSession>) -> Self {
        Self {
            live,
            analyst,
            session,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct SessionQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub items: Vec<SessionItem>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("worker task failed: {0}")]
    Worker(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": self.to_string()})),
        )
            .into_response()
    }
}

pub async fn handle_health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok", "version": env!("CARGO_PKG_VERSION")}))
}

pub async fn handle_ask_live(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    ask(state.live.clone(), state.session.clone(), req.question).await
}

pub async fn handle_ask_analyst(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    ask(state.analyst.clone(), state.session.clone(), req.question).await
}

pub async fn handle_session(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state.session.clone();
    let items = tokio::task::spawn_blocking(move || session.get_items(query.limit))
        .await
        .map_err(|err| ApiError::Worker(err.to_string()))??;
    Ok(Json(SessionResponse {
        session_id: state.session.session_id().to_string(),
        items,
    }))
}

pub async fn handle_clear_session(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let session = state.session.clone();
    tokio::task::spawn_blocking(move || session.clear())
        .await
        .map_err(|err| ApiError::Worker(err.to_string()))??;
    info!(session_id = %state.session.session_id(), "session cleared");
    Ok(Json(json!({"cleared": true})))
}

/// Holds the request until the agent's loop finishes on a blocking thread.
async fn ask(
    agent: Arc<Agent>,
    session: Arc<SqliteSession>,
    question: String,
) -> Result<Json<AskResponse>, ApiError> {
    info!(agent = %agent.name, "question received");
    let result = tokio::task::spawn_blocking(move || agent.execute(&session, &question))
        .await
        .map_err(|err| ApiError::Worker(err.to_string()))??;
    Ok(Json(AskResponse {
        answer: result.output,
    }))
}
