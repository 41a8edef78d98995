use std::env;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::api::AppState;
use crate::config::AppConfig;
use crate::llm::{LLMRouter, OpenAIAdapter, OpenAIConfig, ProviderError};
use crate::presets::{analyst, live_researcher};
use crate::session::SqliteSession;
use crate::tools::{SearchConfig, SearchTool, ToolError};

const MODEL_TIMEOUT: Duration = Duration::from_secs(120);

fn load_keys_from_env(primary: &str, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Ok(raw) = env::var(primary) {
        for item in raw.split(',') {
            let trimmed = item.trim();
            if !trimmed.is_empty() {
                keys.push(trimmed.to_string());
            }
        }
    }
    for idx in 2..=10 {
        let key = format!("{}_{}", prefix, idx);
        if let Ok(value) = env::var(&key) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                keys.push(trimmed.to_string());
            }
        }
    }
    keys
}

pub fn load_openai_keys() -> Vec<String> {
    load_keys_from_env("OPENAI_API_KEY", "OPENAI_API_KEY")
}

pub fn load_tavily_key() -> Option<String> {
    env::var("TAVILY_API_KEY")
        .ok()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}

pub fn build_llm_router(cfg: &AppConfig) -> Result<LLMRouter, ProviderError> {
    let mut router = LLMRouter::new(&cfg.agent.provider);
    let adapter = OpenAIAdapter::new(OpenAIConfig {
        api_keys: cfg.openai_api_keys.clone(),
        base_url: cfg.openai_base_url.clone(),
        model: cfg.agent.model.clone(),
        temperature: cfg.agent.temperature,
        timeout: MODEL_TIMEOUT,
    })?;
    router.register_provider("openai", Arc::new(adapter));
    Ok(router)
}

pub fn build_search_tool(cfg: &AppConfig) -> Result<SearchTool, ToolError> {
    if cfg.tavily_api_key.is_none() {
        warn!("TAVILY_API_KEY not set; search calls will report the provider's error status");
    }
    SearchTool::new(SearchConfig {
        api_key: cfg.tavily_api_key.clone().unwrap_or_default(),
        base_url: cfg.tavily_base_url.clone(),
    })
}

/// Wires both agents and the shared session. Opens blocking HTTP clients,
/// so call it off the async runtime.
pub fn build_app_state(cfg: &AppConfig) -> anyhow::Result<AppState> {
    let router = Arc::new(build_llm_router(cfg)?);
    let search = build_search_tool(cfg)?;
    let live = live_researcher(router.clone(), search.clone(), cfg.agent.clone())?;
    let analyst = analyst(router, search, cfg.agent.clone())?;
    let session = SqliteSession::open(&cfg.session_db_path, &cfg.session_id)?;
    info!(
        session_id = %cfg.session_id,
        path = %cfg.session_db_path.display(),
        model = %cfg.agent.model,
        "agents ready"
    );
    Ok(AppState::new(Arc::new(live), Arc::new(analyst), Arc::new(session)))
}
