//! Configuration, read from the process environment at startup.
//!
//! - `OPENAI_API_KEY` - required; comma separated list, plus `OPENAI_API_KEY_2..10`.
//! - `OPENAI_BASE_URL` - defaults to `https://api.openai.com/v1`.
//! - `TAVILY_API_KEY` - search provider key.
//! - `TAVILY_BASE_URL` - defaults to `https://api.tavily.com`.
//! - `AGENT_MODEL` - model for both agents, defaults to `gpt-4.1-mini`.
//! - `AGENT_MAX_ITERATIONS` - tool-call loop bound, defaults to `10`.
//! - `SESSION_ID` - conversation key, defaults to `live_researcher_practice`.
//! - `SESSION_DB_PATH` - SQLite file, defaults to `agent_sessions.db`.
//! - `HOST` / `PORT` - listen address, defaults to `127.0.0.1:5000`.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::helpers::{load_openai_keys, load_tavily_key};
use crate::llm::openai_adapter::{DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL};
use crate::tools::search::DEFAULT_SEARCH_BASE_URL;

pub const DEFAULT_SESSION_ID: &str = "live_researcher_practice";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Per-agent model settings.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentConfig {
    pub provider: String,
    pub model: String,
    pub max_iterations: usize,
    pub temperature: Option<f64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            max_iterations: 10,
            temperature: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub openai_api_keys: Vec<String>,
    pub openai_base_url: String,
    pub tavily_api_key: Option<String>,
    pub tavily_base_url: String,
    pub agent: AgentConfig,
    pub session_id: String,
    pub session_db_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let openai_api_keys = load_openai_keys();
        if openai_api_keys.is_empty() {
            return Err(ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()));
        }

        let mut agent = AgentConfig::default();
        if let Some(model) = env_opt("AGENT_MODEL") {
            agent.model = model;
        }
        if let Some(raw) = env_opt("AGENT_MAX_ITERATIONS") {
            agent.max_iterations = match raw.parse::<usize>() {
                Ok(value) if value > 0 => value,
                _ => return Err(ConfigError::InvalidValue("AGENT_MAX_ITERATIONS".to_string(), raw)),
            };
        }

        let port = match env_opt("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string(), raw))?,
            None => 5000,
        };

        Ok(Self {
            host: env_or("HOST", "127.0.0.1"),
            port,
            openai_api_keys,
            openai_base_url: env_or("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            tavily_api_key: load_tavily_key(),
            tavily_base_url: env_or("TAVILY_BASE_URL", DEFAULT_SEARCH_BASE_URL),
            agent,
            session_id: env_or("SESSION_ID", DEFAULT_SESSION_ID),
            session_db_path: PathBuf::from(env_or("SESSION_DB_PATH", "agent_sessions.db")),
        })
    }
}

fn env_opt(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => None,
    }
}

fn env_or(key: &str, fallback: &str) -> String {
    env_opt(key).unwrap_or_else(|| fallback.to_string())
}
