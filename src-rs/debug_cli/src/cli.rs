use std::env;

use crate::models::{AgentKind, CLIConfig};

const DEFAULT_URL: &str = "http://localhost:5000";

pub fn parse_config() -> CLIConfig {
    let mut cfg = CLIConfig {
        base_url: env_or("RESEARCH_AGENT_URL", DEFAULT_URL.to_string()),
        agent: env_opt("RESEARCH_AGENT_MODE")
            .and_then(|value| AgentKind::parse(&value))
            .unwrap_or(AgentKind::Live),
        debug: env_bool("RESEARCH_AGENT_DEBUG", false),
    };

    let args: Vec<String> = env::args().collect();
    let mut idx = 1;
    while idx < args.len() {
        match args[idx].as_str() {
            "--base" => {
                if let Some(value) = args.get(idx + 1) {
                    cfg.base_url = value.clone();
                    idx += 1;
                }
            }
            "--agent" => {
                if let Some(value) = args.get(idx + 1) {
                    if let Some(kind) = AgentKind::parse(value) {
                        cfg.agent = kind;
                    }
                    idx += 1;
                }
            }
            "--debug" => cfg.debug = true,
            _ => {}
        }
        idx += 1;
    }

    cfg
}

fn env_or(key: &str, fallback: String) -> String {
    env::var(key).unwrap_or(fallback)
}

fn env_opt(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

fn env_bool(key: &str, fallback: bool) -> bool {
    match env::var(key) {
        Ok(value) => value.parse::<bool>().unwrap_or(fallback),
        Err(_) => fallback,
    }
}
