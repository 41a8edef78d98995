use std::io::{self, Write};

use serde_json::Value;

use crate::models::{AskResponse, CLIConfig, SessionInfo};

pub fn banner(cfg: &CLIConfig) {
    println!("Research Agent Debug CLI");
    println!("API: {}  Agent: {}", cfg.base_url, cfg.agent.label());
    println!("Type /help for commands.");
}

pub fn prompt(agent: &str) {
    print!("{}> ", agent);
    let _ = io::stdout().flush();
}

pub fn help() {
    println!("Commands:");
    println!("  /help                 Show commands");
    println!("  /exit | /quit          Exit");
    println!("  /agent <live|analyst>  Switch agent");
    println!("  /history [limit]       Show the shared session");
    println!("  /reset                 Clear the shared session");
    println!("  /debug [on|off]        Toggle tool records in /history");
    println!("  /config                Show current config");
    println!("  /base <url>            Update base URL");
}

pub fn answer(resp: &AskResponse) {
    println!("assistant> {}", resp.answer);
}

pub fn history(session: &SessionInfo, debug: bool) {
    if session.items.is_empty() {
        println!("no history in session {}", session.session_id);
        return;
    }
    println!("session {}:", session.session_id);
    for item in &session.items {
        if let Some(line) = describe(item, debug) {
            println!("{}", line);
        }
    }
}

fn describe(item: &Value, debug: bool) -> Option<String> {
    let field = |name: &str| item.get(name).and_then(|v| v.as_str()).unwrap_or("");
    match field("type") {
        "message" => Some(format!("{}> {}", field("role"), field("content"))),
        "function_call" if debug => Some(format!("tool> {}({})", field("name"), field("arguments"))),
        "function_call_output" if debug => Some(format!("tool result> {}", field("output"))),
        "hosted_tool_call" if debug => Some(format!("hosted> {}", field("tool"))),
        _ => None,
    }
}

pub fn config(cfg: &CLIConfig) {
    println!("config:");
    println!("  base: {}", cfg.base_url);
    println!("  agent: {}", cfg.agent.label());
    println!("  debug: {}", cfg.debug);
}

pub fn info(msg: &str) {
    println!("{}", msg);
}

pub fn error(msg: &str) {
    eprintln!("error: {}", msg);
}
