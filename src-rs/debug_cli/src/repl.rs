use std::io;

use crate::client::HTTPClient;
use crate::models::{AgentKind, CLIConfig};
use crate::render;

pub struct REPL {
    pub config: CLIConfig,
    pub client: HTTPClient,
}

impl REPL {
    pub fn new(config: CLIConfig, client: HTTPClient) -> Self {
        Self { config, client }
    }

    pub fn run(&mut self) {
        render::banner(&self.config);
        loop {
            render::prompt(self.config.agent.label());
            let mut line = String::new();
            match io::stdin().read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
            let line = line.trim().to_string();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('/') {
                if self.handle_command(&line) {
                    break;
                }
                continue;
            }
            self.send(&line);
        }
    }

    fn handle_command(&mut self, line: &str) -> bool {
        let mut parts = line.splitn(2, ' ');
        let cmd = parts.next().unwrap_or("").trim_start_matches('/');
        let rest = parts.next().unwrap_or("").trim();
        match cmd {
            "exit" | "quit" => return true,
            "help" => render::help(),
            "agent" => {
                if rest.is_empty() {
                    render::info(&format!("agent: {}", self.config.agent.label()));
                } else if let Some(kind) = AgentKind::parse(rest) {
                    self.config.agent = kind;
                    render::info("agent updated");
                } else {
                    render::error("unknown agent, use live or analyst");
                }
            }
            "history" => {
                let limit = rest.parse::<usize>().ok();
                match self.client.session(limit) {
                    Ok(session) => render::history(&session, self.config.debug),
                    Err(err) => render::error(&err),
                }
            }
            "reset" => match self.client.clear_session() {
                Ok(()) => render::info("session cleared"),
                Err(err) => render::error(&err),
            },
            "debug" => {
                if rest.is_empty() {
                    self.config.debug = !self.config.debug;
                    render::info(&format!("debug: {}", self.config.debug));
                } else if let Some(flag) = parse_on_off(rest) {
                    self.config.debug = flag;
                    render::info(&format!("debug: {}", self.config.debug));
                } else {
                    render::error("invalid debug flag");
                }
            }
            "config" => render::config(&self.config),
            "base" => {
                if rest.is_empty() {
                    render::info(&format!("base: {}", self.config.base_url));
                } else {
                    match HTTPClient::new(rest) {
                        Ok(client) => {
                            self.config.base_url = rest.to_string();
                            self.client = client;
                            render::info("base url updated");
                        }
                        Err(err) => render::error(&err),
                    }
                }
            }
            _ => render::info("unknown command, type /help"),
        }
        false
    }

    fn send(&mut self, line: &str) {
        match self.client.ask(self.config.agent, line) {
            Ok(resp) => render::answer(&resp),
            Err(err) => render::error(&err),
        }
    }
}

fn parse_on_off(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Some(true),
        "off" | "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_on_off_words() {
        assert_eq!(parse_on_off("ON"), Some(true));
        assert_eq!(parse_on_off("no"), Some(false));
        assert_eq!(parse_on_off("maybe"), None);
    }
}
