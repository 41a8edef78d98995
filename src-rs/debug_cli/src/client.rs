use std::time::Duration;

use reqwest::blocking::Client;

use crate::models::{AgentKind, AskRequest, AskResponse, SessionInfo};

pub struct HTTPClient {
    pub base_url: String,
    client: Client,
}

impl HTTPClient {
    pub fn new(base_url: &str) -> Result<Self, String> {
        // Agent runs include model and search round trips; allow them time.
        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|err| err.to_string())?;
        Ok(Self {
            base_url: base_url.to_string(),
            client,
        })
    }

    pub fn ask(&self, agent: AgentKind, question: &str) -> Result<AskResponse, String> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), agent.path());
        let resp = self
            .client
            .post(url)
            .json(&AskRequest {
                question: question.to_string(),
            })
            .send()
            .map_err(|err| err.to_string())?;

        if resp.status().is_success() {
            resp.json::<AskResponse>().map_err(|err| err.to_string())
        } else {
            let status = resp.status();
            let body = resp.text().unwrap_or_default();
            Err(format!("http {}: {}", status.as_u16(), body))
        }
    }

    pub fn session(&self, limit: Option<usize>) -> Result<SessionInfo, String> {
        let mut url = format!("{}/session", self.base_url.trim_end_matches('/'));
        if let Some(limit) = limit {
            url = format!("{}?limit={}", url, limit);
        }
        let resp = self.client.get(url).send().map_err(|err| err.to_string())?;
        if resp.status().is_success() {
            resp.json::<SessionInfo>().map_err(|err| err.to_string())
        } else {
            let status = resp.status();
            let body = resp.text().unwrap_or_default();
            Err(format!("http {}: {}", status.as_u16(), body))
        }
    }

    pub fn clear_session(&self) -> Result<(), String> {
        let url = format!("{}/session", self.base_url.trim_end_matches('/'));
        let resp = self.client.delete(url).send().map_err(|err| err.to_string())?;
        if resp.status().is_success() {
            Ok(())
        } else {
            let status = resp.status();
            let body = resp.text().unwrap_or_default();
            Err(format!("http {}: {}", status.as_u16(), body))
        }
    }
}
