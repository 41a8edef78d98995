//! Tavily web search exposed as the `tavily_search` function tool.
//!
//! Provider failures never surface as errors: a non-OK status is turned into
//! text and handed back to the model like any other search output.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::types::{ToolError, ToolSchema};

pub const SEARCH_TOOL_NAME: &str = "tavily_search";
pub const DEFAULT_SEARCH_BASE_URL: &str = "https://api.tavily.com";
pub const DEFAULT_MAX_RESULTS: u32 = 2;
pub const NO_RESULTS: &str = "No relevant results found.";

const SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug)]
pub struct SearchConfig {
    pub api_key: String,
    pub base_url: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SearchParams {
    pub query: String,
    #[serde(default)]
    pub max_results: Option<u32>,
}

impl SearchParams {
    /// Accepts the arguments flat or wrapped in a `params` object.
    pub fn from_args(args: Value) -> Result<Self, ToolError> {
        let args = match args.get("params") {
            Some(inner) if inner.is_object() => inner.clone(),
            _ => args,
        };
        serde_json::from_value(args).map_err(|err| ToolError::InvalidArguments(err.to_string()))
    }
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: u32,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Clone, Debug)]
pub struct SearchTool {
    cfg: SearchConfig,
    client: Client,
}

impl SearchTool {
    /// Builds the blocking HTTP client, so call it off the async runtime.
    pub fn new(mut cfg: SearchConfig) -> Result<Self, ToolError> {
        if cfg.base_url.is_empty() {
            cfg.base_url = DEFAULT_SEARCH_BASE_URL.to_string();
        }
        let client = Client::builder()
            .timeout(SEARCH_TIMEOUT)
            .build()
            .map_err(|err| ToolError::Client(err.to_string()))?;
        Ok(Self { cfg, client })
    }

    pub fn schema(&self) -> ToolSchema {
        ToolSchema::Function {
            name: SEARCH_TOOL_NAME.to_string(),
            description: "Search the web for recent or real-time information. Returns a numbered list of result titles and snippets.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search query"
                    },
                    "max_results": {
                        "type": "integer",
                        "description": "Maximum number of results to return (default: 2)"
                    }
                },
                "required": ["query"]
            }),
        }
    }

    pub fn invoke(&self, args: Value) -> Result<String, ToolError> {
        let params = SearchParams::from_args(args)?;
        Ok(self.search(&params))
    }

    /// One blocking call to the provider. Always returns text.
    pub fn search(&self, params: &SearchParams) -> String {
        let max_results = params.max_results.unwrap_or(DEFAULT_MAX_RESULTS);
        let request = SearchRequest {
            api_key: &self.cfg.api_key,
            query: &params.query,
            max_results,
        };
        let endpoint = format!("{}/search", self.cfg.base_url.trim_end_matches('/'));
        debug!(query = %params.query, max_results, "sending search request");

        let resp = match self
            .client
            .post(endpoint)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
        {
            Ok(resp) => resp,
            Err(err) => {
                warn!(error = %err, "search request failed");
                return format!("Tavily request failed: {}", err);
            }
        };

        let status = resp.status().as_u16();
        let body = match resp.text() {
            Ok(body) => body,
            Err(err) => {
                warn!(error = %err, "reading search response failed");
                return format!("Tavily request failed: {}", err);
            }
        };
        summarize_response(status, &body)
    }
}

pub fn summarize_response(status: u16, body: &str) -> String {
    if status != 200 {
        warn!(status, "search provider returned an error status");
        return format!("Tavily API error: {}", status);
    }
    match serde_json::from_str::<SearchResponse>(body) {
        Ok(parsed) => summarize(&parsed.results),
        Err(err) => format!("Tavily request failed: invalid response body ({})", err),
    }
}

pub fn summarize(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return NO_RESULTS.to_string();
    }
    hits.iter()
        .enumerate()
        .map(|(idx, hit)| format!("{}. {}: {}", idx + 1, hit.title, hit.content))
        .collect::<Vec<_>>()
        .join("\n")
}
