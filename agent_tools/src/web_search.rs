//! The `web_search(query)` tool: a thin client for an external search
//! collaborator.
//!
//! The collaborator is a microservice configured via `SEARCH_ENDPOINT`
//! (bearer-authenticated with `SEARCH_API_KEY` when set). It accepts
//! `{q, recency_days, top_k}` and returns a JSON list of hits. Result
//! quality and ranking are entirely its concern.

use std::time::{Duration, Instant};

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::json;

use shared_utils::env::get_env_var;

use crate::ToolError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const BACKEND: &str = "custom";

/// One search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Page title.
    pub title: String,
    /// Page URL.
    pub url: String,
    /// Short excerpt of the matching content.
    pub snippet: String,
    /// Which backend produced the hit.
    #[serde(default)]
    pub source: Option<String>,
    /// Publication date as reported by the backend, when known.
    #[serde(default)]
    pub published: Option<String>,
}

/// Everything a consumer needs to render and attribute a search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    /// The query as sent.
    pub query: String,
    /// Hits, best first, at most `top_k`.
    pub results: Vec<SearchHit>,
    /// Which backend served the search.
    pub backend: String,
    /// Wall-clock time the search took.
    pub took_ms: u64,
}

/// Client for the external search endpoint.
pub struct SearchClient {
    client: Client,
    endpoint: String,
    api_key: Option<SecretString>,
}

impl SearchClient {
    /// Build a client for the given endpoint with an optional bearer key.
    pub fn new(endpoint: impl Into<String>, api_key: Option<SecretString>) -> Result<Self, ToolError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key,
        })
    }

    /// Build a client from `SEARCH_ENDPOINT` / `SEARCH_API_KEY`.
    pub fn from_env() -> Result<Self, ToolError> {
        let endpoint = get_env_var("SEARCH_ENDPOINT")
            .map_err(|e| ToolError::Validation(e.to_string()))?;
        let api_key = get_env_var("SEARCH_API_KEY")
            .ok()
            .map(|k| SecretString::new(k.into()));
        Self::new(endpoint, api_key)
    }

    /// Run one search, returning at most `top_k` hits.
    pub async fn search(
        &self,
        query: &str,
        recency_days: u32,
        top_k: usize,
    ) -> Result<SearchResults, ToolError> {
        if query.trim().is_empty() {
            return Err(ToolError::Validation("query is empty".into()));
        }

        let started = Instant::now();
        let mut req = self.client.post(&self.endpoint).json(&json!({
            "q": query,
            "recency_days": recency_days,
            "top_k": top_k,
        }));
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key.expose_secret());
        }

        let response = req.send().await?.error_for_status()?;
        let mut results: Vec<SearchHit> = response.json().await?;
        results.truncate(top_k);

        Ok(SearchResults {
            query: query.to_string(),
            results,
            backend: BACKEND.to_string(),
            took_ms: started.elapsed().as_millis() as u64,
        })
    }
}
