//! Web search via the DuckDuckGo Instant Answer API.
//!
//! Part of the **Web Tools** feature (`web-tools`). The API needs no key and
//! returns abstracts, instant answers and related topics rather than a full
//! result listing; each of those becomes one [`SearchHit`].

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use triage_application::{WebSearchError, WebSearchPort};
use triage_domain::SearchHit;

/// DuckDuckGo Instant Answer API endpoint (no API key required).
const DDG_API_URL: &str = "https://api.duckduckgo.com/";

/// [`WebSearchPort`] backed by DuckDuckGo.
pub struct DuckDuckGoSearch {
    client: Client,
    max_results: usize,
}

impl DuckDuckGoSearch {
    pub fn new(max_results: usize) -> Result<Self, WebSearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("support-triage/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WebSearchError::RequestFailed(format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            max_results,
        })
    }
}

#[async_trait]
impl WebSearchPort for DuckDuckGoSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, WebSearchError> {
        let response = self
            .client
            .get(DDG_API_URL)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await
            .map_err(|e| WebSearchError::RequestFailed(format!("Search request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(WebSearchError::RequestFailed(format!(
                "Search API returned error: {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            WebSearchError::InvalidResponse(format!("Failed to parse search results: {}", e))
        })?;

        Ok(extract_hits(&body, self.max_results))
    }
}

/// Pull hits out of an Instant Answer response: abstract, answer, then
/// related topics (flattening topic groups), capped at `limit`.
fn extract_hits(data: &serde_json::Value, limit: usize) -> Vec<SearchHit> {
    let mut hits = Vec::new();

    if let Some(abstract_text) = non_empty(&data["AbstractText"]) {
        let title = non_empty(&data["Heading"])
            .or_else(|| non_empty(&data["AbstractSource"]))
            .unwrap_or("Summary");
        let url = data["AbstractURL"].as_str().unwrap_or("");
        hits.push(SearchHit::new(title, abstract_text, url));
    }

    if let Some(answer) = non_empty(&data["Answer"]) {
        hits.push(SearchHit::new("Instant Answer", answer, ""));
    }

    if let Some(topics) = data["RelatedTopics"].as_array() {
        for topic in topics {
            match topic["Topics"].as_array() {
                Some(group) => hits.extend(group.iter().filter_map(topic_hit)),
                None => hits.extend(topic_hit(topic)),
            }
        }
    }

    hits.truncate(limit);
    hits
}

fn topic_hit(topic: &serde_json::Value) -> Option<SearchHit> {
    let text = non_empty(&topic["Text"])?;
    let url = topic["FirstURL"].as_str().unwrap_or("");
    let title = text.split(" - ").next().unwrap_or(text);
    Some(SearchHit::new(title, text, url))
}

fn non_empty(value: &serde_json::Value) -> Option<&str> {
    value.as_str().filter(|s| !s.trim().is_empty())
}
