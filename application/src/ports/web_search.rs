//! Web search port

use async_trait::async_trait;
use thiserror::Error;
use triage_domain::SearchHit;

/// Errors that can occur while querying the web search service
#[derive(Error, Debug)]
pub enum WebSearchError {
    #[error("Search request failed: {0}")]
    RequestFailed(String),

    #[error("Unexpected search response: {0}")]
    InvalidResponse(String),
}

/// Bounded web search.
#[async_trait]
pub trait WebSearchPort: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, WebSearchError>;
}
