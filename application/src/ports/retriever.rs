//! Document retrieval port
//!
//! Semantic lookup over a per-domain document store.

use async_trait::async_trait;
use thiserror::Error;
use triage_domain::Passage;

/// Errors that can occur while querying a document store
#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Index unavailable: {0}")]
    Unavailable(String),

    #[error("Retrieval failed: {0}")]
    Failed(String),
}

/// Top-k passage lookup for one domain's document store.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Return the passages most relevant to `query`, best first.
    ///
    /// An empty vector means nothing relevant was found; that is not an error.
    async fn retrieve(&self, query: &str) -> Result<Vec<Passage>, RetrievalError>;
}
