//! Query value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A user query entering the triage graph (Value Object)
///
/// Construction rejects empty and whitespace-only input, so every
/// downstream stage can assume there is something to classify.
/// The original text is kept verbatim (no trimming).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Query {
    content: String,
}

impl Query {
    /// Validate and wrap the raw query text.
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::InvalidQuery(
                "query must not be empty".to_string(),
            ));
        }
        Ok(Self { content })
    }

    /// Get the query content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.content)
    }
}

impl TryFrom<String> for Query {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Query::try_new(value)
    }
}

impl TryFrom<&str> for Query {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Query::try_new(value)
    }
}

impl From<Query> for String {
    fn from(query: Query) -> Self {
        query.content
    }
}
