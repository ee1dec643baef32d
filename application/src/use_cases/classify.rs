//! Classify use case.
//!
//! Maps a query to exactly one [`Domain`] with a single deterministic model
//! call. Output outside the label vocabulary falls back to General.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use triage_domain::util::preview;
use triage_domain::{Classification, CompletionRequest, PromptTemplate, Query, parse_classification};

/// Errors that can occur during classification
#[derive(Error, Debug)]
pub enum ClassificationError {
    #[error("Classifier call failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Classifier timed out after {0:?}")]
    Timeout(Duration),
}

/// Use case for classifying a query into a domain.
#[derive(Clone)]
pub struct ClassifyUseCase {
    gateway: Arc<dyn LlmGateway>,
}

impl ClassifyUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self { gateway }
    }

    pub async fn execute(&self, query: &Query) -> Result<Classification, ClassificationError> {
        let request = CompletionRequest::user(PromptTemplate::classification(query.content()))
            .with_temperature(0.0);

        let raw = self.gateway.complete(&request).await?;
        let classification = parse_classification(&raw);

        match &classification.fallback {
            Some(reason) => warn!(
                "Classifier fell back to {}: {}",
                classification.domain, reason
            ),
            None => debug!(
                "Classified as {} (raw: {})",
                classification.domain,
                preview(&raw, 40)
            ),
        }

        Ok(classification)
    }
}
