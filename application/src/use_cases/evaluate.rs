//! Evaluate use case.
//!
//! Asks the model whether a draft fully answers the query. Only a bare
//! `YES` accepts; anything else is a rejection.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use triage_domain::util::preview;
use triage_domain::{CompletionRequest, PromptTemplate, Query, Verdict, parse_verdict};

/// Errors that can occur during evaluation
#[derive(Error, Debug)]
pub enum EvaluationError {
    #[error("Evaluator call failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Evaluator timed out after {0:?}")]
    Timeout(Duration),
}

/// Use case for judging a draft answer.
#[derive(Clone)]
pub struct EvaluateUseCase {
    gateway: Arc<dyn LlmGateway>,
}

impl EvaluateUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self { gateway }
    }

    pub async fn execute(&self, query: &Query, draft: &str) -> Result<Verdict, EvaluationError> {
        let request =
            CompletionRequest::user(PromptTemplate::evaluation(query.content(), draft))
                .with_temperature(0.0);

        let raw = self.gateway.complete(&request).await?;
        let verdict = parse_verdict(&raw);
        debug!("Evaluator verdict {} (raw: {})", verdict, preview(&raw, 40));
        Ok(verdict)
    }
}
