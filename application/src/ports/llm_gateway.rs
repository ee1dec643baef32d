//! LLM Gateway port
//!
//! Defines the interface for communicating with the text-generation service.

use async_trait::async_trait;
use thiserror::Error;
use triage_domain::CompletionRequest;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Timeout")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for LLM communication
///
/// Every stage of a run (classification, responding, evaluation) talks to
/// the model through this port. Implementations live in the infrastructure
/// layer; tests use scripted mocks.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Identifier of the model this gateway talks to (for logs).
    fn model(&self) -> &str;

    /// Send one chat-style request and return the full completion text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError>;
}
