//! Application layer for support-triage
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{RunParams, StageTimeouts};
pub use ports::{
    llm_gateway::{GatewayError, LlmGateway},
    progress::{NoRunProgress, RunProgressNotifier},
    retriever::{RetrievalError, Retriever},
    tool_invoker::ToolInvokerPort,
    web_search::{WebSearchError, WebSearchPort},
};
pub use use_cases::classify::{ClassificationError, ClassifyUseCase};
pub use use_cases::evaluate::{EvaluateUseCase, EvaluationError};
pub use use_cases::respond::{
    Answer, GeneralResponder, Responder, ResponderError, ResponderErrorKind, ResponderRegistry,
    ToolAugmentedResponder,
};
pub use use_cases::run_query::{RunQueryError, RunQueryInput, RunQueryUseCase};
