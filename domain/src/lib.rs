//! Domain layer for support-triage
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Routing
//!
//! Every query is classified into exactly one [`Domain`] (IT, Finance,
//! General). Classifier and evaluator outputs are parsed by total functions
//! with explicit fallbacks ([`parse_classification`], [`parse_verdict`]).
//!
//! ## Runs
//!
//! A [`RunState`] is moved through the stage machine
//! (classify → dispatch → respond → evaluate → retry / terminate) and ends
//! in a [`RunOutcome`].
//!
//! ## Tools
//!
//! Tool-augmented responders call named tools ([`ToolSpec`]) through a
//! text protocol parsed by [`parse_tool_call`].

pub mod core;
pub mod prompt;
pub mod retrieval;
pub mod routing;
pub mod run;
pub mod session;
pub mod tool;
pub mod util;

// Re-export commonly used types
pub use crate::core::{error::DomainError, query::Query};
pub use prompt::PromptTemplate;
pub use retrieval::{Passage, SearchHit};
pub use routing::{
    Classification, ClassificationFallback, Domain, Verdict, parse_classification, parse_verdict,
};
pub use run::{RunOutcome, RunStage, RunState};
pub use session::entities::{CompletionRequest, Message, Role};
pub use tool::{
    entities::{ToolCall, ToolDefinition, ToolKind, ToolSpec},
    parsing::parse_tool_call,
    value_objects::ToolError,
};
