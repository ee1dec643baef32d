//! Domain responders.
//!
//! A [`Responder`] turns a query into a draft answer for one [`Domain`].
//! General answers from the model alone; IT and Finance run a tool loop
//! that consults internal documentation before the web.

mod general;
mod registry;
mod tool_augmented;

pub use general::GeneralResponder;
pub use registry::ResponderRegistry;
pub use tool_augmented::ToolAugmentedResponder;

use crate::ports::llm_gateway::GatewayError;
use crate::ports::progress::RunProgressNotifier;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use triage_domain::{Domain, ToolError};

/// A draft answer produced by a responder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    /// Names of the tools invoked while producing this answer, in order.
    pub tools_used: Vec<String>,
}

impl Answer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tools_used: Vec::new(),
        }
    }

    pub fn with_tools_used(mut self, tools: Vec<String>) -> Self {
        self.tools_used = tools;
        self
    }
}

/// What went wrong inside a responder.
#[derive(Error, Debug)]
pub enum ResponderErrorKind {
    #[error("model call failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("tool failed: {0}")]
    Tool(ToolError),

    #[error("exceeded {0} tool calls without a final answer")]
    ToolLoopExhausted(usize),

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// A responder failure, tagged with the responder's domain.
#[derive(Error, Debug)]
#[error("{domain} failed: {kind}")]
pub struct ResponderError {
    pub domain: Domain,
    pub kind: ResponderErrorKind,
}

impl ResponderError {
    pub fn new(domain: Domain, kind: impl Into<ResponderErrorKind>) -> Self {
        Self {
            domain,
            kind: kind.into(),
        }
    }
}

/// Produces draft answers for one domain.
#[async_trait]
pub trait Responder: Send + Sync {
    fn domain(&self) -> Domain;

    async fn respond(
        &self,
        query: &str,
        progress: &dyn RunProgressNotifier,
    ) -> Result<Answer, ResponderError>;
}
