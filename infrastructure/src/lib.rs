//! Infrastructure layer for support-triage
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod providers;
pub mod retrieval;
pub mod tools;

// Re-export commonly used types
pub use config::{ConfigError, ConfigIssue, ConfigLoader, FileConfig, FileOutputFormat, Severity};
pub use providers::{build_gateway, openai::OpenAiGateway};
pub use retrieval::{IndexRetriever, PassageIndex};
pub use tools::{DomainToolInvoker, build_domain_invoker, build_web_search};
