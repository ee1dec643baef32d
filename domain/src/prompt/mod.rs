//! Prompt templates for each stage of the triage graph.

pub mod template;

pub use template::PromptTemplate;
