//! Port definitions (interfaces for external adapters)

pub mod llm_gateway;
pub mod progress;
pub mod retriever;
pub mod tool_invoker;
pub mod web_search;
