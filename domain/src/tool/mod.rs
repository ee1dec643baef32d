//! Tool domain: the uniform calling contract between responders and
//! their capabilities.
//!
//! # Pipeline
//!
//! ```text
//! model reply ──parse_tool_call()──▶ ToolCall ──ToolInvoker──▶ Ok(String) | Err(ToolError)
//! ```
//!
//! - [`entities`]: [`ToolKind`](entities::ToolKind), [`ToolDefinition`](entities::ToolDefinition),
//!   [`ToolSpec`](entities::ToolSpec), [`ToolCall`](entities::ToolCall)
//! - [`value_objects`]: [`ToolError`](value_objects::ToolError)
//! - [`parsing`]: extraction of ```` ```tool ```` blocks from model text

pub mod entities;
pub mod parsing;
pub mod value_objects;
