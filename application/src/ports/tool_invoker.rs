//! Tool invoker port
//!
//! Defines the interface a tool-augmented responder uses to call its tools.

use async_trait::async_trait;
use triage_domain::{ToolDefinition, ToolError, ToolSpec};

/// Executes the tools available to one domain responder.
///
/// Output is the plain-text observation handed back to the model.
#[async_trait]
pub trait ToolInvokerPort: Send + Sync {
    /// The tools this invoker serves.
    fn tool_spec(&self) -> &ToolSpec;

    /// Check if a tool is available
    fn has_tool(&self, name: &str) -> bool {
        self.tool_spec().get(name).is_some()
    }

    /// Get tool definition by name
    fn get_tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.tool_spec().get(name)
    }

    /// Get all available tool names
    fn available_tools(&self) -> Vec<&str> {
        self.tool_spec().names().collect()
    }

    /// Invoke a tool with the given input string
    async fn invoke(&self, name: &str, input: &str) -> Result<String, ToolError>;
}
