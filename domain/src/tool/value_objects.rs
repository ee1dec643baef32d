//! Tool error value object.
//!
//! | Code | Raised when |
//! |------|-------------|
//! | `NOT_FOUND` | The responder has no tool with that name |
//! | `UNAVAILABLE` | The backing retriever / search provider failed |
//! | `TIMEOUT` | The tool call exceeded its timeout |

use serde::{Deserialize, Serialize};

/// Error that occurred during a tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    /// Name of the tool that failed
    pub tool: String,
    /// Error code (e.g., "NOT_FOUND", "TIMEOUT")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ToolError {
    pub fn new(
        tool: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            tool: tool.into(),
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(tool: impl Into<String>) -> Self {
        let tool = tool.into();
        let message = format!("Unknown tool: {}", tool);
        Self::new(tool, "NOT_FOUND", message)
    }

    pub fn unavailable(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(tool, "UNAVAILABLE", message)
    }

    pub fn timeout(tool: impl Into<String>) -> Self {
        let tool = tool.into();
        let message = format!("Operation timed out: {}", tool);
        Self::new(tool, "TIMEOUT", message)
    }

    pub fn is_timeout(&self) -> bool {
        self.code == "TIMEOUT"
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.tool, self.message)
    }
}

impl std::error::Error for ToolError {}
