//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types at the
//! composition root.

mod llm;
mod orchestrator;
mod routing;
mod server;

pub use llm::{FileLlmConfig, ProviderKind};
pub use orchestrator::{FileOrchestratorConfig, FileTimeoutsConfig};
pub use routing::{FileDomainRoute, FileRetrievalConfig, FileRoutingConfig, FileWebSearchConfig};
pub use server::{
    FileLoggingConfig, FileOutputConfig, FileOutputFormat, FileServerConfig,
};

use serde::{Deserialize, Serialize};
use triage_application::RunParams;

/// How serious a configuration issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Works, but probably not what was intended
    Warning,
    /// The process must not start with this value
    Error,
}

/// A problem detected in a loaded configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted path of the offending key (e.g. `timeouts.classify_secs`)
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    fn error(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: field.to_string(),
            message: message.into(),
        }
    }

    fn warning(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model provider settings
    pub llm: FileLlmConfig,
    /// Retry and tool loop bounds
    pub orchestrator: FileOrchestratorConfig,
    /// Per-stage timeouts
    pub timeouts: FileTimeoutsConfig,
    /// Passage lookup settings
    pub retrieval: FileRetrievalConfig,
    /// Per-domain document indexes and web search toggles
    pub routing: FileRoutingConfig,
    /// Web search settings
    pub web_search: FileWebSearchConfig,
    /// HTTP adapter settings
    pub server: FileServerConfig,
    /// Log file settings
    pub logging: FileLoggingConfig,
    /// Single-query output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Convert the run-control sections to [`RunParams`].
    pub fn to_run_params(&self) -> RunParams {
        RunParams::default()
            .with_max_retries(self.orchestrator.max_retries)
            .with_max_tool_turns(self.orchestrator.max_tool_turns)
            .with_timeouts(self.timeouts.to_stage_timeouts())
    }

    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.llm.provider_kind().is_none() {
            issues.push(ConfigIssue::error(
                "llm.provider",
                format!(
                    "unknown provider '{}' (expected one of: {})",
                    self.llm.provider,
                    ProviderKind::NAMES.join(", ")
                ),
            ));
        }
        if self.llm.model.trim().is_empty() {
            issues.push(ConfigIssue::error("llm.model", "model name cannot be empty"));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            issues.push(ConfigIssue::error(
                "llm.temperature",
                format!("{} is outside 0.0..=2.0", self.llm.temperature),
            ));
        }
        if self.llm.max_tokens == 0 {
            issues.push(ConfigIssue::error("llm.max_tokens", "cannot be 0"));
        }

        for (field, secs) in self.timeouts.entries() {
            if secs == 0 {
                issues.push(ConfigIssue::error(field, "timeout cannot be 0"));
            }
        }

        if self.orchestrator.max_retries == 0 {
            issues.push(ConfigIssue::warning(
                "orchestrator.max_retries",
                "0 behaves like 1 (a single attempt, no retries)",
            ));
        }
        if self.orchestrator.max_tool_turns == 0 {
            issues.push(ConfigIssue::warning(
                "orchestrator.max_tool_turns",
                "0 disables tool calls; IT and Finance answers cannot use documentation",
            ));
        }
        if self.retrieval.top_k == 0 {
            issues.push(ConfigIssue::error("retrieval.top_k", "cannot be 0"));
        }
        if self.web_search.enabled && self.web_search.max_results == 0 {
            issues.push(ConfigIssue::error(
                "web_search.max_results",
                "cannot be 0 while web search is enabled",
            ));
        }

        issues
    }
}
