//! Tool domain entities

use crate::routing::Domain;
use serde::{Deserialize, Serialize};

/// The two capability kinds a responder can call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// Internal documentation lookup. Primary; always tried first.
    DocumentRetrieval,
    /// External web search. Supplementary.
    WebSearch,
}

impl ToolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::DocumentRetrieval => "document_retrieval",
            ToolKind::WebSearch => "web_search",
        }
    }

    pub fn is_primary(&self) -> bool {
        matches!(self, ToolKind::DocumentRetrieval)
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Definition of a named tool offered to a responder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name (e.g., "read_it_docs")
    pub name: String,
    /// Description shown to the model
    pub description: String,
    pub kind: ToolKind,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>, kind: ToolKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
        }
    }

    /// Document retrieval tool for a domain (`read_<domain>_docs`).
    pub fn document_retrieval(domain: Domain) -> Self {
        Self::new(
            format!("read_{}_docs", domain.key()),
            format!(
                "PRIMARY TOOL: Always use this first. Retrieves internal {} documentation: \
                 company-specific policies, procedures and guidelines. This is the primary \
                 source of truth.",
                domain.label()
            ),
            ToolKind::DocumentRetrieval,
        )
    }

    /// Web search tool for a domain (`search_<domain>_web`).
    pub fn web_search(domain: Domain) -> Self {
        Self::new(
            format!("search_{}_web", domain.key()),
            format!(
                "SUPPLEMENTARY TOOL: Use only when internal {} documentation is insufficient, \
                 the user asks for external or recent information, or details need \
                 clarification beyond internal policy.",
                domain.label()
            ),
            ToolKind::WebSearch,
        )
    }
}

/// Ordered set of tools available to one responder.
///
/// Registration order is preserved so prompts list the primary tool first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolSpec {
    tools: Vec<ToolDefinition>,
}

impl ToolSpec {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool (builder pattern). A tool with the same name
    /// replaces the earlier registration in place.
    pub fn register(mut self, tool: ToolDefinition) -> Self {
        match self.tools.iter_mut().find(|t| t.name == tool.name) {
            Some(existing) => *existing = tool,
            None => self.tools.push(tool),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn all(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|t| t.name.as_str())
    }

    /// First registered tool of the given kind.
    pub fn first_of(&self, kind: ToolKind) -> Option<&ToolDefinition> {
        self.tools.iter().find(|t| t.kind == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }
}

/// A call to a tool requested by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    pub tool_name: String,
    /// Free-text input (search query). Empty means "use the user query".
    #[serde(default)]
    pub input: String,
    /// Optional reasoning for why this tool is being called
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            input: input.into(),
            reasoning: None,
        }
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = Some(reasoning.into());
        self
    }

    /// Input to send to the tool, defaulting to `fallback` when blank.
    pub fn input_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.input.trim().is_empty() {
            fallback
        } else {
            &self.input
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_tool_names() {
        assert_eq!(ToolDefinition::document_retrieval(Domain::It).name, "read_it_docs");
        assert_eq!(
            ToolDefinition::web_search(Domain::Finance).name,
            "search_finance_web"
        );
    }

    #[test]
    fn test_spec_keeps_registration_order() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::document_retrieval(Domain::It))
            .register(ToolDefinition::web_search(Domain::It));

        let names: Vec<_> = spec.names().collect();
        assert_eq!(names, vec!["read_it_docs", "search_it_web"]);
        assert_eq!(
            spec.first_of(ToolKind::DocumentRetrieval).map(|t| t.name.as_str()),
            Some("read_it_docs")
        );
        assert!(spec.get("search_finance_web").is_none());
    }

    #[test]
    fn test_register_replaces_same_name() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("t", "one", ToolKind::WebSearch))
            .register(ToolDefinition::new("t", "two", ToolKind::WebSearch));
        assert_eq!(spec.len(), 1);
        assert_eq!(spec.get("t").unwrap().description, "two");
    }

    #[test]
    fn test_input_fallback() {
        let call = ToolCall::new("read_it_docs", "  ");
        assert_eq!(call.input_or("vpn reset"), "vpn reset");

        let call = ToolCall::new("read_it_docs", "vpn");
        assert_eq!(call.input_or("ignored"), "vpn");
    }
}
