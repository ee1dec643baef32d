//! Prompt templates for the triage flow

use crate::routing::Domain;
use crate::tool::entities::{ToolKind, ToolSpec};
use crate::tool::value_objects::ToolError;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Classification prompt (single user message).
    pub fn classification(query: &str) -> String {
        format!(
            r#"You are a query classification assistant for an internal support system. Categorize the user's query into one of the following categories:
- IT
- Finance
- General

Classification Rules:
- If the query is about VPN, devices, software, access, email, hardware, etc., classify as "IT"
- If the query is about payroll, reimbursement, budgets, taxes, invoices, etc., classify as "Finance"
- If the query is about greetings, small talk, or general help that is not domain-specific, classify as "General"
- If unsure, default to "General"

Respond with only one word: IT, Finance, or General.

Query: {}"#,
            query
        )
    }

    /// Evaluation prompt (single user message).
    pub fn evaluation(query: &str, response: &str) -> String {
        format!(
            r#"You are a quality evaluator in an AI support system.
Determine whether the following response fully and accurately answers the user's query.

Query: {}

Response: {}

Does this response answer the query completely and correctly?
Respond with only: YES or NO"#,
            query, response
        )
    }

    /// System prompt for the General responder.
    pub fn general_system() -> &'static str {
        "You are a friendly assistant who answers greetings, small talk, and general help requests."
    }

    /// System prompt for tool-augmented responders.
    ///
    /// Encodes the retrieval-first rule and the ```` ```tool ```` protocol.
    pub fn tool_augmented_system(domain: Domain, tools: &ToolSpec) -> String {
        let mut prompt = format!(
            r#"You are a helpful {} support assistant with access to internal company documentation and web search capabilities.

TOOL USAGE PRIORITY (hard rules):
1. ALWAYS check internal documentation first using the document tool.
2. If internal docs provide a complete answer, use that information and stop.
3. Only use web search if the internal docs are insufficient or unclear, the user explicitly asks for additional context, or recent/external information is needed.

RESPONSE STRATEGY:
- Start with internal documentation findings.
- Clearly indicate when information comes from internal vs external sources.
- Always prioritize company-specific policies and procedures over generic advice.

Available tools:
"#,
            domain.label()
        );

        for tool in tools.all() {
            let tag = match tool.kind {
                ToolKind::DocumentRetrieval => "primary",
                ToolKind::WebSearch => "secondary",
            };
            prompt.push_str(&format!("- {} ({}): {}\n", tool.name, tag, tool.description));
        }

        prompt.push_str(
            r#"
To call a tool, reply with ONLY a fenced block in this exact format:
```tool
{"tool": "<tool name>", "input": "<search text>", "reasoning": "<why>"}
```
You will receive the tool output in the next message. Call one tool at a time.
When you have enough information, reply with the final answer as plain text and no tool block."#,
        );

        prompt
    }

    /// Message carrying a successful tool result back to the model.
    pub fn tool_result(tool_name: &str, output: &str) -> String {
        format!("Tool `{}` returned:\n{}", tool_name, output)
    }

    /// Message telling the model a tool failed and it must continue without it.
    pub fn tool_failure(error: &ToolError) -> String {
        format!(
            "Tool `{}` failed ({}). Continue without it and answer from what you have.",
            error.tool, error.message
        )
    }

    /// Message telling the model that internal docs were consulted in place
    /// of a premature web search.
    pub fn retrieval_first_notice(requested: &str, served_by: &str) -> String {
        format!(
            "`{}` is only available after internal documentation has been checked. `{}` was run instead.",
            requested, served_by
        )
    }

    /// Sentinel returned by document retrieval when nothing matched.
    pub fn no_documents(domain: Domain) -> String {
        format!(
            "No relevant internal {} documentation found for this query.",
            domain.label()
        )
    }
}
