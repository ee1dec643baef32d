//! Extraction of tool calls from model replies.
//!
//! A responder model requests a tool with a fenced block:
//!
//! ````text
//! ```tool
//! {"tool": "read_it_docs", "input": "vpn password reset", "reasoning": "check policy"}
//! ```
//! ````
//!
//! A reply without a well-formed block is treated as the final answer.

use super::entities::ToolCall;

/// Parse the first tool call block in `response`, if any.
///
/// Blocks whose body is not a JSON object with a string `tool` field are
/// skipped. `args.input` is accepted as an alternative to `input`.
pub fn parse_tool_call(response: &str) -> Option<ToolCall> {
    let mut in_tool_block = false;
    let mut current_block = String::new();

    for line in response.lines() {
        let trimmed = line.trim();
        if !in_tool_block && trimmed == "```tool" {
            in_tool_block = true;
            current_block.clear();
        } else if in_tool_block && trimmed == "```" {
            in_tool_block = false;
            if let Some(call) = tool_call_from_json(&current_block) {
                return Some(call);
            }
        } else if in_tool_block {
            current_block.push_str(line);
            current_block.push('\n');
        }
    }

    None
}

fn tool_call_from_json(block: &str) -> Option<ToolCall> {
    let parsed: serde_json::Value = serde_json::from_str(block).ok()?;
    let tool_name = parsed.get("tool")?.as_str()?;

    let input = parsed
        .get("input")
        .and_then(|v| v.as_str())
        .or_else(|| parsed.get("args")?.get("input")?.as_str())
        .unwrap_or_default();

    let mut call = ToolCall::new(tool_name, input);
    if let Some(reasoning) = parsed.get("reasoning").and_then(|v| v.as_str()) {
        call = call.with_reasoning(reasoning);
    }
    Some(call)
}
