//! Mistral `[TOOL_CALLS]` output.

use super::decode::{decode_tool_calls, CallShape};
use super::{ParsedOutput, ToolCallIdGenerator};
use tracing::error;

const TOOL_CALLS: &str = "[TOOL_CALLS]";

const SHAPE: CallShape = CallShape {
    name_keys: &["name"],
    args_keys: &["arguments"],
};

/// Parse Mistral output.
///
/// Only output that starts with `[TOOL_CALLS]` is treated as a tool call; the
/// rest must decode as `{"name": ..., "arguments": {...}}` calls. The forced
/// flag is accepted for signature compatibility and has no effect.
pub fn parse_mistral_tool_call(
    text: &str,
    _force_tool_call: bool,
    ids: &dyn ToolCallIdGenerator,
) -> ParsedOutput {
    let Some(body) = text.trim().strip_prefix(TOOL_CALLS) else {
        return ParsedOutput::Text(text.to_string());
    };

    match decode_tool_calls(body, &SHAPE, ids) {
        Ok(calls) => ParsedOutput::ToolCalls(calls),
        Err(e) => {
            error!(
                target: "pfk::parser",
                "Failed to parse Mistral tool calls, falling back on returning text: {}", e
            );
            ParsedOutput::Text(text.to_string())
        }
    }
}
