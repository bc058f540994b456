//! Granite 3 tool calls.

use super::decode::{decode_tool_calls, CallShape};
use super::{ParsedOutput, ToolCallIdGenerator};
use tracing::error;

const SHAPE: CallShape = CallShape {
    name_keys: &["name", "function"],
    args_keys: &["parameters"],
};

/// Parse Granite 3 output.
///
/// Granite does not mark its tool calls reliably, so output is only decoded
/// when tool use was forced. A stray leading `assistant` word and a
/// `<|tool_call|>` marker are skipped before decoding.
pub fn parse_granite3_tool_call(
    text: &str,
    force_tool_call: bool,
    ids: &dyn ToolCallIdGenerator,
) -> ParsedOutput {
    if !force_tool_call {
        return ParsedOutput::Text(text.to_string());
    }

    let mut body = text.trim_start();
    if let Some(rest) = body.strip_prefix("assistant") {
        body = rest.trim_start();
    }
    if let Some(rest) = body.strip_prefix("<|tool_call|>") {
        body = rest;
    }

    match decode_tool_calls(body, &SHAPE, ids) {
        Ok(calls) => ParsedOutput::ToolCalls(calls),
        Err(e) => {
            error!(
                target: "pfk::parser",
                "Failed to parse tool calls, falling back on returning text: {}", e
            );
            ParsedOutput::Text(text.to_string())
        }
    }
}
