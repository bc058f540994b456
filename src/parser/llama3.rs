//! Llama 3.1 JSON tool calls.

use super::decode::{decode_tool_calls, CallShape};
use super::{ParsedOutput, ToolCallIdGenerator};
use tracing::{error, warn};

const PYTHON_TAG: &str = "<|python_tag|>";

const SHAPE: CallShape = CallShape {
    name_keys: &["name"],
    args_keys: &["parameters"],
};

/// Parse Llama 3.1 output.
///
/// Output starting with `<|python_tag|>`, or any output when tool use was
/// forced, must decode as `{"name": ..., "parameters": {...}}` calls; on
/// failure the error is logged and the text returned.
///
/// Some model variants omit the tag. Without it, output that still decodes
/// as a list of such calls is taken as a tool call (with a warning). This is
/// ambiguous by nature: a plain answer that happens to be a JSON object with
/// `name` and `parameters` keys is read as a tool call.
pub fn parse_llama31_tool_call(
    text: &str,
    force_tool_call: bool,
    ids: &dyn ToolCallIdGenerator,
) -> ParsedOutput {
    let (body, tagged) = match text.trim_start().strip_prefix(PYTHON_TAG) {
        Some(rest) => (rest, true),
        None => (text, false),
    };

    if tagged || force_tool_call {
        return match decode_tool_calls(body, &SHAPE, ids) {
            Ok(calls) => ParsedOutput::ToolCalls(calls),
            Err(e) => {
                error!(
                    target: "pfk::parser",
                    "Failed to parse tool calls, falling back on returning text: {}", e
                );
                ParsedOutput::Text(text.to_string())
            }
        };
    }

    match decode_tool_calls(text, &SHAPE, ids) {
        Ok(calls) => {
            warn!(
                target: "pfk::parser",
                "Model did not generate tool call token, but response is a valid json tool call, parsing it anyway"
            );
            ParsedOutput::ToolCalls(calls)
        }
        Err(_) => ParsedOutput::Text(text.to_string()),
    }
}
