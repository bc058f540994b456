//! JSON decoding of tool-call lists shared by the model parsers.

use super::ids::ToolCallIdGenerator;
use crate::message::ToolCallRequest;
use serde_json::Value;
use thiserror::Error;

/// Field names a model uses for a call's name and arguments.
///
/// The first key present in a call object wins.
pub(crate) struct CallShape {
    pub name_keys: &'static [&'static str],
    pub args_keys: &'static [&'static str],
}

/// Why model output could not be read as tool calls.
#[derive(Debug, Error)]
pub(crate) enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("output decodes to an empty list")]
    Empty,

    #[error("tool call {index} is not a JSON object")]
    NotAnObject { index: usize },

    #[error("tool call {index} has no string field among {keys:?}")]
    MissingName { index: usize, keys: &'static [&'static str] },

    #[error("tool call {index} has no object field among {keys:?}")]
    MissingArguments { index: usize, keys: &'static [&'static str] },
}

/// Decode `text` as one call object or a list of them.
///
/// Each call gets a fresh identifier from `ids`.
pub(crate) fn decode_tool_calls(
    text: &str,
    shape: &CallShape,
    ids: &dyn ToolCallIdGenerator,
) -> Result<Vec<ToolCallRequest>, DecodeError> {
    let calls = match serde_json::from_str::<Value>(text)? {
        Value::Array(items) => items,
        single => vec![single],
    };
    if calls.is_empty() {
        return Err(DecodeError::Empty);
    }

    calls
        .iter()
        .enumerate()
        .map(|(index, call)| {
            let obj = call.as_object().ok_or(DecodeError::NotAnObject { index })?;
            let name = shape
                .name_keys
                .iter()
                .find_map(|key| obj.get(*key).and_then(Value::as_str))
                .ok_or(DecodeError::MissingName {
                    index,
                    keys: shape.name_keys,
                })?;
            let arguments = shape
                .args_keys
                .iter()
                .find_map(|key| obj.get(*key).and_then(Value::as_object))
                .ok_or(DecodeError::MissingArguments {
                    index,
                    keys: shape.args_keys,
                })?;
            Ok(ToolCallRequest::new(name, arguments.clone(), ids.generate()))
        })
        .collect()
}
