//! Tool definitions and tool-call records.
//!
//! [`ToolDefinition`] describes a function the model may call; it is rendered
//! into prompts in the OpenAI `{"type": "function", "function": {...}}`
//! shape. [`ToolCallRequest`] is a parsed or historical call.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Length of a tool-call identifier.
pub const TOOL_CALL_ID_LEN: usize = 9;

/// Whether `id` is exactly [`TOOL_CALL_ID_LEN`] ASCII alphanumeric characters.
///
/// Mistral's request validator rejects any other shape, so locally generated
/// identifiers follow the same rule for every model.
pub fn is_valid_tool_call_id(id: &str) -> bool {
    id.len() == TOOL_CALL_ID_LEN && id.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Provider-agnostic tool definition
///
/// A tool that can be called by the LLM, with a name, description, and JSON
/// Schema for parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name (function name)
    pub name: String,
    /// Human-readable description of what the tool does
    pub description: String,
    /// JSON Schema describing the tool's parameters
    pub parameters: Value,
}

impl ToolDefinition {
    /// Create a new tool definition
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }

    /// The `function` object: name, description, parameters, in that order.
    pub fn function_value(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "parameters": self.parameters,
        })
    }

    /// OpenAI tool shape: `{"type": "function", "function": {...}}`.
    pub fn to_openai_value(&self) -> Value {
        json!({
            "type": "function",
            "function": self.function_value(),
        })
    }
}

/// A structured request from the model to call a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// Name of the tool to invoke
    pub name: String,
    /// Arguments keyed by parameter name
    #[serde(alias = "args")]
    pub arguments: Map<String, Value>,
    /// Call identifier
    pub id: String,
}

impl ToolCallRequest {
    /// Create a new tool call request
    pub fn new(name: impl Into<String>, arguments: Map<String, Value>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments,
            id: id.into(),
        }
    }

    /// Arguments as a JSON object value.
    pub fn arguments_value(&self) -> Value {
        Value::Object(self.arguments.clone())
    }
}

/// A fragment of a tool call emitted while streaming.
///
/// Fragments with the same `index` belong to the same call; their string
/// fields are concatenated when messages are merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolCallChunk {
    /// Tool name fragment
    #[serde(default)]
    pub name: Option<String>,
    /// Raw JSON argument fragment
    #[serde(default)]
    pub args: Option<String>,
    /// Call identifier fragment
    #[serde(default)]
    pub id: Option<String>,
    /// Position of the call within the message
    #[serde(default)]
    pub index: Option<usize>,
}

impl ToolCallChunk {
    /// Create a new chunk
    pub fn new(
        name: Option<&str>,
        args: Option<&str>,
        id: Option<&str>,
        index: Option<usize>,
    ) -> Self {
        Self {
            name: name.map(String::from),
            args: args.map(String::from),
            id: id.map(String::from),
            index,
        }
    }

    pub(crate) fn absorb(&mut self, other: ToolCallChunk) {
        concat_opt(&mut self.name, other.name);
        concat_opt(&mut self.args, other.args);
        concat_opt(&mut self.id, other.id);
    }
}

fn concat_opt(left: &mut Option<String>, right: Option<String>) {
    match (left.as_mut(), right) {
        (Some(l), Some(r)) => l.push_str(&r),
        (None, Some(r)) => *left = Some(r),
        (_, None) => {}
    }
}
