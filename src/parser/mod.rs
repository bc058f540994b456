//! Tool-call parsing of raw model output.
//!
//! Each tool-enabled model family has a parser that turns a raw completion
//! into either structured [`ToolCallRequest`]s or the unchanged text. Parsers
//! never fail: model output is untrusted, so anything that does not decode
//! cleanly is logged and handed back as text.
//!
//! # Example
//!
//! ```
//! use pfk::parser::{parse_llama31_tool_call, ParsedOutput, RandomIdGenerator};
//!
//! let out = parse_llama31_tool_call(
//!     r#"<|python_tag|>{"name": "get_weather", "parameters": {"city": "Rome"}}"#,
//!     false,
//!     &RandomIdGenerator,
//! );
//! assert!(matches!(out, ParsedOutput::ToolCalls(ref calls) if calls[0].name == "get_weather"));
//! ```

mod decode;
mod granite3;
mod ids;
mod llama3;
mod mistral;

pub use granite3::parse_granite3_tool_call;
pub use ids::{generate_tool_call_id, RandomIdGenerator, ToolCallIdGenerator};
pub use llama3::parse_llama31_tool_call;
pub use mistral::parse_mistral_tool_call;

use crate::message::ToolCallRequest;

/// Result of parsing a model completion.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedOutput {
    /// No tool call; the raw completion, unchanged.
    Text(String),
    /// The completion requested these tool calls.
    ToolCalls(Vec<ToolCallRequest>),
}

impl ParsedOutput {
    /// Get the text if no tool call was found
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::ToolCalls(_) => None,
        }
    }

    /// Get the tool calls, if any were parsed
    pub fn tool_calls(&self) -> Option<&[ToolCallRequest]> {
        match self {
            Self::Text(_) => None,
            Self::ToolCalls(calls) => Some(calls),
        }
    }

    /// Whether the output is a tool-call request.
    pub fn is_tool_calls(&self) -> bool {
        matches!(self, Self::ToolCalls(_))
    }
}

/// Signature shared by the model parsers: raw completion, whether tool use
/// was forced, and the identifier source for parsed calls.
pub type ToolParser = fn(&str, bool, &dyn ToolCallIdGenerator) -> ParsedOutput;

#[cfg(test)]
pub(crate) mod testing {
    use super::ToolCallIdGenerator;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Deterministic ids: `id0000000`, `id0000001`, ...
    #[derive(Debug, Default)]
    pub(crate) struct SequentialIds(AtomicUsize);

    impl ToolCallIdGenerator for SequentialIds {
        fn generate(&self) -> String {
            format!("id{:07}", self.0.fetch_add(1, Ordering::Relaxed))
        }
    }
}
