//! Tool-call identifier generation.

use crate::message::TOOL_CALL_ID_LEN;
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Source of identifiers for parsed tool calls.
///
/// Identifiers are never taken from model output; every parsed call gets a
/// fresh one from the generator handed to the parser.
pub trait ToolCallIdGenerator: Send + Sync {
    /// Produce a new identifier.
    fn generate(&self) -> String;
}

/// Random 9-character `[a-zA-Z0-9]` identifiers from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl ToolCallIdGenerator for RandomIdGenerator {
    fn generate(&self) -> String {
        generate_tool_call_id()
    }
}

/// Generate a random tool-call identifier.
pub fn generate_tool_call_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOOL_CALL_ID_LEN)
        .map(char::from)
        .collect()
}
