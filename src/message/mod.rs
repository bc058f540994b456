//! Canonical conversation model consumed by formatters and templates.
//!
//! Host frameworks hand over conversations in many shapes (role/content
//! pairs, OpenAI-style JSON objects, LangChain-style typed messages). They are
//! all converted into [`Message`] values before any prompt is produced, so the
//! rendering code only ever matches on the closed [`Role`] enum.

mod convert;
mod error;
mod tools;
mod types;

pub use convert::{convert_to_messages, MessageLike};
pub use error::{MessageError, MessageResult};
pub use tools::{is_valid_tool_call_id, ToolCallChunk, ToolCallRequest, ToolDefinition, TOOL_CALL_ID_LEN};
pub use types::{Message, MessageContent, Role};
