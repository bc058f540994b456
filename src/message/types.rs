//! Role, content and message types.

use super::error::MessageError;
use super::tools::{ToolCallChunk, ToolCallRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Speaker of a message.
///
/// The set is closed: formatters and templates match on it exhaustively, so a
/// new role forces every rendering path to decide how to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Instructions that frame the conversation.
    System,
    /// The end user.
    #[serde(alias = "user")]
    Human,
    /// The model.
    #[serde(alias = "assistant")]
    Ai,
    /// Result of a tool invocation, tied to a call by `tool_call_id`.
    Tool,
    /// Legacy function-calling result.
    Function,
    /// Assistant turn whose content is a serialized tool-call request.
    #[serde(rename = "assistant_tool_call")]
    ToolCall,
}

impl Role {
    /// Canonical role name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Human => "human",
            Self::Ai => "ai",
            Self::Tool => "tool",
            Self::Function => "function",
            Self::ToolCall => "assistant_tool_call",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = MessageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(Self::System),
            "human" | "user" => Ok(Self::Human),
            "ai" | "assistant" => Ok(Self::Ai),
            "tool" => Ok(Self::Tool),
            "function" => Ok(Self::Function),
            "assistant_tool_call" => Ok(Self::ToolCall),
            other => Err(MessageError::UnknownRole(other.to_string())),
        }
    }
}

/// Message payload.
///
/// Only [`MessageContent::Text`] can be rendered into a prompt; structured
/// parts are carried so that merging stays lossless, and rejected at format
/// time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain text.
    Text(String),
    /// Structured content parts (text fragments as JSON strings, or objects).
    Parts(Vec<Value>),
}

impl MessageContent {
    /// Get the text if this is plain text content
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Parts(_) => None,
        }
    }

    /// Concatenate `other` onto this content.
    ///
    /// Text + text concatenates verbatim. Once either side is structured the
    /// result is a parts list, with text appended to a trailing text part when
    /// there is one.
    pub fn merge(self, other: MessageContent) -> MessageContent {
        match (self, other) {
            (Self::Text(mut left), Self::Text(right)) => {
                left.push_str(&right);
                Self::Text(left)
            }
            (Self::Text(left), Self::Parts(right)) => {
                if left.is_empty() {
                    return Self::Parts(right);
                }
                let mut parts = Vec::with_capacity(right.len() + 1);
                parts.push(Value::String(left));
                parts.extend(right);
                Self::Parts(parts)
            }
            (Self::Parts(mut left), Self::Text(right)) => {
                match left.last_mut() {
                    Some(Value::String(last)) => last.push_str(&right),
                    _ if !right.is_empty() => left.push(Value::String(right)),
                    _ => {}
                }
                Self::Parts(left)
            }
            (Self::Parts(mut left), Self::Parts(right)) => {
                left.extend(right);
                Self::Parts(left)
            }
        }
    }
}

impl Default for MessageContent {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for MessageContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// A single conversation message.
///
/// Messages are immutable values owned by the caller; rendering borrows them
/// and merging produces fresh copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Who is speaking.
    #[serde(alias = "type")]
    pub role: Role,
    /// Message payload.
    #[serde(default)]
    pub content: MessageContent,
    /// Tool calls requested by an AI message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCallRequest>,
    /// Incremental tool-call fragments from a streamed AI message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_call_chunks: Vec<ToolCallChunk>,
    /// Identifier of the call a tool message answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    /// Function or tool name, when relevant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Message {
    /// Create a message with the given role and text content.
    pub fn new(role: Role, content: impl Into<MessageContent>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_chunks: Vec::new(),
            tool_call_id: None,
            name: None,
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<MessageContent>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a human (user) message
    pub fn human(content: impl Into<MessageContent>) -> Self {
        Self::new(Role::Human, content)
    }

    /// Create an AI (assistant) message
    pub fn ai(content: impl Into<MessageContent>) -> Self {
        Self::new(Role::Ai, content)
    }

    /// Create an AI message that requests tool calls.
    pub fn ai_with_tool_calls(
        content: impl Into<MessageContent>,
        tool_calls: Vec<ToolCallRequest>,
    ) -> Self {
        Self {
            tool_calls,
            ..Self::ai(content)
        }
    }

    /// Create a streamed AI message fragment.
    pub fn ai_chunk(content: impl Into<MessageContent>, chunks: Vec<ToolCallChunk>) -> Self {
        Self {
            tool_call_chunks: chunks,
            ..Self::ai(content)
        }
    }

    /// Create a tool result message answering `tool_call_id`.
    pub fn tool(content: impl Into<MessageContent>, tool_call_id: impl Into<String>) -> Self {
        Self {
            tool_call_id: Some(tool_call_id.into()),
            ..Self::new(Role::Tool, content)
        }
    }

    /// Create a function result message.
    pub fn function(name: impl Into<String>, content: impl Into<MessageContent>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(Role::Function, content)
        }
    }

    /// Create an assistant tool-call message whose content is the serialized call.
    pub fn tool_call(content: impl Into<MessageContent>) -> Self {
        Self::new(Role::ToolCall, content)
    }

    /// Get the text content, if the content is plain text.
    pub fn text(&self) -> Option<&str> {
        self.content.as_text()
    }

    /// Text content, or the empty string for structured content.
    pub(crate) fn text_or_empty(&self) -> &str {
        self.text().unwrap_or("")
    }

    /// Whether this is a tool result (never merged with neighbours).
    pub fn is_tool_result(&self) -> bool {
        self.role == Role::Tool
    }

    /// Whether this AI message requests at least one tool call.
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }

    /// Append `other` onto this message.
    ///
    /// Content is concatenated, tool calls are appended in order and streamed
    /// tool-call chunks sharing an index are stitched together.
    pub(crate) fn absorb(&mut self, other: Message) {
        let content = std::mem::take(&mut self.content);
        self.content = content.merge(other.content);
        self.tool_calls.extend(other.tool_calls);
        for chunk in other.tool_call_chunks {
            let slot = chunk
                .index
                .and_then(|idx| self.tool_call_chunks.iter().position(|c| c.index == Some(idx)));
            match slot {
                Some(pos) => self.tool_call_chunks[pos].absorb(chunk),
                None => self.tool_call_chunks.push(chunk),
            }
        }
        if self.tool_call_id.is_none() {
            self.tool_call_id = other.tool_call_id;
        }
        if self.name.is_none() {
            self.name = other.name;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_creation() {
        let msg = Message::system("You are a helpful assistant");
        assert_eq!(msg.role, Role::System);
        assert_eq!(msg.text(), Some("You are a helpful assistant"));

        let msg = Message::human("Hello");
        assert_eq!(msg.role, Role::Human);

        let msg = Message::tool("72F, sunny", "abcDEF123");
        assert!(msg.is_tool_result());
        assert_eq!(msg.tool_call_id.as_deref(), Some("abcDEF123"));
    }

    #[test]
    fn test_role_string_conversion() {
        assert_eq!(Role::System.as_str(), "system");
        assert_eq!(Role::Human.as_str(), "human");
        assert_eq!(Role::Ai.as_str(), "ai");
        assert_eq!(Role::ToolCall.as_str(), "assistant_tool_call");

        assert_eq!("user".parse::<Role>().unwrap(), Role::Human);
        assert_eq!("assistant".parse::<Role>().unwrap(), Role::Ai);
        assert!(matches!(
            "narrator".parse::<Role>(),
            Err(MessageError::UnknownRole(role)) if role == "narrator"
        ));
    }

    #[test]
    fn test_text_merge() {
        let merged = MessageContent::from("The").merge(MessageContent::from(" capital"));
        assert_eq!(merged, MessageContent::Text("The capital".to_string()));
    }

    #[test]
    fn test_structured_merge() {
        let parts = MessageContent::Parts(vec![json!({"type": "image_url", "image_url": "x"})]);

        let merged = MessageContent::from("look: ").merge(parts.clone());
        assert_eq!(
            merged,
            MessageContent::Parts(vec![json!("look: "), json!({"type": "image_url", "image_url": "x"})])
        );

        let merged = parts.merge(MessageContent::from("caption"));
        assert_eq!(
            merged,
            MessageContent::Parts(vec![json!({"type": "image_url", "image_url": "x"}), json!("caption")])
        );

        let merged = MessageContent::Parts(vec![json!("a")]).merge(MessageContent::from("b"));
        assert_eq!(merged, MessageContent::Parts(vec![json!("ab")]));
    }

    #[test]
    fn test_absorb_stitches_chunks() {
        let mut first = Message::ai_chunk(
            "",
            vec![ToolCallChunk::new(Some("search"), Some("{\"q\": "), Some("abcDEF123"), Some(0))],
        );
        let second = Message::ai_chunk("", vec![ToolCallChunk::new(None, Some("\"rust\"}"), None, Some(0))]);

        first.absorb(second);
        assert_eq!(first.tool_call_chunks.len(), 1);
        assert_eq!(first.tool_call_chunks[0].args.as_deref(), Some("{\"q\": \"rust\"}"));
        assert_eq!(first.tool_call_chunks[0].name.as_deref(), Some("search"));
    }

    #[test]
    fn test_message_serialization() {
        let msg: Message =
            serde_json::from_value(json!({"role": "user", "content": "Test message"})).unwrap();
        assert_eq!(msg.role, Role::Human);
        assert_eq!(msg.text(), Some("Test message"));

        let msg: Message =
            serde_json::from_value(json!({"type": "tool", "content": "42", "tool_call_id": "abcDEF123"}))
                .unwrap();
        assert_eq!(msg.role, Role::Tool);

        let json = serde_json::to_value(Message::ai("Hi")).unwrap();
        assert_eq!(json, json!({"role": "ai", "content": "Hi"}));
    }
}
