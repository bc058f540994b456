//! Llama 3 instruct tags.

use super::{ChatFormatter, FormatResult};
use crate::message::Message;

const SYSTEM: &str = "<|start_header_id|>system<|end_header_id|>\n\n";
const HUMAN: &str = "<|start_header_id|>user<|end_header_id|>\n\n";
const AI: &str = "<|start_header_id|>assistant<|end_header_id|>\n\n";
const TOOL: &str = "<|start_header_id|>ipython<|end_header_id|>\n\n";

/// Formats chat messages for the Llama 3 instruct models.
///
/// The conversation end tag is the assistant header, so a prompt that ends on
/// a non-AI message primes the model to answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Llama3ChatFormatter;

impl ChatFormatter for Llama3ChatFormatter {
    fn name(&self) -> &'static str {
        "llama3"
    }

    fn start(&self) -> &str {
        "<|begin_of_text|>"
    }

    fn end(&self) -> &str {
        self.ai()
    }

    fn system(&self) -> &str {
        SYSTEM
    }

    fn human(&self) -> &str {
        HUMAN
    }

    fn ai(&self) -> &str {
        AI
    }

    fn tool(&self) -> Option<&str> {
        Some(TOOL)
    }

    fn end_of(&self, _message: &Message) -> FormatResult<&str> {
        Ok("<|eot_id|>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::FormatError;
    use crate::message::MessageContent;
    use serde_json::json;

    #[test]
    fn test_empty_conversation() {
        assert_eq!(Llama3ChatFormatter.format(&[]).unwrap(), "");
    }

    #[test]
    fn test_tool_message_uses_ipython_header() {
        let prompt = Llama3ChatFormatter
            .format(&[Message::human("run it"), Message::tool("{\"ok\": true}", "abcDEF123")])
            .unwrap();
        assert!(prompt.contains("<|start_header_id|>ipython<|end_header_id|>\n\n{\"ok\": true}<|eot_id|>"));
        assert!(prompt.ends_with("<|eot_id|><|start_header_id|>assistant<|end_header_id|>\n\n"));
    }

    #[test]
    fn test_assistant_last_leaves_turn_open() {
        let prompt = Llama3ChatFormatter
            .format(&[Message::human("Hi"), Message::ai("Hello")])
            .unwrap();
        assert!(prompt.ends_with("assistant<|end_header_id|>\n\nHello"));
        assert!(!prompt.ends_with("<|eot_id|>"));
    }

    #[test]
    fn test_structured_content_fails_loudly() {
        let mut message = Message::human("");
        message.content = MessageContent::Parts(vec![json!({"type": "image_url"})]);
        let err = Llama3ChatFormatter.format(&[message]).unwrap_err();
        assert_eq!(err, FormatError::NonTextContent { index: 0 });
    }

    #[test]
    fn test_tool_call_role_is_rejected() {
        let err = Llama3ChatFormatter
            .format(&[Message::tool_call("[]")])
            .unwrap_err();
        assert!(matches!(err, FormatError::UnsupportedRole { formatter: "llama3", .. }));
    }
}
