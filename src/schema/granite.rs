//! Legacy Granite chat prompt format.

use super::{require_text, RenderOptions, TemplateError, TemplateResult};
use crate::message::{Message, Role};

pub(crate) const TEMPLATE: &str = "granite";

const ASSISTANT: &str = "<|assistant|>";

fn validate(messages: &[Message]) -> TemplateResult<()> {
    for (position, message) in messages.iter().enumerate() {
        match message.role {
            Role::System | Role::Human | Role::Ai => {
                require_text(message, position)?;
            }
            role => {
                return Err(TemplateError::UnsupportedRole {
                    role,
                    template: TEMPLATE,
                    position,
                })
            }
        }
    }
    Ok(())
}

pub(crate) fn render(messages: &[Message], _options: &RenderOptions) -> TemplateResult<String> {
    validate(messages)?;

    let mut out = String::new();
    let last = messages.len().saturating_sub(1);
    for (idx, message) in messages.iter().enumerate() {
        let tag = match message.role {
            Role::System => "<|system|>",
            Role::Human => "<|user|>",
            _ => ASSISTANT,
        };
        out.push_str(tag);
        out.push('\n');
        out.push_str(message.text_or_empty());
        if !(message.role == Role::Ai && idx == last) {
            out.push('\n');
        }
    }

    if messages.last().map_or(false, |m| m.role != Role::Ai) {
        out.push_str(ASSISTANT);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation() {
        let messages = [
            Message::system("You are Granite."),
            Message::human("Hi"),
            Message::ai("Hello"),
            Message::human("Bye"),
        ];
        assert_eq!(
            render(&messages, &RenderOptions::new()).unwrap(),
            "<|system|>\nYou are Granite.\n<|user|>\nHi\n<|assistant|>\nHello\n<|user|>\nBye\n<|assistant|>"
        );
    }

    #[test]
    fn test_trailing_ai_message() {
        let prompt = render(&[Message::human("Hi"), Message::ai("Hel")], &RenderOptions::new()).unwrap();
        assert_eq!(prompt, "<|user|>\nHi\n<|assistant|>\nHel");
        assert_eq!(render(&[], &RenderOptions::new()).unwrap(), "");
    }

    #[test]
    fn test_tool_messages_are_rejected() {
        assert!(matches!(
            render(&[Message::human("Hi"), Message::tool("42", "abcDEF123")], &RenderOptions::new()),
            Err(TemplateError::UnsupportedRole { role: Role::Tool, position: 1, .. })
        ));
    }
}
