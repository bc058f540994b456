//! Mixtral 8x7B instruct tags.

use super::{ChatFormatter, FormatError, FormatResult};
use crate::message::{Message, Role};

/// Formats chat messages for the Mixtral 8x7B instruct model.
///
/// Mixtral has no tool role; tool and function messages are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct MixtralChatFormatter;

impl ChatFormatter for MixtralChatFormatter {
    fn name(&self) -> &'static str {
        "mixtral"
    }

    fn start(&self) -> &str {
        "<s>"
    }

    fn end(&self) -> &str {
        ""
    }

    fn system(&self) -> &str {
        "[INST] "
    }

    fn human(&self) -> &str {
        "[INST] "
    }

    fn ai(&self) -> &str {
        ""
    }

    fn tool(&self) -> Option<&str> {
        None
    }

    fn end_of(&self, message: &Message) -> FormatResult<&str> {
        match message.role {
            Role::Ai => Ok("</s> "),
            Role::System => Ok(" [/INST]</s> "),
            Role::Human => Ok(" [/INST]"),
            Role::Tool | Role::Function | Role::ToolCall => Err(FormatError::UnsupportedRole {
                role: message.role,
                formatter: self.name(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation() {
        let prompt = MixtralChatFormatter
            .format(&[
                Message::system("Be brief."),
                Message::human("Capital of Italy?"),
                Message::ai("Rome"),
                Message::human("And France?"),
            ])
            .unwrap();

        assert_eq!(
            prompt,
            "<s>[INST] Be brief. [/INST]</s> [INST] Capital of Italy? [/INST]Rome</s> [INST] And France? [/INST]"
        );
    }

    #[test]
    fn test_open_assistant_turn() {
        let prompt = MixtralChatFormatter
            .format(&[Message::human("Say hi"), Message::ai("Hi")])
            .unwrap();
        assert_eq!(prompt, "<s>[INST] Say hi [/INST]Hi");
    }

    #[test]
    fn test_tool_messages_are_rejected() {
        let err = MixtralChatFormatter
            .format(&[Message::human("x"), Message::tool("y", "abcDEF123")])
            .unwrap_err();
        assert_eq!(
            err,
            FormatError::UnsupportedRole {
                role: Role::Tool,
                formatter: "mixtral"
            }
        );
    }
}
