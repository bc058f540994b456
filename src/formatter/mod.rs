//! Tag-based chat formatters.
//!
//! A [`ChatFormatter`] exposes the role tags of one model family; the shared
//! [`ChatFormatter::format`] algorithm merges adjacent same-role messages and
//! concatenates tags and content into a plain prompt.
//!
//! # Example
//!
//! ```
//! use pfk::formatter::{ChatFormatter, Llama3ChatFormatter};
//! use pfk::message::Message;
//!
//! let prompt = Llama3ChatFormatter
//!     .format(&[Message::human("Hello, how are you?")])
//!     .unwrap();
//! assert!(prompt.ends_with("<|start_header_id|>assistant<|end_header_id|>\n\n"));
//! ```

mod error;
mod llama3;
mod merge;
mod mixtral;

pub use error::{FormatError, FormatResult};
pub use llama3::Llama3ChatFormatter;
pub use merge::{merge_message_like, merge_message_runs};
pub use mixtral::MixtralChatFormatter;

use crate::message::{Message, Role};
use tracing::debug;

/// Role tags of a model family.
pub trait ChatFormatter {
    /// Short name used in errors and logs.
    fn name(&self) -> &'static str;

    /// Emitted once before the first message.
    fn start(&self) -> &str;

    /// Emitted once after the last message, unless it is an AI message.
    fn end(&self) -> &str;

    /// Tag opening a system message.
    fn system(&self) -> &str;

    /// Tag opening a human message.
    fn human(&self) -> &str;

    /// Tag opening an AI message.
    fn ai(&self) -> &str;

    /// Tag opening a tool or function message; `None` when unsupported.
    fn tool(&self) -> Option<&str>;

    /// Tag closing `message`.
    fn end_of(&self, message: &Message) -> FormatResult<&str>;

    /// Opening tag for `message`, resolved from its role.
    fn tag_of(&self, message: &Message) -> FormatResult<&str> {
        let unsupported = || FormatError::UnsupportedRole {
            role: message.role,
            formatter: self.name(),
        };
        match message.role {
            Role::Ai => Ok(self.ai()),
            Role::System => Ok(self.system()),
            Role::Human => Ok(self.human()),
            Role::Tool | Role::Function => self.tool().ok_or_else(unsupported),
            Role::ToolCall => Err(unsupported()),
        }
    }

    /// Format `messages` into a prompt.
    ///
    /// An empty conversation formats to the empty string. When the last
    /// message is an AI message its end tag and the conversation end tag are
    /// omitted, leaving the turn open for the model to continue.
    fn format(&self, messages: &[Message]) -> FormatResult<String> {
        if messages.is_empty() {
            return Ok(String::new());
        }

        let messages = merge_message_runs(messages);
        debug!(
            target: "pfk::formatter",
            "Formatting {} merged messages with {}",
            messages.len(),
            self.name()
        );

        let mut prompt = String::from(self.start());
        let last = messages.len() - 1;
        for (idx, message) in messages.iter().enumerate() {
            let content = message
                .text()
                .ok_or(FormatError::NonTextContent { index: idx })?;

            prompt.push_str(self.tag_of(message)?);
            prompt.push_str(content);

            if idx < last || message.role != Role::Ai {
                prompt.push_str(self.end_of(message)?);
            }
            if idx == last && message.role != Role::Ai {
                prompt.push_str(self.end());
            }
        }

        Ok(prompt)
    }
}
