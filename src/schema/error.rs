//! Render-time validation failures.

use crate::message::Role;
use thiserror::Error;

/// Errors raised while rendering a conversation with a model template.
///
/// Every variant means the conversation does not have a shape the model's
/// prompt format can express; no prompt is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// Human and assistant turns do not alternate after the optional system message.
    #[error("After the optional system message, conversation roles must alternate user/assistant/user/assistant/... (message {position} breaks the alternation)")]
    RoleAlternation {
        /// Index of the offending message in the input.
        position: usize,
    },

    /// An assistant turn requests more than one tool call.
    #[error("This model only supports single tool-calls at once! (message {position} has {count})")]
    MultipleToolCalls {
        /// Index of the offending message in the input.
        position: usize,
        /// Number of tool calls found.
        count: usize,
    },

    /// A tool call or tool result carries a malformed identifier.
    #[error("Tool call IDs should be alphanumeric strings with length 9! (got {id:?})")]
    InvalidToolCallId {
        /// The identifier found, if any.
        id: Option<String>,
    },

    /// Tools were requested in the first user message but there is none.
    #[error("Cannot put tools in the first user message when there's no first user message!")]
    MissingFirstUserMessage,

    /// The template needs at least one message.
    #[error("the {template} template cannot render an empty conversation")]
    EmptyConversation {
        /// Template name.
        template: &'static str,
    },

    /// The template has no rendering for this role at this position.
    #[error("{role} messages are not supported by the {template} template (message {position})")]
    UnsupportedRole {
        /// Offending role.
        role: Role,
        /// Template name.
        template: &'static str,
        /// Index of the offending message in the input.
        position: usize,
    },

    /// Message content is structured rather than plain text.
    #[error("only messages with string content can be rendered (message {position})")]
    NonTextContent {
        /// Index of the offending message in the input.
        position: usize,
    },

    /// No schema is registered for the model identifier.
    #[error("unknown model '{0}'")]
    UnknownModel(String),

    /// JSON embedded in the prompt could not be produced.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for template rendering.
pub type TemplateResult<T> = Result<T, TemplateError>;
