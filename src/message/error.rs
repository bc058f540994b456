//! Error types for message conversion.

use thiserror::Error;

/// Errors raised while converting message-like values into [`super::Message`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// The role string does not name any supported role.
    #[error("unknown message role '{0}'")]
    UnknownRole(String),

    /// The value could not be interpreted as a message.
    #[error("malformed message: {0}")]
    Malformed(String),
}

/// Result type for message conversion.
pub type MessageResult<T> = Result<T, MessageError>;
