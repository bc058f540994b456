//! Error types for tag-based formatting.

use crate::message::Role;
use thiserror::Error;

/// Errors that can occur while formatting a conversation with a
/// [`super::ChatFormatter`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The formatter has no tag for this role.
    #[error("{role} messages are not supported by the {formatter} formatter")]
    UnsupportedRole {
        /// Role that could not be formatted.
        role: Role,
        /// Name of the formatter.
        formatter: &'static str,
    },

    /// Message content is structured rather than plain text.
    #[error("only messages with string content can be formatted (message {index} has structured content)")]
    NonTextContent {
        /// Position of the offending message after merging.
        index: usize,
    },
}

/// Result type for formatting.
pub type FormatResult<T> = Result<T, FormatError>;
