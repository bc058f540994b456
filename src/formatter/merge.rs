//! Merging of adjacent same-role message runs.

use crate::message::{convert_to_messages, Message, MessageLike, MessageResult};

/// Collapse consecutive messages that share a role into one.
///
/// Tool results are never merged, with each other or with anything else: each
/// one answers a single tool invocation. The output is a fresh copy; content
/// is concatenated verbatim, so the output is never longer than the input and
/// the concatenation of all contents is unchanged.
pub fn merge_message_runs(messages: &[Message]) -> Vec<Message> {
    let mut merged: Vec<Message> = Vec::with_capacity(messages.len());
    for msg in messages {
        match merged.last_mut() {
            Some(last) if !msg.is_tool_result() && last.role == msg.role => {
                last.absorb(msg.clone());
            }
            _ => merged.push(msg.clone()),
        }
    }
    merged
}

/// Convert message-like values, then merge adjacent same-role runs.
pub fn merge_message_like<I>(items: I) -> MessageResult<Vec<Message>>
where
    I: IntoIterator,
    I::Item: MessageLike,
{
    let messages = convert_to_messages(items)?;
    Ok(merge_message_runs(&messages))
}
