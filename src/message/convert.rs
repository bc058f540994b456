//! Conversion of message-like values into canonical [`Message`]s.
//!
//! Accepted shapes:
//! - a [`Message`] (moved) or `&Message` (deep copy)
//! - `(role, content)` pairs, with the role as [`Role`] or a role string
//! - JSON objects with a `role` (or `type`) key and optional `content`,
//!   `tool_calls`, `tool_call_id` and `name`

use super::error::{MessageError, MessageResult};
use super::types::{Message, Role};
use serde_json::Value;

/// A value that can be turned into a [`Message`].
pub trait MessageLike {
    /// Convert into a canonical message.
    fn into_message(self) -> MessageResult<Message>;
}

impl MessageLike for Message {
    fn into_message(self) -> MessageResult<Message> {
        Ok(self)
    }
}

impl MessageLike for &Message {
    fn into_message(self) -> MessageResult<Message> {
        Ok(self.clone())
    }
}

impl MessageLike for (Role, &str) {
    fn into_message(self) -> MessageResult<Message> {
        Ok(Message::new(self.0, self.1))
    }
}

impl MessageLike for (&str, &str) {
    fn into_message(self) -> MessageResult<Message> {
        let role = self.0.parse::<Role>()?;
        Ok(Message::new(role, self.1))
    }
}

impl MessageLike for (String, String) {
    fn into_message(self) -> MessageResult<Message> {
        let role = self.0.parse::<Role>()?;
        Ok(Message::new(role, self.1))
    }
}

impl MessageLike for Value {
    fn into_message(self) -> MessageResult<Message> {
        let obj = self
            .as_object()
            .ok_or_else(|| MessageError::Malformed(format!("expected a JSON object, got {}", self)))?;

        // Surface unknown roles as such rather than as a generic serde error.
        let role = obj
            .get("role")
            .or_else(|| obj.get("type"))
            .and_then(Value::as_str)
            .ok_or_else(|| MessageError::Malformed("missing string field `role`".to_string()))?;
        role.parse::<Role>()?;

        serde_json::from_value(self).map_err(|e| MessageError::Malformed(e.to_string()))
    }
}

/// Convert a sequence of message-like values into canonical messages.
///
/// Fails on the first value that cannot be converted.
pub fn convert_to_messages<I>(items: I) -> MessageResult<Vec<Message>>
where
    I: IntoIterator,
    I::Item: MessageLike,
{
    items.into_iter().map(MessageLike::into_message).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tuple_conversion() {
        let messages = convert_to_messages([
            ("system", "You are helpful"),
            ("user", "Hello"),
            ("assistant", "Hi there!"),
        ])
        .unwrap();

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::Human);
        assert_eq!(messages[2].role, Role::Ai);
        assert_eq!(messages[2].text(), Some("Hi there!"));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let err = convert_to_messages([("user", "Hi"), ("narrator", "Once upon a time")]).unwrap_err();
        assert_eq!(err, MessageError::UnknownRole("narrator".to_string()));
    }

    #[test]
    fn test_json_conversion() {
        let messages = convert_to_messages(vec![
            json!({"role": "user", "content": "What's the weather?"}),
            json!({
                "role": "assistant",
                "content": "",
                "tool_calls": [{"name": "get_weather", "arguments": {"city": "Rome"}, "id": "abcDEF123"}]
            }),
            json!({"role": "tool", "content": "sunny", "tool_call_id": "abcDEF123"}),
        ])
        .unwrap();

        assert_eq!(messages[1].tool_calls.len(), 1);
        assert_eq!(messages[1].tool_calls[0].arguments["city"], "Rome");
        assert_eq!(messages[2].tool_call_id.as_deref(), Some("abcDEF123"));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            json!("just a string").into_message(),
            Err(MessageError::Malformed(_))
        ));
        assert!(matches!(
            json!({"content": "no role"}).into_message(),
            Err(MessageError::Malformed(_))
        ));
        assert_eq!(
            json!({"role": "narrator", "content": "x"}).into_message(),
            Err(MessageError::UnknownRole("narrator".to_string()))
        );
    }

    #[test]
    fn test_borrowed_messages_are_copied() {
        let original = vec![Message::human("Hello")];
        let copied = convert_to_messages(&original).unwrap();
        assert_eq!(copied, original);
    }
}
