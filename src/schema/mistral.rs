//! Mistral / Mixtral prompt format.
//!
//! See <https://github.com/mistralai/mistral-common/blob/main/examples/tokenizer.ipynb>.

use super::json::dumps;
use super::{require_text, RenderOptions, TemplateError, TemplateResult};
use crate::message::{is_valid_tool_call_id, Message, Role, ToolCallRequest, ToolDefinition};
use serde_json::Value;

pub(crate) const TEMPLATE: &str = "mistral";

fn split_system(messages: &[Message]) -> (Option<&Message>, &[Message], usize) {
    match messages.split_first() {
        Some((first, rest)) if first.role == Role::System => (Some(first), rest, 1),
        _ => (None, messages, 0),
    }
}

fn check_id(id: Option<&str>) -> TemplateResult<()> {
    match id {
        Some(id) if is_valid_tool_call_id(id) => Ok(()),
        other => Err(TemplateError::InvalidToolCallId {
            id: other.map(String::from),
        }),
    }
}

fn validate(messages: &[Message]) -> TemplateResult<()> {
    if messages.is_empty() {
        return Err(TemplateError::EmptyConversation { template: TEMPLATE });
    }
    let (system, rest, offset) = split_system(messages);
    if let Some(system) = system {
        require_text(system, 0)?;
    }

    // Tool results and tool-call turns sit outside the user/assistant alternation.
    let mut turns = 0;
    for (idx, message) in rest.iter().enumerate() {
        let position = offset + idx;
        match message.role {
            Role::Human | Role::Ai | Role::Tool => {}
            role => {
                return Err(TemplateError::UnsupportedRole {
                    role,
                    template: TEMPLATE,
                    position,
                })
            }
        }

        if message.role == Role::Tool || message.has_tool_calls() {
            if message.role == Role::Tool {
                require_text(message, position)?;
                check_id(message.tool_call_id.as_deref())?;
            } else if message.role == Role::Human {
                require_text(message, position)?;
            }
            for call in &message.tool_calls {
                check_id(Some(&call.id))?;
            }
            continue;
        }

        if (message.role == Role::Human) != (turns % 2 == 0) {
            return Err(TemplateError::RoleAlternation { position });
        }
        turns += 1;
        require_text(message, position)?;
    }
    Ok(())
}

pub(crate) fn render(messages: &[Message], options: &RenderOptions) -> TemplateResult<String> {
    validate(messages)?;
    let (system, rest, offset) = split_system(messages);
    let last_human = rest.iter().rposition(|m| m.role == Role::Human);
    let last = rest.len().saturating_sub(1);

    let mut out = String::from("<s>");
    for (idx, message) in rest.iter().enumerate() {
        match message.role {
            Role::Human => {
                let is_last_human = Some(idx) == last_human;
                if let Some(tools) = options.tools().filter(|_| is_last_human) {
                    push_available_tools(&mut out, tools)?;
                }
                out.push_str("[INST] ");
                if let Some(system) = system.filter(|_| is_last_human) {
                    out.push_str(system.text_or_empty());
                    out.push_str("\n\n");
                }
                out.push_str(message.text_or_empty());
                out.push_str("[/INST]");
            }
            Role::Ai if message.has_tool_calls() => push_tool_calls(&mut out, &message.tool_calls)?,
            Role::Ai => {
                out.push(' ');
                out.push_str(message.text_or_empty().trim());
                if idx != last {
                    out.push_str("</s>");
                }
            }
            Role::Tool => {
                out.push_str("[TOOL_RESULTS] {\"content\": ");
                out.push_str(message.text_or_empty());
                out.push_str(", \"call_id\": \"");
                out.push_str(message.tool_call_id.as_deref().unwrap_or(""));
                out.push_str("\"}[/TOOL_RESULTS]");
            }
            role => {
                return Err(TemplateError::UnsupportedRole {
                    role,
                    template: TEMPLATE,
                    position: offset + idx,
                })
            }
        }
    }
    Ok(out)
}

/// String fields are written raw, everything else as JSON; `return` is skipped.
fn push_available_tools(out: &mut String, tools: &[ToolDefinition]) -> TemplateResult<()> {
    let mut rendered = Vec::with_capacity(tools.len());
    for tool in tools {
        let function = tool.function_value();
        let mut fields = Vec::new();
        if let Value::Object(map) = &function {
            for (key, value) in map.iter().filter(|(key, _)| key.as_str() != "return") {
                match value {
                    Value::String(s) => fields.push(format!("\"{}\": \"{}\"", key, s)),
                    other => fields.push(format!("\"{}\": {}", key, dumps(other)?)),
                }
            }
        }
        rendered.push(format!(
            "{{\"type\": \"function\", \"function\": {{{}}}}}",
            fields.join(", ")
        ));
    }
    out.push_str("[AVAILABLE_TOOLS] [");
    out.push_str(&rendered.join(", "));
    out.push_str("][/AVAILABLE_TOOLS]");
    Ok(())
}

fn push_tool_calls(out: &mut String, calls: &[ToolCallRequest]) -> TemplateResult<()> {
    let mut rendered = Vec::with_capacity(calls.len());
    for call in calls {
        rendered.push(format!(
            "{{\"name\": \"{}\", \"parameters\": {}, \"id\": \"{}\"}}",
            call.name,
            dumps(&call.arguments_value())?,
            call.id
        ));
    }
    out.push_str("[TOOL_CALLS] [");
    out.push_str(&rendered.join(", "));
    out.push_str("]</s>");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn args(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_system_goes_into_last_user_message() {
        let messages = [
            Message::system("Be brief."),
            Message::human("Capital of Italy?"),
            Message::ai(" Rome "),
            Message::human("And France?"),
        ];
        let prompt = render(&messages, &RenderOptions::new()).unwrap();
        assert_eq!(
            prompt,
            "<s>[INST] Capital of Italy?[/INST] Rome</s>[INST] Be brief.\n\nAnd France?[/INST]"
        );
    }

    #[test]
    fn test_trailing_ai_message_has_no_end_tag() {
        let prompt = render(&[Message::human("Hi"), Message::ai("Hello")], &RenderOptions::new()).unwrap();
        assert_eq!(prompt, "<s>[INST] Hi[/INST] Hello");
    }

    #[test]
    fn test_consecutive_user_messages_are_rejected() {
        let err = render(
            &[Message::system("s"), Message::human("one"), Message::human("two")],
            &RenderOptions::new(),
        )
        .unwrap_err();
        assert_eq!(err, TemplateError::RoleAlternation { position: 2 });

        let err = render(&[Message::ai("first")], &RenderOptions::new()).unwrap_err();
        assert_eq!(err, TemplateError::RoleAlternation { position: 0 });
    }

    #[test]
    fn test_tools_and_tool_round_trip() {
        let tool = ToolDefinition::new(
            "get_weather",
            "Get the weather",
            json!({"type": "object", "properties": {"city": {"type": "string"}}}),
        );
        let messages = [
            Message::human("Weather in Rome?"),
            Message::ai_with_tool_calls(
                "",
                vec![ToolCallRequest::new("get_weather", args(json!({"city": "Rome"})), "abcDEF123")],
            ),
            Message::tool("\"sunny\"", "abcDEF123"),
            Message::ai("It is sunny."),
            Message::human("Thanks"),
        ];
        let prompt = render(&messages, &RenderOptions::new().with_tools(vec![tool])).unwrap();
        assert_eq!(
            prompt,
            "<s>[INST] Weather in Rome?[/INST]\
             [TOOL_CALLS] [{\"name\": \"get_weather\", \"parameters\": {\"city\": \"Rome\"}, \"id\": \"abcDEF123\"}]</s>\
             [TOOL_RESULTS] {\"content\": \"sunny\", \"call_id\": \"abcDEF123\"}[/TOOL_RESULTS] It is sunny.</s>\
             [AVAILABLE_TOOLS] [{\"type\": \"function\", \"function\": {\"name\": \"get_weather\", \"description\": \"Get the weather\", \
             \"parameters\": {\"type\": \"object\", \"properties\": {\"city\": {\"type\": \"string\"}}}}}][/AVAILABLE_TOOLS]\
             [INST] Thanks[/INST]"
        );
    }

    #[test]
    fn test_malformed_tool_call_ids_are_rejected() {
        let messages = [
            Message::human("Hi"),
            Message::ai_with_tool_calls("", vec![ToolCallRequest::new("f", Map::new(), "call_1")]),
        ];
        assert_eq!(
            render(&messages, &RenderOptions::new()).unwrap_err(),
            TemplateError::InvalidToolCallId { id: Some("call_1".to_string()) }
        );

        let mut result = Message::tool("42", "abcDEF123");
        result.tool_call_id = None;
        assert_eq!(
            render(&[Message::human("Hi"), result], &RenderOptions::new()).unwrap_err(),
            TemplateError::InvalidToolCallId { id: None }
        );
    }

    #[test]
    fn test_system_only() {
        assert_eq!(render(&[Message::system("s")], &RenderOptions::new()).unwrap(), "<s>");
    }

    #[test]
    fn test_unsupported_roles() {
        assert!(matches!(
            render(&[Message::human("Hi"), Message::function("f", "x")], &RenderOptions::new()),
            Err(TemplateError::UnsupportedRole { role: Role::Function, position: 1, .. })
        ));
        assert!(matches!(
            render(&[Message::human("Hi"), Message::system("late")], &RenderOptions::new()),
            Err(TemplateError::UnsupportedRole { role: Role::System, position: 1, .. })
        ));
        assert_eq!(
            render(&[], &RenderOptions::new()).unwrap_err(),
            TemplateError::EmptyConversation { template: "mistral" }
        );
    }
}
