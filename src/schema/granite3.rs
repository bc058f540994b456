//! Granite 3 prompt format.

use super::json::tojson_pretty;
use super::{require_text, RenderOptions, TemplateError, TemplateResult};
use crate::message::{Message, Role};

pub(crate) const TEMPLATE: &str = "granite3";

const END_OF_TEXT: &str = "<|end_of_text|>\n";
const GENERATION_PROMPT: &str = "<|start_of_role|>assistant<|end_of_role|>";

fn role_tag(role: Role) -> Option<&'static str> {
    match role {
        Role::System => Some("<|start_of_role|>system<|end_of_role|>"),
        Role::Human => Some("<|start_of_role|>user<|end_of_role|>"),
        Role::Ai => Some("<|start_of_role|>assistant<|end_of_role|>"),
        Role::ToolCall => Some("<|start_of_role|>assistant<|end_of_role|><|tool_call|>"),
        Role::Tool => Some("<|start_of_role|>tool_response<|end_of_role|>"),
        Role::Function => None,
    }
}

fn validate(messages: &[Message]) -> TemplateResult<()> {
    for (position, message) in messages.iter().enumerate() {
        if role_tag(message.role).is_none() {
            return Err(TemplateError::UnsupportedRole {
                role: message.role,
                template: TEMPLATE,
                position,
            });
        }
        require_text(message, position)?;
    }
    Ok(())
}

pub(crate) fn render(messages: &[Message], options: &RenderOptions) -> TemplateResult<String> {
    validate(messages)?;

    let mut out = String::new();
    if let Some(tools) = options.tools() {
        out.push_str("<|start_of_role|>available_tools<|end_of_role|>\n");
        let rendered = tools
            .iter()
            .map(|tool| tojson_pretty(&tool.to_openai_value()))
            .collect::<TemplateResult<Vec<_>>>()?;
        out.push_str(&rendered.join("\n\n"));
        out.push_str(END_OF_TEXT);
    }

    for message in messages {
        out.push_str(role_tag(message.role).unwrap_or_default());
        out.push_str(message.text_or_empty());
        out.push_str(END_OF_TEXT);
    }

    if options.add_generation_prompt && !messages.is_empty() {
        out.push_str(GENERATION_PROMPT);
    }
    Ok(out)
}
