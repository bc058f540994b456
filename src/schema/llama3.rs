//! Llama 3 / 3.1 prompt format.
//!
//! See <https://llama.meta.com/docs/model-cards-and-prompt-formats/llama3_1/#json-based-tool-calling>.

use super::json::{dumps, tojson, tojson_pretty};
use super::{require_text, RenderOptions, TemplateError, TemplateResult};
use crate::message::{Message, Role, ToolCallRequest, ToolDefinition};
use serde_json::Value;

pub(crate) const TEMPLATE: &str = "llama3";

const BEGIN_OF_TEXT: &str = "<|begin_of_text|>";
const EOT: &str = "<|eot_id|>";
const EOM: &str = "<|eom_id|>";
const PYTHON_TAG: &str = "<|python_tag|>";
const CODE_INTERPRETER: &str = "code_interpreter";

const RESPOND_FORMAT: &str = "Respond in the format {\"name\": function name, \"parameters\": dictionary of argument name and its value}.Do not use variables.\n\n";

fn header(role: &str) -> String {
    format!("<|start_header_id|>{}<|end_header_id|>\n\n", role)
}

/// Leading system message, tools-bearing first user message and the rest,
/// with the input position of the first remaining message.
struct Layout<'a> {
    system: Option<&'a Message>,
    first_user: Option<&'a Message>,
    rest: &'a [Message],
    offset: usize,
}

fn layout<'a>(messages: &'a [Message], options: &RenderOptions) -> TemplateResult<Layout<'a>> {
    let (system, mut rest, mut offset) = match messages.split_first() {
        None => return Err(TemplateError::EmptyConversation { template: TEMPLATE }),
        Some((first, rest)) if first.role == Role::System => (Some(first), rest, 1),
        Some(_) => (None, messages, 0),
    };

    let mut first_user = None;
    if options.tools_in_user_message && options.tools().is_some() {
        let (first, tail) = rest
            .split_first()
            .ok_or(TemplateError::MissingFirstUserMessage)?;
        first_user = Some(first);
        rest = tail;
        offset += 1;
    }

    Ok(Layout {
        system,
        first_user,
        rest,
        offset,
    })
}

fn validate(layout: &Layout<'_>) -> TemplateResult<()> {
    if let Some(system) = layout.system {
        require_text(system, 0)?;
    }
    if let Some(first) = layout.first_user {
        require_text(first, layout.offset - 1)?;
    }

    for (idx, message) in layout.rest.iter().enumerate() {
        let position = layout.offset + idx;
        if message.role == Role::ToolCall {
            return Err(TemplateError::UnsupportedRole {
                role: message.role,
                template: TEMPLATE,
                position,
            });
        }
        if message.has_tool_calls() {
            if message.tool_calls.len() != 1 {
                return Err(TemplateError::MultipleToolCalls {
                    position,
                    count: message.tool_calls.len(),
                });
            }
        } else {
            require_text(message, position)?;
        }
    }
    Ok(())
}

pub(crate) fn render(messages: &[Message], options: &RenderOptions) -> TemplateResult<String> {
    let layout = layout(messages, options)?;
    validate(&layout)?;

    let tools = options.tools();
    let builtin_tools = options.builtin_tools.as_deref();

    let mut out = String::from(BEGIN_OF_TEXT);
    out.push_str(&header("system"));
    if builtin_tools.is_some() || tools.is_some() {
        out.push_str("Environment: ipython\n");
    }
    if let Some(builtin) = builtin_tools {
        let names: Vec<&str> = builtin
            .iter()
            .map(String::as_str)
            .filter(|name| *name != CODE_INTERPRETER)
            .collect();
        out.push_str("Tools: ");
        out.push_str(&names.join(", "));
        out.push_str("\n\n");
    }
    out.push_str("Cutting Knowledge Date: December 2023\n");
    out.push_str("Today Date: ");
    out.push_str(options.date_string());
    out.push_str("\n\n");

    if let Some(tools) = tools.filter(|_| !options.tools_in_user_message) {
        out.push_str(
            "You have access to the following functions. To call a function, please respond with JSON for a function call.",
        );
        out.push_str(RESPOND_FORMAT);
        push_tools(&mut out, tools)?;
    }
    out.push_str(layout.system.map_or("", |m| m.text_or_empty().trim()));
    out.push_str(EOT);

    if let (Some(first), Some(tools)) = (layout.first_user, tools) {
        out.push_str(&header("user"));
        out.push_str("Given the following functions, please respond with a JSON for a function call ");
        out.push_str("with its proper arguments that best answers the given prompt.\n\n");
        out.push_str(RESPOND_FORMAT);
        push_tools(&mut out, tools)?;
        out.push_str(first.text_or_empty().trim());
        out.push_str(EOT);
        if layout.rest.is_empty() {
            out.push_str(&header("assistant"));
        }
    }

    let last = layout.rest.len().saturating_sub(1);
    for (idx, message) in layout.rest.iter().enumerate() {
        if let Some(call) = message.tool_calls.first() {
            out.push_str(&header("assistant"));
            out.push_str(PYTHON_TAG);
            push_tool_call(&mut out, call, builtin_tools)?;
            out.push_str(if builtin_tools.is_some() { EOM } else { EOT });
        } else if message.role == Role::Tool {
            out.push_str(&header("ipython"));
            out.push_str("{\"output\": \"");
            out.push_str(message.text_or_empty());
            out.push_str("\"}");
            out.push_str(EOT);
        } else {
            let role = match message.role {
                Role::Ai => "assistant",
                Role::Human => "user",
                Role::Function => "function",
                _ => "system",
            };
            out.push_str(&header(role));
            out.push_str(message.text_or_empty().trim());
            if !(message.role == Role::Ai && idx == last) {
                out.push_str(EOT);
            }
        }

        if idx == last && message.role != Role::Ai {
            out.push_str(&header("assistant"));
            if options.force_tool_call {
                out.push_str(PYTHON_TAG);
            }
        }
    }

    Ok(out)
}

fn push_tools(out: &mut String, tools: &[ToolDefinition]) -> TemplateResult<()> {
    for tool in tools {
        out.push_str(&tojson_pretty(&tool.to_openai_value())?);
        out.push_str("\n\n");
    }
    Ok(())
}

/// Built-in tools use `name.call(arg="value", ...)`; custom tools use JSON.
fn push_tool_call(
    out: &mut String,
    call: &ToolCallRequest,
    builtin_tools: Option<&[String]>,
) -> TemplateResult<()> {
    let is_builtin = builtin_tools.map_or(false, |names| names.iter().any(|n| *n == call.name));
    if !is_builtin {
        out.push_str("{\"name\": \"");
        out.push_str(&call.name);
        out.push_str("\", \"parameters\": ");
        out.push_str(&tojson(&call.arguments_value())?);
        out.push('}');
        return Ok(());
    }

    let mut args = Vec::with_capacity(call.arguments.len());
    for (name, value) in &call.arguments {
        let value = match value {
            Value::String(s) => s.clone(),
            other => dumps(other)?,
        };
        args.push(format!("{}=\"{}\"", name, value));
    }
    out.push_str(&call.name);
    out.push_str(".call(");
    out.push_str(&args.join(", "));
    out.push(')');
    Ok(())
}
