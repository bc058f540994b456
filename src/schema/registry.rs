//! Supported hosted models.

use super::{ChatSchema, RenderOptions, TemplateError, TemplateKind, TemplateResult};
use crate::message::Message;
use crate::parser::{parse_granite3_tool_call, parse_llama31_tool_call, parse_mistral_tool_call};
use tracing::debug;

const EOM: &[&str] = &["<|eom_id|>"];

/// Llama 3.1 405B instruct.
pub static LLAMA31_405B: ChatSchema =
    ChatSchema::new("meta-llama/llama-3-405b-instruct", TemplateKind::Llama3)
        .with_tools(parse_llama31_tool_call, EOM);

/// Llama 3.1 70B instruct.
pub static LLAMA31_70B: ChatSchema =
    ChatSchema::new("meta-llama/llama-3-1-70b-instruct", TemplateKind::Llama3)
        .with_tools(parse_llama31_tool_call, EOM);

/// Llama 3.1 8B instruct.
pub static LLAMA31_8B: ChatSchema =
    ChatSchema::new("meta-llama/llama-3-1-8b-instruct", TemplateKind::Llama3)
        .with_tools(parse_llama31_tool_call, EOM);

/// Llama 3 70B instruct.
pub static LLAMA3_70B: ChatSchema =
    ChatSchema::new("meta-llama/llama-3-70b-instruct", TemplateKind::Llama3);

/// Llama 3 8B instruct.
pub static LLAMA3_8B: ChatSchema =
    ChatSchema::new("meta-llama/llama-3-8b-instruct", TemplateKind::Llama3);

/// Mistral Large.
pub static MISTRAL_LARGE: ChatSchema = ChatSchema::new("mistralai/mistral-large", TemplateKind::Mistral)
    .with_tools(parse_mistral_tool_call, &[]);

/// Mixtral 8x7B instruct v0.1.
pub static MIXTRAL_8X7B_V01: ChatSchema =
    ChatSchema::new("mistralai/mixtral-8x7b-instruct-v01", TemplateKind::Mistral);

/// Granite 3 8B instruct.
pub static GRANITE_3_8B_INSTRUCT: ChatSchema =
    ChatSchema::new("ibm/granite-3-8b-instruct", TemplateKind::Granite3)
        .with_tools(parse_granite3_tool_call, EOM);

/// Granite 13B chat v2.
pub static GRANITE_13B_CHAT_V2: ChatSchema =
    ChatSchema::new("ibm/granite-13b-chat-v2", TemplateKind::Granite);

static MODELS: [&ChatSchema; 9] = [
    &LLAMA31_405B,
    &LLAMA31_70B,
    &LLAMA31_8B,
    &LLAMA3_70B,
    &LLAMA3_8B,
    &MISTRAL_LARGE,
    &MIXTRAL_8X7B_V01,
    &GRANITE_3_8B_INSTRUCT,
    &GRANITE_13B_CHAT_V2,
];

/// Look up the schema of a hosted model.
pub fn schema_for(model_id: &str) -> Option<&'static ChatSchema> {
    let schema = MODELS.iter().copied().find(|schema| schema.model_id == model_id);
    if schema.is_none() {
        debug!(target: "pfk::schema", "No chat schema registered for {}", model_id);
    }
    schema
}

/// Identifiers of every supported model.
pub fn supported_models() -> impl Iterator<Item = &'static str> {
    MODELS.iter().map(|schema| schema.model_id)
}

/// Render `messages` for the model named `model_id`.
pub fn render_for_model(
    model_id: &str,
    messages: &[Message],
    options: &RenderOptions,
) -> TemplateResult<String> {
    schema_for(model_id)
        .ok_or_else(|| TemplateError::UnknownModel(model_id.to_string()))?
        .render(messages, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let schema = schema_for("mistralai/mistral-large").unwrap();
        assert_eq!(schema.template, TemplateKind::Mistral);
        assert!(schema.supports_tools());

        let schema = schema_for("mistralai/mixtral-8x7b-instruct-v01").unwrap();
        assert!(!schema.supports_tools());

        assert!(schema_for("openai/gpt-4").is_none());
    }

    #[test]
    fn test_supported_models() {
        let models: Vec<&str> = supported_models().collect();
        assert_eq!(models.len(), 9);
        assert!(models.contains(&"ibm/granite-3-8b-instruct"));
        assert!(models.contains(&"meta-llama/llama-3-405b-instruct"));
    }

    #[test]
    fn test_tool_support_matches_model_generation() {
        let with_tools: Vec<&str> = MODELS
            .iter()
            .filter(|schema| schema.supports_tools())
            .map(|schema| schema.model_id)
            .collect();
        assert_eq!(
            with_tools,
            [
                "meta-llama/llama-3-405b-instruct",
                "meta-llama/llama-3-1-70b-instruct",
                "meta-llama/llama-3-1-8b-instruct",
                "mistralai/mistral-large",
                "ibm/granite-3-8b-instruct",
            ]
        );
    }

    #[test]
    fn test_render_for_unknown_model() {
        let err = render_for_model("acme/unknown", &[Message::human("Hi")], &RenderOptions::new())
            .unwrap_err();
        assert_eq!(err, TemplateError::UnknownModel("acme/unknown".to_string()));
    }
}
