//! Per-model prompt templates.
//!
//! A [`ChatSchema`] ties a hosted model identifier to its prompt template and,
//! for tool-enabled models, to the parser for its tool-call output. Every
//! template first validates the conversation and only then assembles the
//! prompt, so a malformed conversation yields a [`TemplateError`] and never a
//! partial prompt.
//!
//! # Example
//!
//! ```
//! use pfk::message::Message;
//! use pfk::schema::{schema_for, RenderOptions};
//!
//! let schema = schema_for("ibm/granite-13b-chat-v2").unwrap();
//! let prompt = schema
//!     .render(&[Message::human("Hello")], &RenderOptions::new())
//!     .unwrap();
//! assert_eq!(prompt, "<|user|>\nHello\n<|assistant|>");
//! ```

mod error;
mod granite;
mod granite3;
mod json;
mod llama3;
mod mistral;
mod registry;

pub use error::{TemplateError, TemplateResult};
pub use registry::{
    render_for_model, schema_for, supported_models, GRANITE_13B_CHAT_V2, GRANITE_3_8B_INSTRUCT,
    LLAMA31_405B, LLAMA31_70B, LLAMA31_8B, LLAMA3_70B, LLAMA3_8B, MISTRAL_LARGE,
    MIXTRAL_8X7B_V01,
};

use crate::message::{Message, ToolDefinition};
use crate::parser::{ParsedOutput, ToolCallIdGenerator, ToolParser};
use std::fmt;
use tracing::{debug, warn};

/// Default `Today Date` of the Llama system header.
pub const DEFAULT_DATE_STRING: &str = "26 Jul 2024";

/// Inputs to a template besides the messages.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Tool definitions offered to the model.
    pub tools: Option<Vec<ToolDefinition>>,
    /// Leave an open assistant turn at the end (Granite 3).
    pub add_generation_prompt: bool,
    /// Prime the model to answer with a tool call (Llama 3.1).
    pub force_tool_call: bool,
    /// Put tool definitions in the first user message instead of the system header (Llama 3.1).
    pub tools_in_user_message: bool,
    /// `Today Date` of the Llama system header; [`DEFAULT_DATE_STRING`] when unset.
    pub date_string: Option<String>,
    /// Llama 3.1 built-in tools, e.g. `brave_search` or `wolfram_alpha`.
    pub builtin_tools: Option<Vec<String>>,
}

impl RenderOptions {
    /// Create options with no tools and a generation prompt.
    pub fn new() -> Self {
        Self {
            tools: None,
            add_generation_prompt: true,
            force_tool_call: false,
            tools_in_user_message: false,
            date_string: None,
            builtin_tools: None,
        }
    }

    /// Offer tool definitions to the model.
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Set whether a tool call is forced.
    pub fn with_force_tool_call(mut self, force: bool) -> Self {
        self.force_tool_call = force;
        self
    }

    /// Set whether tool definitions go in the first user message.
    pub fn with_tools_in_user_message(mut self, enabled: bool) -> Self {
        self.tools_in_user_message = enabled;
        self
    }

    /// Set whether an open assistant turn is appended.
    pub fn with_add_generation_prompt(mut self, enabled: bool) -> Self {
        self.add_generation_prompt = enabled;
        self
    }

    /// Set the date shown in the Llama system header.
    pub fn with_date_string(mut self, date: impl Into<String>) -> Self {
        self.date_string = Some(date.into());
        self
    }

    /// Enable Llama 3.1 built-in tools.
    pub fn with_builtin_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.builtin_tools = Some(tools.into_iter().map(Into::into).collect());
        self
    }

    /// Tool definitions, or `None` when there are none.
    pub fn tools(&self) -> Option<&[ToolDefinition]> {
        self.tools.as_deref().filter(|tools| !tools.is_empty())
    }

    /// The effective Llama header date.
    pub fn date_string(&self) -> &str {
        self.date_string.as_deref().unwrap_or(DEFAULT_DATE_STRING)
    }

    fn without_tools(&self) -> Self {
        Self {
            tools: None,
            force_tool_call: false,
            builtin_tools: None,
            ..self.clone()
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Prompt format of a model family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// Llama 3 and 3.1 header-based format.
    Llama3,
    /// Mistral / Mixtral `[INST]` format.
    Mistral,
    /// Legacy Granite `<|user|>` format.
    Granite,
    /// Granite 3 `<|start_of_role|>` format.
    Granite3,
}

impl TemplateKind {
    /// Template name used in errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Llama3 => llama3::TEMPLATE,
            Self::Mistral => mistral::TEMPLATE,
            Self::Granite => granite::TEMPLATE,
            Self::Granite3 => granite3::TEMPLATE,
        }
    }

    /// Validate `messages` and render them with this template.
    pub fn render(&self, messages: &[Message], options: &RenderOptions) -> TemplateResult<String> {
        match self {
            Self::Llama3 => llama3::render(messages, options),
            Self::Mistral => mistral::render(messages, options),
            Self::Granite => granite::render(messages, options),
            Self::Granite3 => granite3::render(messages, options),
        }
    }
}

/// Tool-calling capability of a model.
#[derive(Clone, Copy)]
pub struct ToolSupport {
    /// Parser for the model's tool-call output.
    pub parser: ToolParser,
    /// Extra stop sequences to pass to the inference call when tools are enabled.
    pub stop_sequences: &'static [&'static str],
}

impl fmt::Debug for ToolSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolSupport")
            .field("stop_sequences", &self.stop_sequences)
            .finish_non_exhaustive()
    }
}

/// Prompt profile of a hosted model.
///
/// Tool support always comes with a parser: the two are one field.
#[derive(Debug, Clone, Copy)]
pub struct ChatSchema {
    /// Hosted model identifier.
    pub model_id: &'static str,
    /// Prompt format.
    pub template: TemplateKind,
    /// Tool-calling capability, if any.
    pub tool_support: Option<ToolSupport>,
}

impl ChatSchema {
    /// A schema without tool support.
    pub const fn new(model_id: &'static str, template: TemplateKind) -> Self {
        Self {
            model_id,
            template,
            tool_support: None,
        }
    }

    /// Add tool support with the given parser and stop sequences.
    pub const fn with_tools(
        self,
        parser: ToolParser,
        stop_sequences: &'static [&'static str],
    ) -> Self {
        Self {
            tool_support: Some(ToolSupport {
                parser,
                stop_sequences,
            }),
            ..self
        }
    }

    /// Whether the model can call tools.
    pub fn supports_tools(&self) -> bool {
        self.tool_support.is_some()
    }

    /// Render `messages` into this model's prompt.
    ///
    /// Tool options are dropped, with a warning, for models without tool
    /// support.
    pub fn render(&self, messages: &[Message], options: &RenderOptions) -> TemplateResult<String> {
        let wants_tools = options.tools().is_some()
            || options.force_tool_call
            || options.builtin_tools.is_some();
        if wants_tools && !self.supports_tools() {
            warn!(
                target: "pfk::schema",
                "Model {} does not support tools, rendering without them", self.model_id
            );
            return self.template.render(messages, &options.without_tools());
        }

        debug!(
            target: "pfk::schema",
            "Rendering {} messages for {} with the {} template",
            messages.len(),
            self.model_id,
            self.template.name()
        );
        self.template.render(messages, options)
    }

    /// Extra stop sequences for tool-enabled inference; empty without tool support.
    pub fn stop_sequences(&self) -> &'static [&'static str] {
        match self.tool_support {
            Some(support) => support.stop_sequences,
            None => &[],
        }
    }

    /// Parse a raw completion.
    ///
    /// Models without tool support always produce text.
    pub fn parse_output(
        &self,
        text: &str,
        force_tool_call: bool,
        ids: &dyn ToolCallIdGenerator,
    ) -> ParsedOutput {
        match self.tool_support {
            Some(support) => (support.parser)(text, force_tool_call, ids),
            None => ParsedOutput::Text(text.to_string()),
        }
    }
}

/// Plain-text content of `message`, or [`TemplateError::NonTextContent`].
pub(crate) fn require_text(message: &Message, position: usize) -> TemplateResult<&str> {
    message
        .text()
        .ok_or(TemplateError::NonTextContent { position })
}
