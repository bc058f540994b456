//! Prompt Formatting Kit (PFK) - chat prompts and tool-call parsing for hosted LLMs
//!
//! PFK turns chat conversations into the exact prompt text expected by hosted
//! Llama 3 / 3.1, Mistral / Mixtral and Granite models, and reads tool calls
//! back out of their raw completions:
//!
//! - **`message`** - Canonical roles, messages, tool definitions and tool calls
//! - **`formatter`** - Tag-based chat formatters with same-role run merging
//! - **`schema`** - Per-model prompt templates and the model registry
//! - **`parser`** - Tool-call parsers for each model family
//! - **`config`** - Configuration and environment loading
//! - **`observability`** - Markdown logging of prompts and parsed output
//!
//! # Features
//!
//! The core modules are always available. Enable the others in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! pfk = { version = "0.3", features = ["config"] }
//! # Or enable everything:
//! pfk = { version = "0.3", features = ["all"] }
//! ```
//!
//! # Example: rendering and parsing
//!
//! ```
//! use pfk::message::{Message, ToolDefinition};
//! use pfk::parser::RandomIdGenerator;
//! use pfk::schema::{schema_for, RenderOptions};
//! use serde_json::json;
//!
//! let schema = schema_for("meta-llama/llama-3-1-8b-instruct").unwrap();
//! let options = RenderOptions::new().with_tools(vec![ToolDefinition::new(
//!     "get_weather",
//!     "Get the current weather",
//!     json!({"type": "object", "properties": {"city": {"type": "string"}}}),
//! )]);
//!
//! let prompt = schema
//!     .render(&[Message::human("Weather in Rome?")], &options)
//!     .unwrap();
//! assert!(prompt.ends_with("<|start_header_id|>assistant<|end_header_id|>\n\n"));
//! assert_eq!(schema.stop_sequences(), &["<|eom_id|>"]);
//!
//! let output = schema.parse_output(
//!     r#"<|python_tag|>{"name": "get_weather", "parameters": {"city": "Rome"}}"#,
//!     false,
//!     &RandomIdGenerator,
//! );
//! assert_eq!(output.tool_calls().unwrap()[0].name, "get_weather");
//! ```
//!
//! # Example: Using the config feature
//!
//! ```ignore
//! use pfk::config::{ConfigurationLoader, EnvironmentLoader};
//! use std::path::Path;
//!
//! let env = EnvironmentLoader::new(None);
//! let loader = ConfigurationLoader::new(Some(Path::new("config/pfk.toml"))).unwrap();
//! let schema = loader.resolve_schema(env.model_id().as_deref()).unwrap();
//! println!("Rendering for {}", schema.model_id);
//! ```

#![warn(missing_docs)]

pub mod formatter;
pub mod message;
pub mod parser;
pub mod schema;

/// Configuration management (enabled with the `config` feature)
#[cfg(feature = "config")]
pub mod config;

/// Observability utilities (enabled with the `observability` feature)
#[cfg(feature = "observability")]
pub mod observability;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::formatter::{ChatFormatter, Llama3ChatFormatter, MixtralChatFormatter};
    pub use crate::message::{
        convert_to_messages, Message, Role, ToolCallRequest, ToolDefinition,
    };
    pub use crate::parser::{ParsedOutput, RandomIdGenerator, ToolCallIdGenerator};
    pub use crate::schema::{schema_for, ChatSchema, RenderOptions, TemplateError};

    #[cfg(feature = "config")]
    pub use crate::config::{Configuration, ConfigurationLoader, EnvironmentLoader};

    #[cfg(feature = "observability")]
    pub use crate::observability::Logger;
}
