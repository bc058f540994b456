//! Configuration of render defaults and model selection.
//!
//! Settings are read from a TOML file; a missing file yields the defaults.
//! Environment variables can be loaded from an explicit `.env` file.
//!
//! # Example
//!
//! ```no_run
//! use pfk::config::{ConfigurationLoader, EnvironmentLoader};
//! use pfk::message::Message;
//! use std::path::Path;
//!
//! let env = EnvironmentLoader::new(None);
//! let loader = ConfigurationLoader::new(Some(Path::new("config/pfk.toml"))).unwrap();
//!
//! let schema = loader.resolve_schema(env.model_id().as_deref()).unwrap();
//! let prompt = schema
//!     .render(&[Message::human("Hello")], &loader.render_options())
//!     .unwrap();
//! println!("{}", prompt);
//! ```

pub mod config;
pub mod environment;

// Re-export main types for convenience
pub use self::config::{
    Configuration, ConfigurationLoader, LoggingConfig, ModelsConfig, RenderConfig, DEFAULT_MODEL,
};
pub use self::environment::EnvironmentLoader;
