//! TOML configuration parsing and management.

use crate::schema::{schema_for, ChatSchema, RenderOptions, TemplateError};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Model used when nothing else is selected.
pub const DEFAULT_MODEL: &str = "meta-llama/llama-3-1-70b-instruct";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// `[render]` section
    #[serde(default)]
    pub render: RenderConfig,
    /// `[models]` section
    #[serde(default)]
    pub models: ModelsConfig,
    /// `[logging]` section
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Render defaults applied to every prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Llama header date
    pub date_string: Option<String>,
    /// Put tool definitions in the first user message
    #[serde(default)]
    pub tools_in_user_message: bool,
    /// Leave an open assistant turn at the end
    #[serde(default = "default_add_generation_prompt")]
    pub add_generation_prompt: bool,
    /// Llama 3.1 built-in tools
    pub builtin_tools: Option<Vec<String>>,
}

fn default_add_generation_prompt() -> bool {
    true
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            date_string: None,
            tools_in_user_message: false,
            add_generation_prompt: true,
            builtin_tools: None,
        }
    }
}

impl RenderConfig {
    /// Render options carrying these defaults; tools are added per request.
    pub fn to_options(&self) -> RenderOptions {
        let mut options = RenderOptions::new()
            .with_tools_in_user_message(self.tools_in_user_message)
            .with_add_generation_prompt(self.add_generation_prompt);
        if let Some(date) = &self.date_string {
            options = options.with_date_string(date.clone());
        }
        if let Some(builtin) = &self.builtin_tools {
            options = options.with_builtin_tools(builtin.iter().cloned());
        }
        options
    }
}

/// Model selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Model used when none is named
    #[serde(default = "default_model")]
    pub default_model: String,
    /// Short names mapped to hosted model identifiers
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            default_model: default_model(),
            aliases: HashMap::new(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Markdown log path
    #[serde(default = "default_log_file")]
    pub log_file: String,
    /// Log level name
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_file() -> String {
    std::env::temp_dir()
        .join("pfk")
        .join(format!("pfk_{}.md", std::process::id()))
        .to_string_lossy()
        .to_string()
}

fn default_log_level() -> String {
    "INFO".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            log_level: default_log_level(),
        }
    }
}

/// Loads and manages TOML configuration.
#[derive(Debug)]
pub struct ConfigurationLoader {
    /// Path the configuration was (or would have been) read from
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: Configuration,
}

impl ConfigurationLoader {
    /// Initialize configuration loader.
    ///
    /// # Arguments
    /// * `config_path` - Path to TOML config file. If None or missing, uses default config.
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config_path = config_path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("config/pfk.toml"));

        let config = if config_path.exists() {
            Self::load_config(&config_path)?
        } else {
            debug!(
                target: "pfk::config",
                "No config file at {}, using defaults", config_path.display()
            );
            Configuration::default()
        };

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Create a configuration loader from a pre-parsed Configuration.
    pub fn from_config(config: Configuration) -> Self {
        Self {
            config_path: PathBuf::from("config/pfk.toml"),
            config,
        }
    }

    /// Load configuration from TOML file.
    fn load_config(path: &Path) -> Result<Configuration> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
    }

    /// Resolve a model name, alias or the configured default to its schema.
    pub fn resolve_schema(&self, name: Option<&str>) -> Result<&'static ChatSchema> {
        let name = name.unwrap_or(&self.config.models.default_model);
        let model_id = self
            .config
            .models
            .aliases
            .get(name)
            .map(String::as_str)
            .unwrap_or(name);

        schema_for(model_id)
            .ok_or_else(|| TemplateError::UnknownModel(model_id.to_string()))
            .with_context(|| format!("Failed to resolve model '{}'", name))
    }

    /// Render options from the `[render]` section.
    pub fn render_options(&self) -> RenderOptions {
        self.config.render.to_options()
    }

    /// Get configuration value by dot-notation key.
    pub fn get_string(&self, key: &str) -> Option<String> {
        match key {
            "render.date_string" => self.config.render.date_string.clone(),
            "models.default_model" => Some(self.config.models.default_model.clone()),
            "logging.log_file" => Some(self.config.logging.log_file.clone()),
            "logging.log_level" => Some(self.config.logging.log_level.clone()),
            _ => None,
        }
    }

    /// Get boolean configuration value.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match key {
            "render.tools_in_user_message" => Some(self.config.render.tools_in_user_message),
            "render.add_generation_prompt" => Some(self.config.render.add_generation_prompt),
            _ => None,
        }
    }
}
