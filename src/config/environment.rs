//! Environment variable loading and management.

use std::env;
use std::path::Path;
use tracing::warn;

/// Loads environment variables from .env file and system environment.
#[derive(Debug, Clone)]
pub struct EnvironmentLoader {
    env_file: Option<String>,
}

impl EnvironmentLoader {
    /// Initialize the environment loader.
    ///
    /// # Arguments
    /// * `env_file` - Path to a .env file. Only an explicit path is loaded.
    pub fn new(env_file: Option<&Path>) -> Self {
        if let Some(path) = env_file.filter(|p| p.exists()) {
            if let Err(e) = dotenv::from_path(path) {
                warn!(target: "pfk::config", "Failed to load .env file: {}", e);
            }
        }

        Self {
            env_file: env_file.map(|p| p.to_string_lossy().to_string()),
        }
    }

    /// The .env file this loader was created with.
    pub fn env_file(&self) -> Option<&str> {
        self.env_file.as_deref()
    }

    /// Model selection from `PFK_MODEL_ID`.
    ///
    /// Overrides the configured default model; may be an alias.
    pub fn model_id(&self) -> Option<String> {
        env::var("PFK_MODEL_ID").ok()
    }

    /// Log level from `PFK_LOG_LEVEL`.
    pub fn log_level(&self) -> Option<String> {
        env::var("PFK_LOG_LEVEL").ok()
    }
}

impl Default for EnvironmentLoader {
    fn default() -> Self {
        Self::new(None)
    }
}
