//! Markdown log of rendered prompts and parsed model output.

#[cfg(feature = "config")]
use crate::config::LoggingConfig;
use crate::message::Message;
use crate::parser::ParsedOutput;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Logger for prompt rendering and parsing sessions.
///
/// Entries are appended to a markdown file: one section per session, with a
/// sub-section for every rendered prompt, parsed completion and error.
#[derive(Debug)]
pub struct Logger {
    log_file: PathBuf,
    log_level: String,
}

impl Logger {
    /// Initialize logger.
    ///
    /// # Arguments
    /// * `log_file` - Path to log file. If None, creates a timestamped file in temp directory.
    /// * `log_level` - Logging level (defaults to "INFO"). At "DEBUG" the input
    ///   messages of every render are included.
    pub fn new(log_file: Option<&Path>, log_level: Option<&str>) -> Result<Self> {
        let log_file = match log_file {
            Some(p) => p.to_path_buf(),
            None => std::env::temp_dir().join("pfk-logs").join(format!(
                "pfk_{}_{}.md",
                Utc::now().timestamp_millis(),
                std::process::id()
            )),
        };

        if let Some(parent) = log_file.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }

        let logger = Self {
            log_file,
            log_level: log_level.unwrap_or("INFO").to_uppercase(),
        };

        if !logger.log_file.exists() {
            logger.initialize_log_file()?;
        }

        Ok(logger)
    }

    /// Initialize a logger from the `[logging]` section of a configuration file.
    #[cfg(feature = "config")]
    pub fn from_config(config: &LoggingConfig) -> Result<Self> {
        Self::new(Some(Path::new(&config.log_file)), Some(&config.log_level))
    }

    fn initialize_log_file(&self) -> Result<()> {
        let mut file = File::create(&self.log_file)
            .with_context(|| format!("Failed to create log file: {}", self.log_file.display()))?;

        let now: DateTime<Utc> = Utc::now();

        writeln!(file, "# Prompt Formatting Log\n")?;
        writeln!(file, "Log started: {}\n", now.to_rfc3339())?;
        writeln!(file, "---\n")?;

        Ok(())
    }

    fn append_to_log(&self, content: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file)
            .with_context(|| format!("Failed to open log file: {}", self.log_file.display()))?;

        write!(file, "{}", content).with_context(|| "Failed to write to log file")?;

        Ok(())
    }

    fn is_debug(&self) -> bool {
        self.log_level == "DEBUG"
    }

    /// Log session start.
    ///
    /// # Arguments
    /// * `model_id` - Model the session renders for.
    /// * `config` - Settings in effect.
    pub fn log_session_start(
        &self,
        model_id: &str,
        config: &HashMap<String, serde_json::Value>,
    ) -> Result<()> {
        let now: DateTime<Utc> = Utc::now();
        let config = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
        let content = format!(
            "## Session Started - {}\n\n**Model:** {}\n**Config:** {}\n\n",
            now.to_rfc3339(),
            model_id,
            config
        );

        self.append_to_log(&content)?;
        info!(target: "pfk::observability", "Session started for {}", model_id);
        Ok(())
    }

    /// Log a rendered prompt.
    pub fn log_render(&self, model_id: &str, messages: &[Message], prompt: &str) -> Result<()> {
        let now: DateTime<Utc> = Utc::now();
        let mut content = format!(
            "### Prompt Rendered - {}\n\n**Model:** {}\n**Messages:** {}\n\n",
            now.to_rfc3339(),
            model_id,
            messages.len()
        );

        if self.is_debug() {
            let messages =
                serde_json::to_string_pretty(messages).context("Failed to serialize messages")?;
            content.push_str(&format!("```json\n{}\n```\n\n", messages));
        }
        content.push_str(&format!("**Prompt:**\n```\n{}\n```\n\n", prompt));

        self.append_to_log(&content)
    }

    /// Log a raw completion and what it parsed to.
    pub fn log_parse(&self, model_id: &str, raw: &str, outcome: &ParsedOutput) -> Result<()> {
        let now: DateTime<Utc> = Utc::now();
        let outcome = match outcome {
            ParsedOutput::Text(_) => "text".to_string(),
            ParsedOutput::ToolCalls(calls) => {
                let calls =
                    serde_json::to_string_pretty(calls).context("Failed to serialize tool calls")?;
                format!("tool calls\n```json\n{}\n```", calls)
            }
        };
        let content = format!(
            "### Output Parsed - {}\n\n**Model:** {}\n**Raw:**\n```\n{}\n```\n\n**Outcome:** {}\n\n",
            now.to_rfc3339(),
            model_id,
            raw,
            outcome
        );

        self.append_to_log(&content)
    }

    /// Log error with context.
    ///
    /// # Arguments
    /// * `error` - Error message.
    /// * `context` - Additional context information.
    pub fn log_error(
        &self,
        error: &str,
        context: Option<&HashMap<String, serde_json::Value>>,
    ) -> Result<()> {
        let now: DateTime<Utc> = Utc::now();
        let mut content = format!(
            "### Error - {}\n\n**Error:** {}\n\n",
            now.to_rfc3339(),
            error
        );

        if let Some(ctx) = context {
            let ctx = serde_json::to_string_pretty(ctx).context("Failed to serialize context")?;
            content.push_str(&format!("**Context:** {}\n\n", ctx));
        }

        self.append_to_log(&content)?;
        error!(target: "pfk::observability", "{}", error);
        Ok(())
    }

    /// Log session completion.
    pub fn log_completion(&self, reason: &str) -> Result<()> {
        let now: DateTime<Utc> = Utc::now();
        let content = format!(
            "### Session Completed - {}\n\n**Reason:** {}\n\n---\n\n",
            now.to_rfc3339(),
            reason
        );

        self.append_to_log(&content)?;
        info!(target: "pfk::observability", "Session completed: {}", reason);
        Ok(())
    }

    /// Get the log file path.
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    /// Get the log level.
    pub fn log_level(&self) -> &str {
        &self.log_level
    }
}

#[cfg(test)]
mod tests;
