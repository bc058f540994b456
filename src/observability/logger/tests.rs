use super::*;
use crate::message::{Message, ToolCallRequest};
use serde_json::Map;
use std::collections::HashMap;
use tempfile::tempdir;

#[test]
fn test_logger_creation() {
    let temp_dir = tempdir().unwrap();
    let log_path = temp_dir.path().join("test.md");

    let logger = Logger::new(Some(&log_path), Some("debug")).unwrap();
    assert_eq!(logger.log_file(), &log_path);
    assert_eq!(logger.log_level(), "DEBUG");
}

#[test]
fn test_log_file_creation() {
    let temp_dir = tempdir().unwrap();
    let log_path = temp_dir.path().join("logs").join("test.md");

    let _logger = Logger::new(Some(&log_path), None).unwrap();
    assert!(log_path.exists());

    let content = std::fs::read_to_string(&log_path).unwrap();
    assert!(content.contains("# Prompt Formatting Log"));
    assert!(content.contains("Log started:"));
}

#[test]
fn test_session_entries() {
    let temp_dir = tempdir().unwrap();
    let log_path = temp_dir.path().join("test.md");
    let logger = Logger::new(Some(&log_path), None).unwrap();

    let mut config = HashMap::new();
    config.insert("force_tool_call".to_string(), serde_json::Value::Bool(true));

    logger
        .log_session_start("meta-llama/llama-3-1-8b-instruct", &config)
        .unwrap();
    logger
        .log_render(
            "meta-llama/llama-3-1-8b-instruct",
            &[Message::human("Hello")],
            "<|begin_of_text|>...",
        )
        .unwrap();
    logger
        .log_parse(
            "meta-llama/llama-3-1-8b-instruct",
            "<|python_tag|>{}",
            &ParsedOutput::ToolCalls(vec![ToolCallRequest::new("get_time", Map::new(), "abcDEF123")]),
        )
        .unwrap();
    logger.log_completion("done").unwrap();

    let content = std::fs::read_to_string(&log_path).unwrap();
    assert!(content.contains("## Session Started"));
    assert!(content.contains("\"force_tool_call\": true"));
    assert!(content.contains("### Prompt Rendered"));
    assert!(content.contains("<|begin_of_text|>..."));
    assert!(content.contains("**Outcome:** tool calls"));
    assert!(content.contains("\"name\": \"get_time\""));
    assert!(content.contains("### Session Completed"));
}

#[test]
fn test_messages_only_logged_at_debug() {
    let temp_dir = tempdir().unwrap();

    let info_path = temp_dir.path().join("info.md");
    let logger = Logger::new(Some(&info_path), None).unwrap();
    logger.log_render("m", &[Message::human("secret question")], "p").unwrap();
    let content = std::fs::read_to_string(&info_path).unwrap();
    assert!(!content.contains("secret question"));

    let debug_path = temp_dir.path().join("debug.md");
    let logger = Logger::new(Some(&debug_path), Some("DEBUG")).unwrap();
    logger.log_render("m", &[Message::human("secret question")], "p").unwrap();
    let content = std::fs::read_to_string(&debug_path).unwrap();
    assert!(content.contains("secret question"));
}

#[test]
fn test_error_logging() {
    let temp_dir = tempdir().unwrap();
    let log_path = temp_dir.path().join("test.md");
    let logger = Logger::new(Some(&log_path), None).unwrap();

    let mut context = HashMap::new();
    context.insert("position".to_string(), serde_json::json!(2));
    logger
        .log_error("conversation roles must alternate", Some(&context))
        .unwrap();
    logger.log_parse("m", "plain answer", &ParsedOutput::Text("plain answer".into())).unwrap();

    let content = std::fs::read_to_string(&log_path).unwrap();
    assert!(content.contains("**Error:** conversation roles must alternate"));
    assert!(content.contains("\"position\": 2"));
    assert!(content.contains("**Outcome:** text"));
}

#[test]
fn test_existing_log_is_appended() {
    let temp_dir = tempdir().unwrap();
    let log_path = temp_dir.path().join("test.md");

    Logger::new(Some(&log_path), None).unwrap().log_completion("first").unwrap();
    Logger::new(Some(&log_path), None).unwrap().log_completion("second").unwrap();

    let content = std::fs::read_to_string(&log_path).unwrap();
    assert_eq!(content.matches("# Prompt Formatting Log").count(), 1);
    assert!(content.contains("first") && content.contains("second"));
}

#[cfg(feature = "config")]
#[test]
fn test_logger_from_logging_config() {
    let temp_dir = tempdir().unwrap();
    let log_path = temp_dir.path().join("configured").join("pfk.md");
    let config = crate::config::LoggingConfig {
        log_file: log_path.to_string_lossy().to_string(),
        log_level: "debug".to_string(),
    };

    let logger = Logger::from_config(&config).unwrap();
    assert_eq!(logger.log_file(), log_path.as_path());
    assert_eq!(logger.log_level(), "DEBUG");

    logger.log_render("m", &[Message::human("Hi")], "prompt").unwrap();
    let content = std::fs::read_to_string(&log_path).unwrap();
    assert!(content.contains("Hi"));
}
