//! Markdown logging of prompt sessions.
//!
//! # Example
//!
//! ```no_run
//! use pfk::message::Message;
//! use pfk::observability::Logger;
//! use std::collections::HashMap;
//!
//! let logger = Logger::new(None, Some("DEBUG")).unwrap();
//! logger.log_session_start("mistralai/mistral-large", &HashMap::new()).unwrap();
//! logger
//!     .log_render("mistralai/mistral-large", &[Message::human("Hi")], "<s>[INST] Hi[/INST]")
//!     .unwrap();
//! logger.log_completion("done").unwrap();
//! ```

pub mod logger;

// Re-export main types for convenience
pub use logger::Logger;
