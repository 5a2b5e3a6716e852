//! JSON session files
//!
//! A session file is a single JSON object:
//!
//! ```json
//! {
//!   "model": "gpt-3.5-turbo",
//!   "topic": "Greeting",
//!   "messages": [{"role": "system", "content": "..."}]
//! }
//! ```
//!
//! Files are rewritten wholesale on every save. There is no locking and no
//! write-then-rename step; one process owns one file.

use crate::config::DEFAULT_MODEL;
use crate::error::{CastLlmError, Result};
use crate::providers::Message;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Persisted conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Model used for ordinary turns
    #[serde(default = "default_model")]
    pub model: String,

    /// Short model-generated label, absent until the first exchange is named
    #[serde(default)]
    pub topic: Option<String>,

    /// Conversation in chronological order
    pub messages: Vec<Message>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl SessionRecord {
    /// Create an empty record for the given model
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            topic: None,
            messages: Vec::new(),
        }
    }

    /// Load a session record from a JSON file
    ///
    /// Missing `model` falls back to the default model and missing `topic`
    /// to `None`; `messages` is required.
    ///
    /// # Errors
    ///
    /// Returns `CastLlmError::Session` if the file does not exist or does
    /// not contain a session object, `CastLlmError::Io` for other read errors
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use castllm::session::SessionRecord;
    ///
    /// # fn main() -> castllm::error::Result<()> {
    /// let record = SessionRecord::load("sessions/Greeting-20240102-030405.json")?;
    /// println!("{} messages", record.messages.len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CastLlmError::Session(format!("Session file not found: {}", path.display()))
            } else {
                CastLlmError::Io(e)
            }
        })?;

        let record: SessionRecord = serde_json::from_str(&contents).map_err(|e| {
            CastLlmError::Session(format!("Invalid session file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            "Loaded session {}: model={}, {} messages",
            path.display(),
            record.model,
            record.messages.len()
        );

        Ok(record)
    }

    /// Write the record to `path`, replacing any previous contents
    ///
    /// The parent directory must already exist.
    ///
    /// # Errors
    ///
    /// Returns error if serialization or the write fails
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;

        tracing::debug!(
            "Saved session {} ({} messages)",
            path.display(),
            self.messages.len()
        );

        Ok(())
    }
}
