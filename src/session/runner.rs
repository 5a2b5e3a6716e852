//! Conversation state for one chat process
//!
//! [`ChatSession`] owns the message list, the session model and topic, and
//! the session file path. A turn is two calls: [`ChatSession::send`]
//! appends the user message and the model reply, then
//! [`ChatSession::persist`] names the session (once) and writes the file.

use std::path::{Path, PathBuf};

use chrono::Local;

use crate::config::ChatConfig;
use crate::error::{CastLlmError, Result};
use crate::providers::{Message, Provider};
use crate::session::naming::{session_file_name, summary_request};
use crate::session::store::SessionRecord;

/// Messages needed before a session is saved or named
pub const PERSIST_THRESHOLD: usize = 3;

/// Result of [`ChatSession::persist`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persisted {
    /// Fewer than [`PERSIST_THRESHOLD`] messages, nothing written
    Skipped,
    /// The session file was (re)written
    Saved {
        /// File that was written
        path: PathBuf,
        /// Topic generated by this call, if the session was named just now
        named_topic: Option<String>,
    },
}

/// A running chat session
pub struct ChatSession {
    provider: Box<dyn Provider>,
    settings: ChatConfig,
    record: SessionRecord,
    path: Option<PathBuf>,
    /// Number of messages the session file held after the last load or save
    saved_len: usize,
}

impl ChatSession {
    /// Start a new session seeded with the configured system message
    ///
    /// # Examples
    ///
    /// ```
    /// use castllm::config::ChatConfig;
    /// use castllm::providers::fake::ScriptedProvider;
    /// use castllm::session::ChatSession;
    ///
    /// let session = ChatSession::new(Box::new(ScriptedProvider::new()), ChatConfig::default());
    /// assert_eq!(session.messages().len(), 1);
    /// assert!(session.path().is_none());
    /// ```
    pub fn new(provider: Box<dyn Provider>, settings: ChatConfig) -> Self {
        let mut record = SessionRecord::new(settings.model.clone());
        record
            .messages
            .push(Message::system(settings.system_prompt.clone()));

        tracing::info!("Starting new session with model {}", record.model);

        Self {
            provider,
            settings,
            record,
            path: None,
            saved_len: 0,
        }
    }

    /// Resume a session from an existing file
    ///
    /// The file path becomes the session path for the rest of the process,
    /// so the session is never renamed. The model stored in the file is
    /// kept. A file with no messages is seeded with the system message.
    ///
    /// # Errors
    ///
    /// Returns error if the file is missing or is not a session file
    pub fn resume(
        provider: Box<dyn Provider>,
        settings: ChatConfig,
        path: impl AsRef<Path>,
    ) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut record = SessionRecord::load(&path)?;
        let saved_len = record.messages.len();

        if record.messages.is_empty() {
            record
                .messages
                .push(Message::system(settings.system_prompt.clone()));
        }

        Ok(Self {
            provider,
            settings,
            record,
            path: Some(path),
            saved_len,
        })
    }

    /// Model used for ordinary turns
    pub fn model(&self) -> &str {
        &self.record.model
    }

    /// Session topic, if named or loaded
    pub fn topic(&self) -> Option<&str> {
        self.record.topic.as_deref()
    }

    /// Conversation so far
    pub fn messages(&self) -> &[Message] {
        &self.record.messages
    }

    /// Session file path, once established
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether the session file holds every message in memory
    ///
    /// False before the first save, and between a reply arriving and the
    /// following [`ChatSession::persist`].
    pub fn is_saved(&self) -> bool {
        self.path.is_some() && self.saved_len == self.record.messages.len()
    }

    /// Send one user message and return the model reply
    ///
    /// Both messages are appended to the conversation. If the provider
    /// fails, the user message is removed again so the conversation never
    /// ends on an unanswered turn, and the error is returned.
    ///
    /// # Errors
    ///
    /// Returns the provider error unchanged
    pub async fn send(&mut self, input: &str) -> Result<String> {
        self.record.messages.push(Message::user(input));

        tracing::debug!(
            "Sending turn: model={}, {} messages",
            self.record.model,
            self.record.messages.len()
        );

        match self
            .provider
            .complete(&self.record.messages, &self.record.model)
            .await
        {
            Ok(response) => {
                let reply = response.message.content;
                self.record.messages.push(Message::assistant(reply.clone()));
                Ok(reply)
            }
            Err(e) => {
                self.record.messages.pop();
                tracing::error!("Turn failed, discarding pending user message: {}", e);
                Err(e)
            }
        }
    }

    /// Save the session if it holds enough messages
    ///
    /// The first save of a new session asks the model for a topic, derives
    /// the file name from it, and creates the sessions directory. Later
    /// saves reuse that path.
    ///
    /// # Errors
    ///
    /// Returns error if the summarization call or the write fails
    pub async fn persist(&mut self) -> Result<Persisted> {
        if self.record.messages.len() < PERSIST_THRESHOLD {
            return Ok(Persisted::Skipped);
        }

        let mut named_topic = None;
        let path = match self.path.clone() {
            Some(path) => path,
            None => {
                let topic = self.name_topic().await?;
                let file_name = session_file_name(&topic, Local::now().naive_local());
                let path = self.settings.sessions_dir.join(file_name);

                std::fs::create_dir_all(&self.settings.sessions_dir)?;

                tracing::info!("Named session {:?}, saving to {}", topic, path.display());
                self.record.topic = Some(topic.clone());
                self.path = Some(path.clone());
                named_topic = Some(topic);
                path
            }
        };

        self.record.save(&path)?;
        self.saved_len = self.record.messages.len();

        Ok(Persisted::Saved { path, named_topic })
    }

    async fn name_topic(&self) -> Result<String> {
        let (first_user, first_reply) = match &self.record.messages[..] {
            [_, user, reply, ..] => (user, reply),
            _ => {
                return Err(CastLlmError::Session(
                    "Cannot name a session before the first exchange".to_string(),
                )
                .into())
            }
        };

        let request = summary_request(
            &self.settings.system_prompt,
            first_user,
            first_reply,
            &self.settings.summary_prompt,
        );

        let response = self
            .provider
            .complete(&request, &self.settings.summary_model)
            .await?;

        Ok(response.message.content.trim().to_string())
    }
}
