//! In-process scripted provider for unit and integration tests
//!
//! [`ScriptedProvider`] replaces the network in tests. Queue replies (or
//! failures) with [`ScriptedProvider::push_reply`] and
//! [`ScriptedProvider::push_error`]; every call to `complete` pops the next
//! entry in order and records the request so tests can assert on the exact
//! messages and model that were sent.
//!
//! # Example
//!
//! ```
//! use castllm::providers::fake::ScriptedProvider;
//! use castllm::providers::{Message, Provider};
//!
//! # tokio_test::block_on(async {
//! let provider = ScriptedProvider::new();
//! provider.push_reply("Hi there");
//!
//! let reply = provider.complete(&[Message::user("Hello")], "gpt-4").await.unwrap();
//! assert_eq!(reply.message.content, "Hi there");
//! assert_eq!(provider.requests()[0].model, "gpt-4");
//! # });
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{CastLlmError, Result};
use crate::providers::{CompletionResponse, Message, Provider};

/// A request observed by [`ScriptedProvider`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Messages sent, in order
    pub messages: Vec<Message>,
    /// Model requested
    pub model: String,
}

#[derive(Debug, Default)]
struct Script {
    replies: VecDeque<std::result::Result<String, String>>,
    requests: Vec<RecordedRequest>,
}

/// Provider that replays queued replies instead of calling an API
///
/// Clones share the same script, so a test can keep a handle after moving
/// a boxed clone into the code under test.
#[derive(Debug, Clone, Default)]
pub struct ScriptedProvider {
    script: Arc<Mutex<Script>>,
}

impl ScriptedProvider {
    /// Create a provider with an empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply
    pub fn push_reply(&self, content: impl Into<String>) {
        if let Ok(mut script) = self.script.lock() {
            script.replies.push_back(Ok(content.into()));
        }
    }

    /// Queue a provider failure
    pub fn push_error(&self, message: impl Into<String>) {
        if let Ok(mut script) = self.script.lock() {
            script.replies.push_back(Err(message.into()));
        }
    }

    /// All requests seen so far, oldest first
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.script
            .lock()
            .map(|script| script.requests.clone())
            .unwrap_or_default()
    }

    /// Number of `complete` calls made so far
    pub fn call_count(&self) -> usize {
        self.script
            .lock()
            .map(|script| script.requests.len())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    async fn complete(&self, messages: &[Message], model: &str) -> Result<CompletionResponse> {
        let next = {
            let mut script = self.script.lock().map_err(|_| {
                CastLlmError::Provider("Scripted provider lock poisoned".to_string())
            })?;
            script.requests.push(RecordedRequest {
                messages: messages.to_vec(),
                model: model.to_string(),
            });
            script.replies.pop_front()
        };

        match next {
            Some(Ok(content)) => Ok(CompletionResponse::new(Message::assistant(content))),
            Some(Err(message)) => Err(CastLlmError::Provider(message).into()),
            None => Err(CastLlmError::Provider("No scripted reply left".to_string()).into()),
        }
    }
}
