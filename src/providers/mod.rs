//! Provider module for castllm
//!
//! This module contains the chat-completion provider abstraction, the
//! OpenAI-compatible HTTP implementation, and a scripted test double.

pub mod base;
pub mod fake;
pub mod openai;

pub use base::{CompletionResponse, Message, Provider, Role, TokenUsage};
pub use openai::OpenAiProvider;

use crate::config::ProviderConfig;
use crate::error::Result;

/// Create the provider used by the interactive chat
///
/// # Arguments
///
/// * `config` - Provider configuration
/// * `api_key` - API credential sent as a bearer token
///
/// # Errors
///
/// Returns error if the HTTP client cannot be initialized
pub fn create_provider(config: &ProviderConfig, api_key: String) -> Result<Box<dyn Provider>> {
    Ok(Box::new(OpenAiProvider::new(config.clone(), api_key)?))
}
