//! OpenAI-compatible chat-completion provider
//!
//! Sends the whole conversation to `{api_base}/chat/completions` and returns
//! the first choice's message. Works against api.openai.com and any server
//! exposing the same endpoint.

use crate::config::ProviderConfig;
use crate::error::{CastLlmError, Result};
use crate::providers::{CompletionResponse, Message, Provider, TokenUsage};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// OpenAI API provider
///
/// # Examples
///
/// ```no_run
/// use castllm::config::ProviderConfig;
/// use castllm::providers::{Message, OpenAiProvider, Provider};
///
/// # async fn example() -> castllm::error::Result<()> {
/// let provider = OpenAiProvider::new(ProviderConfig::default(), "sk-...".to_string())?;
/// let completion = provider
///     .complete(&[Message::user("Hello!")], "gpt-3.5-turbo")
///     .await?;
/// println!("{}", completion.message.content);
/// # Ok(())
/// # }
/// ```
pub struct OpenAiProvider {
    client: Client,
    config: ProviderConfig,
    api_key: String,
}

/// Request body for /chat/completions
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
}

/// Response body from /chat/completions
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: usize,
    #[serde(default)]
    completion_tokens: usize,
}

impl OpenAiProvider {
    /// Create a new provider instance
    ///
    /// No request timeout is configured; a call waits as long as the
    /// server keeps the connection open.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: ProviderConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("castllm/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CastLlmError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!("Initialized OpenAI provider: api_base={}", config.api_base);

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Get the configured API base URL
    pub fn api_base(&self) -> &str {
        &self.config.api_base
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.api_base.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    async fn complete(&self, messages: &[Message], model: &str) -> Result<CompletionResponse> {
        let request = ChatCompletionRequest { model, messages };

        tracing::debug!(
            "Sending chat completion request: model={}, {} messages",
            model,
            messages.len()
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Chat completion request failed: {}", e);
                CastLlmError::Provider(format!("Chat completion request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("API returned error {}: {}", status, error_text);
            return Err(CastLlmError::Provider(format!(
                "API returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let body: ChatCompletionResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse chat completion response: {}", e);
            CastLlmError::Provider(format!("Failed to parse chat completion response: {}", e))
        })?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                CastLlmError::Provider("Response contained no message content".to_string())
            })?;

        let message = Message::assistant(content);
        let response = match body.usage {
            Some(usage) => CompletionResponse::with_usage(
                message,
                TokenUsage::new(usage.prompt_tokens, usage.completion_tokens),
            ),
            None => CompletionResponse::new(message),
        };

        if let Some(usage) = &response.usage {
            tracing::debug!(
                "Chat completion done: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens,
                usage.completion_tokens
            );
        }

        Ok(response)
    }
}
