//! Configuration management for castllm
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.
//! The API credential is never read from the config file; it comes from
//! the `CASTLLM_OPENAI_KEY` environment variable only.

use crate::error::{CastLlmError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the API credential
pub const API_KEY_ENV: &str = "CASTLLM_OPENAI_KEY";

/// Model used when neither the CLI, the environment nor a session file names one
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Main configuration structure for castllm
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Remote API settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Conversation and session settings
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Remote chat-completion API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of an OpenAI-compatible API (e.g. `https://api.openai.com/v1`)
    ///
    /// Requests are sent to `{api_base}/chat/completions`. Tests point this
    /// at a mock server.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
        }
    }
}

/// Chat session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Model for ordinary turns of a new session
    #[serde(default = "default_model")]
    pub model: String,

    /// Model forced for the one-off topic summarization call
    #[serde(default = "default_model")]
    pub summary_model: String,

    /// System message that opens every new conversation
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Instruction appended to the summarization request
    #[serde(default = "default_summary_prompt")]
    pub summary_prompt: String,

    /// Directory where auto-named session files are written
    #[serde(default = "default_sessions_dir")]
    pub sessions_dir: PathBuf,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_system_prompt() -> String {
    "You are now chatting with ChatGPT.".to_string()
}

fn default_summary_prompt() -> String {
    "Summarize our conversation in 1 to 5 words.".to_string()
}

fn default_sessions_dir() -> PathBuf {
    PathBuf::from("sessions")
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            summary_model: default_model(),
            system_prompt: default_system_prompt(),
            summary_prompt: default_summary_prompt(),
            sessions_dir: default_sessions_dir(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            chat: ChatConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// A missing file is not an error: defaults are used instead.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file
    /// * `cli` - Parsed command line arguments
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::debug!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CastLlmError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| CastLlmError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(api_base) = std::env::var("CASTLLM_API_BASE") {
            self.provider.api_base = api_base;
        }

        if let Ok(model) = std::env::var("CASTLLM_MODEL") {
            self.chat.model = model;
        }

        if let Ok(summary_model) = std::env::var("CASTLLM_SUMMARY_MODEL") {
            self.chat.summary_model = summary_model;
        }

        if let Ok(system_prompt) = std::env::var("CASTLLM_SYSTEM_PROMPT") {
            self.chat.system_prompt = system_prompt;
        }

        if let Ok(sessions_dir) = std::env::var("CASTLLM_SESSIONS_DIR") {
            self.chat.sessions_dir = PathBuf::from(sessions_dir);
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        if let Some(model) = &cli.model {
            tracing::debug!("Using model override from CLI: {}", model);
            self.chat.model = model.clone();
        }
    }

    /// Read the API credential from the environment
    ///
    /// # Errors
    ///
    /// Returns `CastLlmError::MissingCredentials` if the variable is unset or empty
    pub fn api_key() -> Result<String> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(CastLlmError::MissingCredentials(API_KEY_ENV.to_string()).into()),
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        let api_base = self.provider.api_base.trim();
        if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
            return Err(CastLlmError::Config(format!(
                "provider.api_base must be an http(s) URL, got: {}",
                self.provider.api_base
            ))
            .into());
        }

        if self.chat.model.trim().is_empty() {
            return Err(CastLlmError::Config("chat.model cannot be empty".to_string()).into());
        }

        if self.chat.summary_model.trim().is_empty() {
            return Err(
                CastLlmError::Config("chat.summary_model cannot be empty".to_string()).into(),
            );
        }

        if self.chat.system_prompt.trim().is_empty() {
            return Err(
                CastLlmError::Config("chat.system_prompt cannot be empty".to_string()).into(),
            );
        }

        if self.chat.summary_prompt.trim().is_empty() {
            return Err(
                CastLlmError::Config("chat.summary_prompt cannot be empty".to_string()).into(),
            );
        }

        if self.chat.sessions_dir.as_os_str().is_empty() {
            return Err(
                CastLlmError::Config("chat.sessions_dir cannot be empty".to_string()).into(),
            );
        }

        Ok(())
    }
}
