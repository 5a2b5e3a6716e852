//! Error types for castllm
//!
//! This module defines the error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for castllm operations
///
/// Covers configuration problems, transport failures against the remote
/// chat-completion API, and session file I/O.
#[derive(Error, Debug)]
pub enum CastLlmError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing API credential (environment variable name)
    #[error("Missing credentials: set the {0} environment variable")]
    MissingCredentials(String),

    /// Provider-related errors (API calls, malformed responses)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Session file errors (missing file, unexpected shape)
    #[error("Session error: {0}")]
    Session(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Terminal input errors
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Result type alias for castllm operations
///
/// Uses `anyhow::Error` so callers can attach context while still being
/// able to downcast to [`CastLlmError`].
pub type Result<T> = anyhow::Result<T>;
