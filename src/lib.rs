//! castllm - command-line chat client library
//!
//! This library provides the pieces behind the `castllm` binary: a
//! chat-completion provider abstraction, JSON session files that are
//! auto-named from a model-generated topic, and the interactive loop.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `providers`: Provider trait, OpenAI-compatible client, scripted test double
//! - `session`: Conversation state, session files, topic naming, display
//! - `commands`: Interactive chat loop
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use castllm::config::Config;
//! use castllm::providers::create_provider;
//! use castllm::session::ChatSession;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/castllm.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let provider = create_provider(&config.provider, Config::api_key()?)?;
//!     let mut session = ChatSession::new(provider, config.chat);
//!     let reply = session.send("Hello").await?;
//!     println!("{}", reply);
//!     session.persist().await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod providers;
pub mod session;

// Re-export commonly used types
pub use config::Config;
pub use error::{CastLlmError, Result};
pub use session::{ChatSession, SessionRecord};

#[cfg(test)]
pub mod test_utils;
