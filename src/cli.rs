//! Command-line interface definition for castllm
//!
//! This module defines the CLI structure using clap's derive API.

use clap::Parser;
use std::path::PathBuf;

/// castllm - chat with a large language model from the terminal
///
/// Conversations are saved as JSON files named after a short,
/// model-generated topic and can be resumed later.
#[derive(Parser, Debug, Clone)]
#[command(name = "castllm")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Load a previous chat session from a file
    #[arg(long = "load-session", value_name = "PATH")]
    pub load_session: Option<PathBuf>,

    /// Model to use for the conversation (e.g. gpt-3.5-turbo or gpt-4)
    #[arg(long = "use", value_name = "MODEL")]
    pub model: Option<String>,

    /// Path to configuration file
    #[arg(short, long, default_value = "config/castllm.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            load_session: None,
            model: None,
            config: Some("config/castllm.yaml".to_string()),
            verbose: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default() {
        let cli = Cli::default();
        assert_eq!(cli.config, Some("config/castllm.yaml".to_string()));
        assert!(cli.load_session.is_none());
        assert!(cli.model.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::try_parse_from(["castllm"]).unwrap();
        assert!(cli.load_session.is_none());
        assert!(cli.model.is_none());
        assert_eq!(cli.config, Some("config/castllm.yaml".to_string()));
    }

    #[test]
    fn test_cli_parse_load_session() {
        let cli = Cli::try_parse_from(["castllm", "--load-session", "sessions/foo.json"]).unwrap();
        assert_eq!(cli.load_session, Some(PathBuf::from("sessions/foo.json")));
    }

    #[test]
    fn test_cli_parse_use_model() {
        let cli = Cli::try_parse_from(["castllm", "--use", "gpt-4"]).unwrap();
        assert_eq!(cli.model, Some("gpt-4".to_string()));
    }

    #[test]
    fn test_cli_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "castllm",
            "--load-session",
            "a.json",
            "--use",
            "gpt-4",
            "--config",
            "custom.yaml",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.load_session, Some(PathBuf::from("a.json")));
        assert_eq!(cli.model, Some("gpt-4".to_string()));
        assert_eq!(cli.config, Some("custom.yaml".to_string()));
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_rejects_missing_value() {
        let result = Cli::try_parse_from(["castllm", "--use"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_flag() {
        let result = Cli::try_parse_from(["castllm", "--stream"]);
        assert!(result.is_err());
    }
}
