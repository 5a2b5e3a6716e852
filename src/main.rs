//! castllm - chat with a large language model from the terminal
//!
//! Main entry point for the castllm application.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use castllm::cli::Cli;
use castllm::commands;
use castllm::config::{Config, API_KEY_ENV};
use castllm::providers::create_provider;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    // A .env file in the working directory (or a parent) may supply the
    // credential; variables already set in the environment take precedence
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
    }

    // The credential is required before anything else happens
    let api_key = match Config::api_key() {
        Ok(key) => key,
        Err(e) => {
            tracing::debug!("{}", e);
            eprintln!(
                "Please set the {} environment variable or add it to a .env file.",
                API_KEY_ENV
            );
            std::process::exit(1);
        }
    };

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/castllm.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    let provider = create_provider(&config.provider, api_key)?;

    tracing::info!("Starting interactive chat");
    commands::chat::run_chat(config, provider, cli.load_session, cli.model).await
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so they never interleave with the conversation on
/// stdout.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "castllm=debug" } else { "castllm=warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
