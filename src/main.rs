//! feedback-insights - Customer feedback analysis with AI-written insight reports
//!
//! Entry point for the feedback-insights CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use feedback_insights::cli::{Cli, Commands};
use feedback_insights::config::Settings;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            feedback_insights::cli::commands::print_completions(shell);
        }
        command => {
            // Credentials may live in a local .env file.
            match dotenvy::dotenv() {
                Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
                Err(dotenvy::Error::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => tracing::warn!("Ignoring .env file: {}", err),
            }

            // Load configuration only for runtime commands.
            let settings = Settings::load()?;

            match command {
                Some(Commands::Config(config_cmd)) => {
                    feedback_insights::cli::commands::config_command(&settings, config_cmd)?;
                }
                None => {
                    feedback_insights::cli::commands::analyze(&settings, cli.analyze).await?;
                }
                Some(Commands::Completions { .. }) => unreachable!(),
            }
        }
    }

    Ok(())
}
