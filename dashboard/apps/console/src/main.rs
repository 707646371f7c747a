//! Admin Console Entry Point
//!
//! Loads configuration, builds the admin client and dispatches one command.
//! Uses `anyhow` for startup errors, but command errors are
//! `kernel::error::AppError` and are reported with their suggested action.

mod cli;
mod commands;

use std::process::ExitCode;

use admin::{AdminClient, AdminConfig, AppError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing; logs go to stderr so command output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "console=info,admin=info,platform=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse_args();

    let config = AdminConfig::from_env()?;
    tracing::debug!(api_url = %config.api_url, "Configuration loaded");

    let client = match AdminClient::from_config(config) {
        Ok(client) => client,
        Err(e) => {
            commands::report(&AppError::from(e));
            return Ok(ExitCode::FAILURE);
        }
    };

    let outcome = commands::run(&client, cli).await;
    client.dispose();

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            commands::report(&e);
            Ok(ExitCode::FAILURE)
        }
    }
}
