//! BookChain CLI - bulk-load and query book records on-chain

mod cli;
mod config;
mod runner;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use config::AppConfig;
use runner::App;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Build configuration
    let config = AppConfig::from_cli(&cli);

    // Run the requested command
    App::new(config).run(cli.command).await?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
