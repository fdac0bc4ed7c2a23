//! Secret Santa CLI binary.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Initialize tracing subscriber
    // Can be controlled via RUST_LOG environment variable
    // Example: RUST_LOG=secret_santa_core=debug secret-santa plan --roster party.json
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("secret_santa_core=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting secret-santa CLI");

    let cli = Cli::parse();
    cli.execute()?;

    tracing::debug!("secret-santa CLI completed successfully");
    Ok(())
}
