//! kiteutil - helpers for the container image manager
//!
//! Entry point for the command-line interface.

mod cli;

use clap::Parser;
use cli::Args;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging; RUST_LOG overrides the default level
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    cli::run(args.command).await
}
