//! Metis - Multi-Agent Chat/Orchestration Backend
//!
//! CLI entry point for the Metis server.

#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod cli;
mod server;
mod websocket;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    std::fs::create_dir_all("logs").context("Failed to create logs directory")?;
    let (file_writer, _guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never("logs", "metis.log"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "metis=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .init();

    info!("Starting Metis v{}", env!("CARGO_PKG_VERSION"));

    let cli = cli::Cli::parse();
    cli::run(cli).await
}
