//! CLI module for Metis

use clap::{Parser, Subcommand};

/// Metis backend CLI
#[derive(Parser, Debug)]
#[command(name = "metis")]
#[command(about = "Multi-agent chat/orchestration backend")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP/WebSocket server (default)
    Serve,
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Serve) | None => crate::server::run().await,
    }
}
