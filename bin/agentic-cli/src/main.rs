//! Agentic CLI — command-line interface for the agentic marketplace core.

use std::path::PathBuf;

use agentic_core::{Config, EnhancedCardanoClient};
use clap::Parser;
use eyre::Result;

mod commands;
mod output;

use commands::{directory, escrow, registry, revenue};
use output::OutputFormat;

/// Agentic marketplace core command-line interface.
#[derive(Debug, Parser)]
#[command(name = "agentic-cli", about = "Agentic marketplace core CLI", version)]
pub struct Cli {
    /// Path to a configuration file, layered under environment variables.
    #[arg(long, env = "AGENTIC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format: text or json.
    #[arg(long, global = true, default_value = "json")]
    pub output: OutputFormat,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Registry operations: agent registration and discovery.
    Registry {
        /// Registry subcommand.
        #[command(subcommand)]
        cmd: registry::RegistryCommand,
    },
    /// Escrow operations: service requests, settlement, and disputes.
    Escrow {
        /// Escrow subcommand.
        #[command(subcommand)]
        cmd: escrow::EscrowCommand,
    },
    /// Revenue operations: participation, distribution, and claims.
    Revenue {
        /// Revenue subcommand.
        #[command(subcommand)]
        cmd: revenue::RevenueCommand,
    },
    /// Cross-chain directory operations.
    Directory {
        /// Directory subcommand.
        #[command(subcommand)]
        cmd: directory::DirectoryCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install the default rustls CryptoProvider (aws-lc-rs) before any TLS connections.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).map_err(|e| eyre::eyre!("{e}"))?;
    let client = EnhancedCardanoClient::new(config);
    client.start().await.map_err(|e| eyre::eyre!("{e}"))?;

    let result = match cli.command {
        Command::Registry { cmd } => registry::run(cmd, &client, cli.output).await,
        Command::Escrow { cmd } => escrow::run(cmd, &client, cli.output).await,
        Command::Revenue { cmd } => revenue::run(cmd, &client, cli.output).await,
        Command::Directory { cmd } => directory::run(cmd, &client, cli.output).await,
    };

    client.shutdown().await.map_err(|e| eyre::eyre!("{e}"))?;
    result
}
