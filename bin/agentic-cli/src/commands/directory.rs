//! Cross-chain directory subcommands.

use agentic_core::EnhancedCardanoClient;
use agentic_directory::Network;
use eyre::Result;

use crate::output::OutputFormat;

/// Cross-chain directory subcommands.
#[derive(Debug, clap::Subcommand)]
pub enum DirectoryCommand {
    /// Advertise an agent on one or more external networks.
    Register {
        /// The agent id to advertise.
        #[arg(long)]
        agent_id: String,
        /// Comma-separated list of networks (e.g. ethereum,polygon).
        #[arg(long, value_delimiter = ',')]
        networks: Vec<Network>,
    },
}

/// Run a Directory subcommand.
pub(crate) async fn run(
    cmd: DirectoryCommand,
    client: &EnhancedCardanoClient,
    output: OutputFormat,
) -> Result<()> {
    match cmd {
        DirectoryCommand::Register { agent_id, networks } => {
            let result = client
                .register_cross_chain_service(&agent_id, networks)
                .await
                .map_err(|e| eyre::eyre!("{e}"))?;
            crate::output::print_result(&result, output);
            Ok(())
        }
    }
}
