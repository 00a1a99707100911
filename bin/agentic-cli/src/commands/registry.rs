//! Registry subcommands: agent registration and discovery.

use std::collections::HashSet;

use agentic_core::EnhancedCardanoClient;
use eyre::Result;
use rust_decimal::Decimal;

use crate::output::OutputFormat;

/// Registry subcommands.
#[derive(Debug, clap::Subcommand)]
pub enum RegistryCommand {
    /// Register a new agent, subject to an on-chain stake check.
    RegisterAgent {
        /// Address of the wallet that owns the agent.
        #[arg(long)]
        owner_address: String,
        /// Unique identifier for the agent.
        #[arg(long)]
        agent_id: String,
        /// URI of an off-chain blob carrying extended agent metadata.
        #[arg(long)]
        metadata_uri: String,
        /// Comma-separated list of declared capabilities.
        #[arg(long, value_delimiter = ',')]
        capabilities: Vec<String>,
        /// Version of the agent framework this agent runs.
        #[arg(long)]
        framework_version: String,
        /// Amount to stake as collateral.
        #[arg(long)]
        stake: Decimal,
    },
    /// Find agents matching capabilities and a minimum reputation.
    FindAgents {
        /// Comma-separated list of required capabilities.
        #[arg(long, value_delimiter = ',')]
        capabilities: Vec<String>,
        /// Minimum effective reputation score.
        #[arg(long, default_value_t = 0.0)]
        min_reputation: f64,
        /// Maximum number of results.
        #[arg(long, default_value_t = 10)]
        max_results: usize,
    },
}

/// Run a Registry subcommand.
pub(crate) async fn run(
    cmd: RegistryCommand,
    client: &EnhancedCardanoClient,
    output: OutputFormat,
) -> Result<()> {
    match cmd {
        RegistryCommand::RegisterAgent {
            owner_address,
            agent_id,
            metadata_uri,
            capabilities,
            framework_version,
            stake,
        } => {
            let capabilities: HashSet<String> = capabilities.into_iter().collect();
            let profile = agentic_registry::AgentProfile::new(
                owner_address,
                agent_id,
                metadata_uri,
                capabilities,
                framework_version,
                chrono::Utc::now(),
            )
            .map_err(|e| eyre::eyre!("{e}"))?;
            let result = client.register_agent(profile, stake).await.map_err(|e| eyre::eyre!("{e}"))?;
            crate::output::print_result(&result, output);
            Ok(())
        }
        RegistryCommand::FindAgents { capabilities, min_reputation, max_results } => {
            let result = client.find_agents(&capabilities, min_reputation, max_results).await;
            crate::output::print_result(&result, output);
            Ok(())
        }
    }
}
