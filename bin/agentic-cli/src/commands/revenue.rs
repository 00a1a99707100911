//! Revenue subcommands: participation, distribution, and claims.

use agentic_core::EnhancedCardanoClient;
use eyre::Result;
use rust_decimal::Decimal;

use crate::output::OutputFormat;

/// Revenue subcommands.
#[derive(Debug, clap::Subcommand)]
pub enum RevenueCommand {
    /// Set a recipient's participation tokens for future distributions.
    SetParticipation {
        /// The recipient's address.
        #[arg(long)]
        recipient_address: String,
        /// Participation tokens, non-negative.
        #[arg(long)]
        tokens: u64,
    },
    /// Distribute a total across active participants for a period.
    Distribute {
        /// The total amount to distribute.
        #[arg(long)]
        total: Decimal,
        /// The distribution period id.
        #[arg(long)]
        period_id: String,
    },
    /// Fetch a recipient's current pending (unclaimed) balance.
    Pending {
        /// The recipient's address.
        recipient_address: String,
    },
    /// Claim a recipient's full pending revenue balance.
    Claim {
        /// The recipient's address.
        recipient_address: String,
    },
    /// Report the system reserve accumulated from flooring residue.
    Reserve,
}

/// Run a Revenue subcommand.
pub(crate) async fn run(
    cmd: RevenueCommand,
    client: &EnhancedCardanoClient,
    output: OutputFormat,
) -> Result<()> {
    match cmd {
        RevenueCommand::SetParticipation { recipient_address, tokens } => {
            client.set_participation(&recipient_address, tokens).await;
            crate::output::print_result(
                &serde_json::json!({"recipient_address": recipient_address, "participation_tokens": tokens}),
                output,
            );
            Ok(())
        }
        RevenueCommand::Distribute { total, period_id } => {
            let result = client.distribute_revenue(total, &period_id).await.map_err(|e| eyre::eyre!("{e}"))?;
            crate::output::print_result(&result, output);
            Ok(())
        }
        RevenueCommand::Pending { recipient_address } => {
            let result = client.get_pending_rewards(&recipient_address).await.map_err(|e| eyre::eyre!("{e}"))?;
            crate::output::print_result(&result, output);
            Ok(())
        }
        RevenueCommand::Claim { recipient_address } => {
            let result = client.claim_rewards(&recipient_address).await.map_err(|e| eyre::eyre!("{e}"))?;
            crate::output::print_result(&result, output);
            Ok(())
        }
        RevenueCommand::Reserve => {
            let result = client.reserve_balance().await;
            crate::output::print_result(&result, output);
            Ok(())
        }
    }
}
