//! Escrow subcommands: service requests, settlement, and disputes.

use agentic_core::EnhancedCardanoClient;
use agentic_escrow::{DisputeOutcome, PricingModel, ServiceRequest};
use eyre::Result;
use rust_decimal::Decimal;

use crate::output::OutputFormat;

/// Escrow subcommands.
#[derive(Debug, clap::Subcommand)]
pub enum EscrowCommand {
    /// Create a new escrow from a service request.
    Create {
        /// Address of the party requesting the service.
        #[arg(long)]
        requester_address: String,
        /// The agent expected to perform the service.
        #[arg(long)]
        agent_id: String,
        /// Deterministic hash identifying the requested service.
        #[arg(long)]
        service_hash: String,
        /// Payment amount, strictly positive.
        #[arg(long)]
        payment_amount: Decimal,
        /// Deadline, in whole hours from now, by which proof must be submitted.
        #[arg(long)]
        deadline_hours: i64,
        /// Free-form description of the task.
        #[arg(long, default_value = "")]
        task_description: String,
    },
    /// Verify a submitted proof and settle an escrow.
    Release {
        /// The escrow id to release.
        escrow_id: String,
        /// The performing agent's id.
        #[arg(long)]
        agent_id: String,
        /// This execution's unique id, scoped per agent.
        #[arg(long)]
        execution_id: String,
        /// Whether the task completed successfully.
        #[arg(long)]
        task_completed: bool,
        /// How long the execution took, in milliseconds.
        #[arg(long)]
        execution_time_ms: u64,
    },
    /// Refund an expired, unsettled escrow.
    RefundExpired {
        /// The escrow id to refund.
        escrow_id: String,
    },
    /// Freeze an escrow pending manual arbitration.
    Dispute {
        /// The escrow id to dispute.
        escrow_id: String,
    },
    /// Resolve a disputed escrow.
    Arbitrate {
        /// The escrow id to resolve.
        escrow_id: String,
        /// The arbitrator's outcome: `release` or `refund`.
        #[arg(long)]
        outcome: ArbitrationOutcome,
    },
    /// Re-submit settlement for any proven escrow missing a confirmed mint.
    ReconcileOrphans,
    /// Fetch an escrow record by id.
    Get {
        /// The escrow id to fetch.
        escrow_id: String,
    },
}

/// CLI-facing mirror of [`DisputeOutcome`], giving clap a `ValueEnum`.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ArbitrationOutcome {
    /// Resolve the dispute by releasing payment to the agent.
    Release,
    /// Resolve the dispute by refunding the requester.
    Refund,
}

impl From<ArbitrationOutcome> for DisputeOutcome {
    fn from(value: ArbitrationOutcome) -> Self {
        match value {
            ArbitrationOutcome::Release => DisputeOutcome::Release,
            ArbitrationOutcome::Refund => DisputeOutcome::Refund,
        }
    }
}

/// Run an Escrow subcommand.
pub(crate) async fn run(
    cmd: EscrowCommand,
    client: &EnhancedCardanoClient,
    output: OutputFormat,
) -> Result<()> {
    match cmd {
        EscrowCommand::Create {
            requester_address,
            agent_id,
            service_hash,
            payment_amount,
            deadline_hours,
            task_description,
        } => {
            let now = chrono::Utc::now();
            let request = ServiceRequest::new(
                requester_address,
                agent_id,
                service_hash,
                payment_amount,
                now + chrono::Duration::hours(deadline_hours),
                task_description,
                PricingModel::PerExecution,
                now,
            )
            .map_err(|e| eyre::eyre!("{e}"))?;
            let result = client.create_escrow(request).await.map_err(|e| eyre::eyre!("{e}"))?;
            crate::output::print_result(&result, output);
            Ok(())
        }
        EscrowCommand::Release { escrow_id, agent_id, execution_id, task_completed, execution_time_ms } => {
            let proof = agentic_escrow::ExecutionProof::new(
                agent_id,
                execution_id,
                chrono::Utc::now(),
                task_completed,
                execution_time_ms,
                serde_json::json!({}),
                serde_json::json!({}),
            )
            .map_err(|e| eyre::eyre!("{e}"))?;
            let result =
                client.release_escrow(&escrow_id, proof).await.map_err(|e| eyre::eyre!("{e}"))?;
            crate::output::print_result(&result, output);
            Ok(())
        }
        EscrowCommand::RefundExpired { escrow_id } => {
            let result = client.refund_expired(&escrow_id).await.map_err(|e| eyre::eyre!("{e}"))?;
            crate::output::print_result(&result, output);
            Ok(())
        }
        EscrowCommand::Dispute { escrow_id } => {
            client.dispute(&escrow_id).await.map_err(|e| eyre::eyre!("{e}"))?;
            crate::output::print_result(&serde_json::json!({"escrow_id": escrow_id, "status": "disputed"}), output);
            Ok(())
        }
        EscrowCommand::Arbitrate { escrow_id, outcome } => {
            let result = client
                .arbitrate(&escrow_id, outcome.into())
                .await
                .map_err(|e| eyre::eyre!("{e}"))?;
            crate::output::print_result(&result, output);
            Ok(())
        }
        EscrowCommand::ReconcileOrphans => {
            let result = client.reconcile_orphans().await;
            crate::output::print_result(&result, output);
            Ok(())
        }
        EscrowCommand::Get { escrow_id } => {
            let result = client.get_escrow(&escrow_id).await;
            crate::output::print_result(&result, output);
            Ok(())
        }
    }
}
