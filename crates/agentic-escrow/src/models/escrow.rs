//! Escrow records, their state machine, and settlement results.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::proof::ExecutionProof;
use super::request::ServiceRequest;

/// The lifecycle state of an [`EscrowRecord`].
///
/// `Released` and `Refunded` are terminal and absorbing: no further
/// transition is ever applied to an escrow once in one of these states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscrowStatus {
    /// Entered escrow; awaiting the agent to begin executing.
    InEscrow,
    /// The agent has begun executing the requested service.
    Executing,
    /// A valid proof has been verified but settlement has not yet committed.
    Proven,
    /// Terminal: settlement committed and payment released to the agent.
    Released,
    /// Terminal: the deadline passed before a valid proof was submitted.
    Refunded,
    /// Frozen pending manual arbitration.
    Disputed,
}

impl EscrowStatus {
    /// Whether this status is terminal (absorbing).
    pub fn is_terminal(self) -> bool {
        matches!(self, EscrowStatus::Released | EscrowStatus::Refunded)
    }
}

/// A service request that has entered escrow.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EscrowRecord {
    /// Unique id assigned on entry into `in_escrow`.
    pub escrow_id: String,
    /// The underlying service request.
    pub request: ServiceRequest,
    /// Current lifecycle state.
    pub status: EscrowStatus,
    /// The verified execution proof, once submitted and accepted.
    pub execution_proof: Option<ExecutionProof>,
    /// The settlement mint transaction id, once persisted.
    ///
    /// Absence of this field while `status == Proven` is exactly the crash
    /// window `reconcile_orphans` scans for on restart.
    pub mint_transaction_id: Option<String>,
    /// When the escrow was created (entered `in_escrow`).
    pub created_at: DateTime<Utc>,
}

impl EscrowRecord {
    /// Creates a new escrow record in its initial `in_escrow` state.
    pub fn new(escrow_id: impl Into<String>, request: ServiceRequest, created_at: DateTime<Utc>) -> Self {
        Self {
            escrow_id: escrow_id.into(),
            request,
            status: EscrowStatus::InEscrow,
            execution_proof: None,
            mint_transaction_id: None,
            created_at,
        }
    }

    /// The agent id bound to this escrow's underlying request.
    pub fn agent_id(&self) -> &str {
        &self.request.agent_id
    }

    /// The payment amount bound to this escrow's underlying request.
    pub fn payment_amount(&self) -> Decimal {
        self.request.payment_amount
    }
}

/// Result of releasing or refunding an escrow.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Settlement {
    /// The settled escrow's id.
    pub escrow_id: String,
    /// The escrow's status after settlement (`Released` or `Refunded`).
    pub status: EscrowStatus,
    /// The amount paid out (to the agent on release, back to the requester on refund).
    pub amount: Decimal,
    /// The settlement mint transaction id, if a mint was produced.
    pub mint_transaction_id: Option<String>,
    /// When settlement completed.
    pub settled_at: DateTime<Utc>,
}

/// The arbitrator's resolution of a disputed escrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisputeOutcome {
    /// Resolve the dispute by releasing payment to the agent.
    Release,
    /// Resolve the dispute by refunding the requester.
    Refund,
}
