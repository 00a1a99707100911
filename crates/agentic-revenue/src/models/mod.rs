//! Data models for the `agentic-revenue` crate.

use std::collections::HashMap;

use rust_decimal::Decimal;

/// A participant's position in the revenue pool.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RevenueShare {
    /// The recipient's address.
    pub recipient_address: String,
    /// Participation tokens, non-negative, determining pro-rata share.
    pub participation_tokens: u64,
    /// Rewards accumulated since the last claim, pending claim.
    pub accumulated_rewards: Decimal,
    /// Sequence number of this recipient's last claim.
    pub last_claim_sequence: u64,
    /// Non-normative running contribution score.
    pub contribution_score: Decimal,
}

impl RevenueShare {
    /// Creates a new share with zero accumulated rewards.
    pub fn new(recipient_address: impl Into<String>, participation_tokens: u64) -> Self {
        Self {
            recipient_address: recipient_address.into(),
            participation_tokens,
            accumulated_rewards: Decimal::ZERO,
            last_claim_sequence: 0,
            contribution_score: Decimal::ZERO,
        }
    }
}

/// The result of a single `distribute_revenue` call.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DistributionReport {
    /// The distribution period this report covers.
    pub period_id: String,
    /// The total amount distributed in this period.
    pub total: Decimal,
    /// Number of active recipients that received an award.
    pub participants: usize,
    /// Per-recipient award amounts.
    pub awards: HashMap<String, Decimal>,
    /// The flooring residue, credited to the system reserve.
    pub reserve_residue: Decimal,
    /// Monotonic sequence number identifying this report's position among
    /// all distributions processed so far — not a wall-clock timestamp, so
    /// callers can detect staleness without relying on `period_id` ordering.
    pub distributed_at_sequence: u64,
}

/// The outcome of a `distribute_revenue` call: either a report was produced,
/// or the pool had zero total participation tokens and nothing happened.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DistributionOutcome {
    /// A distribution was computed and applied (or, on retry, already had been).
    Distributed(DistributionReport),
    /// There were no active participation tokens; distribution was a no-op.
    EmptyPool,
}

/// Result of a successful `claim_rewards` call.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ClaimResult {
    /// The claiming recipient's address.
    pub recipient_address: String,
    /// The amount claimed.
    pub amount: Decimal,
    /// The sequence number assigned to this claim.
    pub claim_sequence: u64,
    /// The settlement transaction id for the transfer.
    pub transaction_id: String,
}
