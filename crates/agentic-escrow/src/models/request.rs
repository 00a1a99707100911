//! Service requests: a buyer's request for an agent service, prior to escrow.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::error::Error;

/// How the requested service is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingModel {
    /// Paid once per completed execution.
    PerExecution,
    /// Paid on a recurring subscription basis.
    Subscription,
    /// Paid according to a tiered schedule.
    Tiered,
}

/// A buyer's request for an agent service, validated before entering escrow.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ServiceRequest {
    /// Address of the party requesting the service.
    pub requester_address: String,
    /// The agent expected to perform the service.
    pub agent_id: String,
    /// Deterministic hash identifying the requested service.
    pub service_hash: String,
    /// Payment amount, strictly positive, 6-decimal fixed point.
    pub payment_amount: Decimal,
    /// Deadline by which proof must be submitted; strictly after `created_at`.
    pub deadline: DateTime<Utc>,
    /// Free-form description of the task.
    pub task_description: String,
    /// The pricing model under which this request is billed.
    pub pricing_model: PricingModel,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
}

impl ServiceRequest {
    /// Constructs a request, validating `payment_amount > 0` and
    /// `deadline > created_at` at construction time.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        requester_address: impl Into<String>,
        agent_id: impl Into<String>,
        service_hash: impl Into<String>,
        payment_amount: Decimal,
        deadline: DateTime<Utc>,
        task_description: impl Into<String>,
        pricing_model: PricingModel,
        created_at: DateTime<Utc>,
    ) -> Result<Self, Error> {
        if payment_amount <= Decimal::ZERO {
            return Err(Error::NegativeAmount);
        }
        if deadline <= created_at {
            return Err(Error::DeadlineInPast);
        }
        Ok(Self {
            requester_address: requester_address.into(),
            agent_id: agent_id.into(),
            service_hash: service_hash.into(),
            payment_amount,
            deadline,
            task_description: task_description.into(),
            pricing_model,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn non_positive_amount_is_rejected() {
        let now = Utc::now();
        let err = ServiceRequest::new(
            "req-1",
            "agent-1",
            "hash",
            dec!(0),
            now + Duration::days(1),
            "do a thing",
            PricingModel::PerExecution,
            now,
        )
        .unwrap_err();
        assert!(matches!(err, Error::NegativeAmount));
    }

    #[test]
    fn deadline_in_past_is_rejected() {
        let now = Utc::now();
        let err = ServiceRequest::new(
            "req-1",
            "agent-1",
            "hash",
            dec!(10),
            now - Duration::days(1),
            "do a thing",
            PricingModel::PerExecution,
            now,
        )
        .unwrap_err();
        assert!(matches!(err, Error::DeadlineInPast));
    }
}
