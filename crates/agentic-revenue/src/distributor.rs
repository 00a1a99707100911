//! The Revenue Distributor: token-weighted distribution and claim settlement.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::error::Error;
use crate::gateway::TransferGateway;
use crate::models::{ClaimResult, DistributionOutcome, DistributionReport, RevenueShare};

/// Number of fractional digits in the native minimum unit (6, per `spec.md` §4.4/§8).
pub const DISTRIBUTION_PRECISION: u32 = 6;

/// The Revenue Distributor (`C5`).
///
/// Owns the sole `shares` store, a distribution history keyed by
/// `period_id` for idempotency, and a system reserve accumulating flooring
/// residue.
pub struct RevenueDistributor {
    shares: RwLock<HashMap<String, RevenueShare>>,
    history: RwLock<HashMap<String, DistributionOutcome>>,
    reserve: RwLock<Decimal>,
    sequence: AtomicU64,
    gateway: Arc<dyn TransferGateway>,
}

impl RevenueDistributor {
    /// Creates an empty distributor settling claims through `gateway`.
    pub fn new(gateway: Arc<dyn TransferGateway>) -> Self {
        Self {
            shares: RwLock::new(HashMap::new()),
            history: RwLock::new(HashMap::new()),
            reserve: RwLock::new(Decimal::ZERO),
            sequence: AtomicU64::new(0),
            gateway,
        }
    }

    /// Registers (or replaces) a recipient's participation token count.
    ///
    /// Not itself a named public operation in `spec.md` §6, but required to
    /// populate the pool `distribute_revenue` snapshots from.
    pub async fn set_participation(&self, recipient_address: impl Into<String>, tokens: u64) {
        let recipient_address = recipient_address.into();
        let mut shares = self.shares.write().await;
        shares
            .entry(recipient_address.clone())
            .and_modify(|s| s.participation_tokens = tokens)
            .or_insert_with(|| RevenueShare::new(recipient_address, tokens));
    }

    /// The current reserve balance, accumulated from flooring residue.
    pub async fn reserve_balance(&self) -> Decimal {
        *self.reserve.read().await
    }

    /// Distributes `total` across all active participants for `period_id`.
    ///
    /// Idempotent: a second call with the same `period_id` returns the
    /// original outcome unchanged, without recomputing or double-crediting.
    pub async fn distribute_revenue(
        &self,
        total: Decimal,
        period_id: impl Into<String>,
    ) -> Result<DistributionOutcome, Error> {
        let period_id = period_id.into();
        if let Some(existing) = self.history.read().await.get(&period_id) {
            return Ok(existing.clone());
        }
        if total <= Decimal::ZERO {
            return Err(Error::NegativeAmount);
        }

        let mut shares = self.shares.write().await;
        let total_tokens: u64 = shares.values().map(|s| s.participation_tokens).sum();

        let outcome = if total_tokens == 0 {
            DistributionOutcome::EmptyPool
        } else {
            let total_tokens_dec = Decimal::from(total_tokens);
            let mut awards = HashMap::with_capacity(shares.len());
            let mut awarded_sum = Decimal::ZERO;

            for share in shares.values_mut() {
                if share.participation_tokens == 0 {
                    continue;
                }
                let tokens_dec = Decimal::from(share.participation_tokens);
                let fair_share = total * tokens_dec / total_tokens_dec;
                let award = floor_to_unit(fair_share);
                share.accumulated_rewards += award;
                share.contribution_score += award;
                awarded_sum += award;
                awards.insert(share.recipient_address.clone(), award);
            }

            let residue = total - awarded_sum;
            *self.reserve.write().await += residue;

            let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
            DistributionOutcome::Distributed(DistributionReport {
                period_id: period_id.clone(),
                total,
                participants: awards.len(),
                awards,
                reserve_residue: residue,
                distributed_at_sequence: sequence,
            })
        };

        self.history.write().await.insert(period_id, outcome.clone());
        Ok(outcome)
    }

    /// Returns the pending (unclaimed) balance for `recipient_address`.
    pub async fn get_pending(&self, recipient_address: &str) -> Result<Decimal, Error> {
        let shares = self.shares.read().await;
        let share = shares
            .get(recipient_address)
            .ok_or_else(|| Error::NotFound(recipient_address.to_string()))?;
        Ok(share.accumulated_rewards)
    }

    /// Atomically claims a recipient's full pending balance.
    ///
    /// All-or-nothing: if the settlement transfer fails, the claimed amount
    /// is restored and `last_claim_sequence` is rolled back before the error
    /// is surfaced.
    pub async fn claim_rewards(&self, recipient_address: &str) -> Result<ClaimResult, Error> {
        let (amount, previous_sequence) = {
            let mut shares = self.shares.write().await;
            let share = shares
                .get_mut(recipient_address)
                .ok_or_else(|| Error::NotFound(recipient_address.to_string()))?;
            let amount = share.accumulated_rewards;
            let previous_sequence = share.last_claim_sequence;
            share.accumulated_rewards = Decimal::ZERO;
            share.last_claim_sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
            (amount, previous_sequence)
        };

        let claim_sequence = self.shares.read().await[recipient_address].last_claim_sequence;
        let idempotency_key = format!("{recipient_address}-{claim_sequence}");

        match self.gateway.transfer(recipient_address, amount, &idempotency_key).await {
            Ok(transaction_id) => Ok(ClaimResult {
                recipient_address: recipient_address.to_string(),
                amount,
                claim_sequence,
                transaction_id,
            }),
            Err(e) => {
                let mut shares = self.shares.write().await;
                if let Some(share) = shares.get_mut(recipient_address) {
                    share.accumulated_rewards += amount;
                    share.last_claim_sequence = previous_sequence;
                }
                Err(Error::Gateway(e))
            }
        }
    }
}

/// Floors `value` to the native minimum unit ([`DISTRIBUTION_PRECISION`]
/// fractional digits). All inputs here are non-negative, so truncation
/// toward zero is equivalent to a mathematical floor.
fn floor_to_unit(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DISTRIBUTION_PRECISION, rust_decimal::RoundingStrategy::ToZero)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    struct FakeGateway;

    #[async_trait::async_trait]
    impl TransferGateway for FakeGateway {
        async fn transfer(
            &self,
            recipient_address: &str,
            _amount: Decimal,
            idempotency_key: &str,
        ) -> Result<String, agentic_nft_gateway::Error> {
            Ok(format!("tx-{recipient_address}-{idempotency_key}"))
        }
    }

    struct FailingGateway;

    #[async_trait::async_trait]
    impl TransferGateway for FailingGateway {
        async fn transfer(
            &self,
            _recipient_address: &str,
            _amount: Decimal,
            _idempotency_key: &str,
        ) -> Result<String, agentic_nft_gateway::Error> {
            Err(agentic_nft_gateway::Error::TransportFailed("network unreachable".to_string()))
        }
    }

    async fn seeded_distributor() -> RevenueDistributor {
        let distributor = RevenueDistributor::new(Arc::new(FakeGateway));
        distributor.set_participation("r1", 1000).await;
        distributor.set_participation("r2", 2000).await;
        distributor.set_participation("r3", 3000).await;
        distributor
    }

    #[tokio::test]
    async fn scenario_revenue_distribution_floors_and_reserves_residue() {
        let distributor = seeded_distributor().await;
        let outcome = distributor.distribute_revenue(dec!(10), "period-1").await.unwrap();
        let report = match outcome {
            DistributionOutcome::Distributed(r) => r,
            DistributionOutcome::EmptyPool => panic!("expected a distribution"),
        };
        assert_eq!(report.awards["r1"], dec!(1.666666));
        assert_eq!(report.awards["r2"], dec!(3.333333));
        assert_eq!(report.awards["r3"], dec!(5.000000));
        assert_eq!(report.reserve_residue, dec!(0.000001));

        let claim = distributor.claim_rewards("r1").await.unwrap();
        assert_eq!(claim.amount, dec!(1.666666));
        assert_eq!(distributor.get_pending("r1").await.unwrap(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn distribution_is_idempotent_per_period_id() {
        let distributor = seeded_distributor().await;
        let first = distributor.distribute_revenue(dec!(10), "period-1").await.unwrap();
        let second = distributor.distribute_revenue(dec!(10), "period-1").await.unwrap();
        assert_eq!(first, second);

        // No double credit: r1's pending balance reflects exactly one award.
        assert_eq!(distributor.get_pending("r1").await.unwrap(), dec!(1.666666));
    }

    #[tokio::test]
    async fn empty_pool_is_a_no_op_not_an_error() {
        let distributor = RevenueDistributor::new(Arc::new(FakeGateway));
        let outcome = distributor.distribute_revenue(dec!(10), "period-1").await.unwrap();
        assert_eq!(outcome, DistributionOutcome::EmptyPool);
    }

    #[tokio::test]
    async fn failed_transfer_reverses_the_claim() {
        let distributor = RevenueDistributor::new(Arc::new(FailingGateway));
        distributor.set_participation("r1", 1000).await;
        distributor.distribute_revenue(dec!(10), "period-1").await.unwrap();

        let pending_before = distributor.get_pending("r1").await.unwrap();
        let err = distributor.claim_rewards("r1").await.unwrap_err();
        assert!(matches!(err, Error::Gateway(_)));
        assert_eq!(distributor.get_pending("r1").await.unwrap(), pending_before);
    }

    #[tokio::test]
    async fn no_overdistribution_sum_of_awards_never_exceeds_total() {
        let distributor = seeded_distributor().await;
        let outcome = distributor.distribute_revenue(dec!(10), "period-1").await.unwrap();
        if let DistributionOutcome::Distributed(report) = outcome {
            let sum: Decimal = report.awards.values().copied().sum();
            assert!(sum <= report.total);
            assert_eq!(sum + report.reserve_residue, report.total);
        }
    }
}
