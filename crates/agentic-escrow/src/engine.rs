//! The Escrow Engine: service-request lifecycle, proof verification, and
//! double-spend-safe settlement.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use agentic_compliance::{Action, ComplianceGate, Decision};
use agentic_nft_gateway::models::mint::{MintRequest, single_asset_metadata};
use agentic_registry::Registry;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::Error;
use crate::gateway::SettlementGateway;
use crate::models::{DisputeOutcome, EscrowRecord, EscrowStatus, ExecutionProof, Settlement};

/// The Escrow Engine.
///
/// Owns the sole `escrows` store (keyed by escrow id) and the per-agent
/// execution-id replay table, both serialized behind one `RwLock`.
/// Crediting reputation and submitting settlement mints both happen after
/// this engine's guard has been released, per the cross-component ordering
/// rule: never hold two component guards simultaneously.
pub struct EscrowEngine {
    escrows: RwLock<HashMap<String, EscrowRecord>>,
    replay: RwLock<HashMap<String, HashSet<String>>>,
    compliance: Arc<ComplianceGate>,
    registry: Arc<Registry>,
    gateway: Arc<dyn SettlementGateway>,
}

impl EscrowEngine {
    /// Creates an empty engine gated by `compliance` and wired to `registry`
    /// (for reputation credit) and `gateway` (for settlement mints).
    pub fn new(
        compliance: Arc<ComplianceGate>,
        registry: Arc<Registry>,
        gateway: Arc<dyn SettlementGateway>,
    ) -> Self {
        Self {
            escrows: RwLock::new(HashMap::new()),
            replay: RwLock::new(HashMap::new()),
            compliance,
            registry,
            gateway,
        }
    }

    async fn require_allowed(&self, subject: &str, action: Action, stake: Decimal) -> Result<(), Error> {
        match self.compliance.evaluate(subject, action, stake).await? {
            Decision::Allow => Ok(()),
            Decision::Deny => Err(Error::ComplianceDenied),
            Decision::RequireInfo => Err(Error::ComplianceRequiresInfo),
        }
    }

    /// Creates a new escrow from `request`, entering it directly in the
    /// `in_escrow` state.
    pub async fn create_escrow(
        &self,
        request: crate::models::ServiceRequest,
    ) -> Result<EscrowRecord, Error> {
        self.require_allowed(&request.requester_address, Action::CreateEscrow, Decimal::ZERO).await?;

        let escrow_id = Uuid::new_v4().to_string();
        let record = EscrowRecord::new(escrow_id, request, Utc::now());
        self.escrows.write().await.insert(record.escrow_id.clone(), record.clone());
        Ok(record)
    }

    /// Returns the escrow record for `escrow_id`, if any.
    pub async fn get_escrow(&self, escrow_id: &str) -> Option<EscrowRecord> {
        self.escrows.read().await.get(escrow_id).cloned()
    }

    /// Verifies `proof` against `escrow_id` and, on success, settles the
    /// escrow by crediting the agent's reputation and submitting a
    /// settlement mint through the NFT gateway.
    ///
    /// Verification order: (1) escrow exists and has not already claimed
    /// settlement, (2) proof's agent id matches the escrow's, (3) the
    /// execution id has not been replayed for this agent, (4) the proof's
    /// embedded hash recomputes correctly. A record that has already
    /// advanced past `in_escrow`/`executing` — including one merely
    /// `proven` but not yet `released` — is treated as already claimed,
    /// so a second concurrent submission never re-verifies the proof.
    pub async fn release_escrow(&self, escrow_id: &str, proof: ExecutionProof) -> Result<Settlement, Error> {
        let claim = {
            let mut escrows = self.escrows.write().await;
            let record = escrows.get_mut(escrow_id).ok_or_else(|| Error::NotFound(escrow_id.to_string()))?;
            if !matches!(record.status, EscrowStatus::InEscrow | EscrowStatus::Executing) {
                return Err(Error::AlreadySettled(escrow_id.to_string()));
            }
            if proof.agent_id != record.agent_id() {
                return Err(Error::AgentMismatch);
            }

            let mut replay = self.replay.write().await;
            let seen = replay.entry(proof.agent_id.clone()).or_default();
            if seen.contains(&proof.execution_id) {
                return Err(Error::ReplayedProof(proof.execution_id.clone()));
            }

            let recomputed = proof.recompute_hash()?;
            if !constant_time_eq(recomputed.as_bytes(), proof.proof_hash.as_bytes()) {
                return Err(Error::InvalidProof);
            }

            self.require_allowed(record.agent_id(), Action::ReleaseEscrow, record.payment_amount()).await?;

            seen.insert(proof.execution_id.clone());
            record.status = EscrowStatus::Proven;
            record.execution_proof = Some(proof.clone());

            (record.agent_id().to_string(), record.payment_amount())
        };
        let (agent_id, amount) = claim;

        self.registry.record_execution_outcome(&agent_id, proof.task_completed).await?;

        let settlement = self.settle_proven(escrow_id, &agent_id, amount).await?;
        Ok(settlement)
    }

    async fn settle_proven(&self, escrow_id: &str, agent_id: &str, amount: Decimal) -> Result<Settlement, Error> {
        let asset_name = format!("settlement-{escrow_id}");
        let metadata = single_asset_metadata(
            self.gateway.policy_id(),
            &asset_name,
            agentic_nft_gateway::models::mint::AssetMetadata {
                name: format!("Escrow Settlement {escrow_id}"),
                description: format!("Settlement for agent {agent_id}"),
                image: None,
                properties: Default::default(),
            },
        );
        let mint_request = MintRequest {
            idempotency_key: escrow_id.to_string(),
            asset_name: asset_name.clone(),
            recipient_address: agent_id.to_string(),
            policy_id: self.gateway.policy_id().to_string(),
            metadata,
        };

        let mint = self.gateway.mint(&mint_request).await?;

        let mut escrows = self.escrows.write().await;
        let record = escrows.get_mut(escrow_id).ok_or_else(|| Error::NotFound(escrow_id.to_string()))?;
        record.status = EscrowStatus::Released;
        record.mint_transaction_id = Some(mint.transaction_id.clone());

        Ok(Settlement {
            escrow_id: escrow_id.to_string(),
            status: EscrowStatus::Released,
            amount,
            mint_transaction_id: Some(mint.transaction_id),
            settled_at: Utc::now(),
        })
    }

    /// Refunds an escrow whose deadline has passed without a valid proof.
    pub async fn refund_expired(&self, escrow_id: &str) -> Result<Settlement, Error> {
        let mut escrows = self.escrows.write().await;
        let record = escrows.get_mut(escrow_id).ok_or_else(|| Error::NotFound(escrow_id.to_string()))?;

        if !matches!(record.status, EscrowStatus::InEscrow | EscrowStatus::Executing) {
            return Err(Error::AlreadySettled(escrow_id.to_string()));
        }
        if Utc::now() <= record.request.deadline {
            return Err(Error::NotExpired(escrow_id.to_string()));
        }

        self.require_allowed(record.agent_id(), Action::RefundExpired, record.payment_amount()).await?;

        record.status = EscrowStatus::Refunded;
        Ok(Settlement {
            escrow_id: escrow_id.to_string(),
            status: EscrowStatus::Refunded,
            amount: record.payment_amount(),
            mint_transaction_id: None,
            settled_at: Utc::now(),
        })
    }

    /// Freezes a non-terminal escrow pending manual arbitration.
    pub async fn dispute(&self, escrow_id: &str) -> Result<(), Error> {
        let mut escrows = self.escrows.write().await;
        let record = escrows.get_mut(escrow_id).ok_or_else(|| Error::NotFound(escrow_id.to_string()))?;
        if record.status.is_terminal() {
            return Err(Error::AlreadySettled(escrow_id.to_string()));
        }
        self.require_allowed(record.agent_id(), Action::Dispute, record.payment_amount()).await?;
        record.status = EscrowStatus::Disputed;
        Ok(())
    }

    /// Resolves a disputed escrow via the manual single-arbitrator stub.
    pub async fn arbitrate(&self, escrow_id: &str, outcome: DisputeOutcome) -> Result<Settlement, Error> {
        let (agent_id, amount) = {
            let escrows = self.escrows.read().await;
            let record = escrows.get(escrow_id).ok_or_else(|| Error::NotFound(escrow_id.to_string()))?;
            if record.status != EscrowStatus::Disputed {
                return Err(Error::AlreadySettled(escrow_id.to_string()));
            }
            (record.agent_id().to_string(), record.payment_amount())
        };
        self.require_allowed(&agent_id, Action::Arbitrate, amount).await?;

        match outcome {
            DisputeOutcome::Release => self.settle_proven(escrow_id, &agent_id, amount).await,
            DisputeOutcome::Refund => {
                let mut escrows = self.escrows.write().await;
                let record = escrows.get_mut(escrow_id).ok_or_else(|| Error::NotFound(escrow_id.to_string()))?;
                record.status = EscrowStatus::Refunded;
                Ok(Settlement {
                    escrow_id: escrow_id.to_string(),
                    status: EscrowStatus::Refunded,
                    amount,
                    mint_transaction_id: None,
                    settled_at: Utc::now(),
                })
            }
        }
    }

    /// Crash-recovery: scans `proven` escrows lacking a persisted mint id
    /// and re-submits their settlement. Returns the escrow ids successfully
    /// reconciled; callers should log any ids that still fail.
    pub async fn reconcile_orphans(&self) -> Vec<String> {
        let orphans: Vec<(String, String, Decimal)> = {
            let escrows = self.escrows.read().await;
            escrows
                .values()
                .filter(|r| r.status == EscrowStatus::Proven && r.mint_transaction_id.is_none())
                .map(|r| (r.escrow_id.clone(), r.agent_id().to_string(), r.payment_amount()))
                .collect()
        };

        let mut reconciled = Vec::new();
        for (escrow_id, agent_id, amount) in orphans {
            if self.settle_proven(&escrow_id, &agent_id, amount).await.is_ok() {
                reconciled.push(escrow_id);
            }
        }
        reconciled
    }
}

/// Constant-time byte comparison, used for the proof-hash check so a timing
/// side channel cannot leak how many leading bytes of a forged hash matched.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap as StdHashMap;

    use agentic_nft_gateway::models::mint::MintResponse;
    use chrono::Duration;
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;
    use crate::models::{PricingModel, ServiceRequest};

    struct FakeGateway;

    #[async_trait::async_trait]
    impl SettlementGateway for FakeGateway {
        fn policy_id(&self) -> &str {
            "policy1"
        }

        async fn mint(&self, req: &MintRequest) -> Result<MintResponse, agentic_nft_gateway::Error> {
            Ok(MintResponse {
                transaction_id: format!("tx-{}", req.idempotency_key),
                asset_id: format!("asset-{}", req.asset_name),
            })
        }
    }

    fn allow_all_gate() -> Arc<ComplianceGate> {
        use agentic_compliance::{AttributePredicate, PolicyRule};

        struct AllowEverything;
        #[async_trait::async_trait]
        impl agentic_compliance::client::AttributeStore for AllowEverything {
            async fn get_attributes(
                &self,
                _subject_hash: &str,
            ) -> Result<StdHashMap<String, serde_json::Value>, agentic_compliance::Error> {
                Ok(StdHashMap::from([("known".to_string(), json!(true))]))
            }
        }
        impl std::fmt::Debug for AllowEverything {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct("AllowEverything").finish()
            }
        }

        let rule = PolicyRule {
            name: "allow-all".to_string(),
            required_attribute_predicates: vec![AttributePredicate::Present { key: "known".to_string() }],
            applicable_actions: vec![
                Action::CreateEscrow,
                Action::ReleaseEscrow,
                Action::RefundExpired,
                Action::Dispute,
                Action::Arbitrate,
                Action::RecordExecutionOutcome,
            ],
            minimum_stake: Decimal::ZERO,
        };
        Arc::new(ComplianceGate::with_rules(Arc::new(AllowEverything), vec![rule]))
    }

    async fn setup() -> (EscrowEngine, String) {
        let compliance = allow_all_gate();
        let registry = Arc::new(Registry::new(compliance.clone(), Default::default()));
        let profile = agentic_registry::AgentProfile::new(
            "owner-1",
            "agent-a",
            "ipfs://meta",
            ["ai_analysis".to_string()].into_iter().collect(),
            "1.0.0",
            Utc::now(),
        )
        .unwrap();
        registry.register_agent(profile, dec!(2000)).await.unwrap();

        let gateway: Arc<dyn SettlementGateway> = Arc::new(FakeGateway);
        let engine = EscrowEngine::new(compliance, registry, gateway);
        (engine, "agent-a".to_string())
    }

    fn request(agent_id: &str, amount: Decimal) -> ServiceRequest {
        let now = Utc::now();
        ServiceRequest::new(
            "requester-1",
            agent_id,
            "service-hash",
            amount,
            now + Duration::days(7),
            "do a thing",
            PricingModel::PerExecution,
            now,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn create_escrow_starts_in_escrow() {
        let (engine, agent_id) = setup().await;
        let record = engine.create_escrow(request(&agent_id, dec!(25))).await.unwrap();
        assert_eq!(record.status, EscrowStatus::InEscrow);
    }

    #[tokio::test]
    async fn replaying_an_execution_id_on_a_different_escrow_is_rejected() {
        let (engine, agent_id) = setup().await;
        let record_a = engine.create_escrow(request(&agent_id, dec!(25))).await.unwrap();
        let record_b = engine.create_escrow(request(&agent_id, dec!(25))).await.unwrap();

        let proof = ExecutionProof::new(&agent_id, "exec-1", Utc::now(), true, 100, json!({}), json!({}))
            .unwrap();
        engine.release_escrow(&record_a.escrow_id, proof.clone()).await.unwrap();

        let err = engine.release_escrow(&record_b.escrow_id, proof).await.unwrap_err();
        assert!(matches!(err, Error::ReplayedProof(_)));
    }

    #[tokio::test]
    async fn refund_before_deadline_is_rejected() {
        let (engine, agent_id) = setup().await;
        let record = engine.create_escrow(request(&agent_id, dec!(25))).await.unwrap();
        let err = engine.refund_expired(&record.escrow_id).await.unwrap_err();
        assert!(matches!(err, Error::NotExpired(_)));
    }

    #[tokio::test]
    async fn agent_mismatch_is_rejected() {
        let (engine, agent_id) = setup().await;
        let record = engine.create_escrow(request(&agent_id, dec!(25))).await.unwrap();
        let proof =
            ExecutionProof::new("someone-else", "exec-1", Utc::now(), true, 100, json!({}), json!({}))
                .unwrap();
        let err = engine.release_escrow(&record.escrow_id, proof).await.unwrap_err();
        assert!(matches!(err, Error::AgentMismatch));
    }

    #[tokio::test]
    async fn tampered_proof_hash_is_rejected() {
        let (engine, agent_id) = setup().await;
        let record = engine.create_escrow(request(&agent_id, dec!(25))).await.unwrap();
        let mut proof =
            ExecutionProof::new(&agent_id, "exec-1", Utc::now(), true, 100, json!({}), json!({})).unwrap();
        proof.proof_hash = "0".repeat(64);
        let err = engine.release_escrow(&record.escrow_id, proof).await.unwrap_err();
        assert!(matches!(err, Error::InvalidProof));
    }

    #[tokio::test]
    async fn not_found_on_unknown_escrow() {
        let (engine, _agent_id) = setup().await;
        let err = engine.get_escrow("missing").await;
        assert!(err.is_none());
        let proof = ExecutionProof::new("a", "e", Utc::now(), true, 1, json!({}), json!({})).unwrap();
        let err = engine.release_escrow("missing", proof).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
