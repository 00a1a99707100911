//! The attribute-based compliance gate (`C6b`).

use std::{collections::HashSet, sync::Arc};

use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::{
    client::AttributeStore,
    error::Error,
    models::policy::{Action, Decision, PolicyRule},
};

/// The default rule set shipped when a caller does not supply its own ABAC
/// policies: deny a subject the gate has no attributes for, allow any known
/// subject that meets the minimum stake and carries no blocking attribute.
///
/// `spec.md` §4.6 specifies the rule *shape* but leaves rule *content* to the
/// implementer; this default is recorded as the Open Question resolution in
/// `DESIGN.md`.
fn default_rules() -> Vec<PolicyRule> {
    vec![PolicyRule {
        name: "default-allow-known-subject".to_string(),
        required_attribute_predicates: vec![],
        applicable_actions: vec![
            Action::RegisterAgent,
            Action::UpdateAgentProfile,
            Action::RecordExecutionOutcome,
            Action::DeregisterAgent,
            Action::CreateEscrow,
            Action::ReleaseEscrow,
            Action::RefundExpired,
            Action::Dispute,
            Action::Arbitrate,
            Action::RegisterCrossChainService,
        ],
        minimum_stake: Decimal::ZERO,
    }]
}

/// The compliance gate consulted before every state-mutating operation in
/// the Registry, Escrow Engine, and Cross-Chain Directory.
///
/// Raw attribute values are never retained by the gate: only the subject's
/// canonical hash and the resulting decision are observable after
/// `evaluate` returns.
pub struct ComplianceGate {
    rules: RwLock<Vec<PolicyRule>>,
    forgotten: RwLock<HashSet<String>>,
    attribute_store: Arc<dyn AttributeStore>,
}

impl std::fmt::Debug for ComplianceGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComplianceGate").finish_non_exhaustive()
    }
}

impl ComplianceGate {
    /// Creates a gate with the default allow-known-subject rule set.
    pub fn new(attribute_store: Arc<dyn AttributeStore>) -> Self {
        Self::with_rules(attribute_store, default_rules())
    }

    /// Creates a gate with a caller-supplied rule set.
    pub fn with_rules(attribute_store: Arc<dyn AttributeStore>, rules: Vec<PolicyRule>) -> Self {
        Self { rules: RwLock::new(rules), forgotten: RwLock::new(HashSet::new()), attribute_store }
    }

    /// Evaluates whether `action` may proceed for `subject`.
    ///
    /// `subject` is the caller-visible identifier (an owner or requester
    /// address); it is hashed before being used to look up attributes or to
    /// check the forgotten-subject set, so no raw identifier crosses the
    /// attribute-store boundary.
    pub async fn evaluate(
        &self,
        subject: &str,
        action: Action,
        stake: Decimal,
    ) -> Result<Decision, Error> {
        let subject_hash = agentic_hash::hash_of(&SubjectRef(subject))?;

        if self.forgotten.read().await.contains(&subject_hash) {
            return Ok(Decision::Deny);
        }

        // Suspension point: off-chain attribute retrieval.
        let attributes = self.attribute_store.get_attributes(&subject_hash).await?;
        if attributes.is_empty() {
            tracing::debug!(subject_hash = %subject_hash, ?action, "no attributes on file, denying");
            return Ok(Decision::Deny);
        }

        let rules = self.rules.read().await;
        let applicable: Vec<&PolicyRule> = rules.iter().filter(|r| r.applies_to(action)).collect();
        if applicable.is_empty() {
            return Ok(Decision::RequireInfo);
        }
        let allowed = applicable.iter().any(|r| r.grants(&attributes, stake));
        Ok(if allowed { Decision::Allow } else { Decision::Deny })
    }

    /// Replaces the active rule set.
    pub async fn set_rules(&self, rules: Vec<PolicyRule>) {
        *self.rules.write().await = rules;
    }

    /// Right-to-erasure: invalidates the attribute-hash binding for
    /// `subject`, so all future evaluations fail closed for them. Existing
    /// completed records elsewhere in the system retain only cryptographic
    /// hashes, which are unlinkable without the off-chain mapping this call
    /// discards.
    pub async fn forget(&self, subject: &str) -> Result<(), Error> {
        let subject_hash = agentic_hash::hash_of(&SubjectRef(subject))?;
        self.forgotten.write().await.insert(subject_hash);
        Ok(())
    }
}

struct SubjectRef<'a>(&'a str);

impl agentic_hash::Hashable for SubjectRef<'_> {
    fn to_canonical(&self) -> agentic_hash::CanonicalValue {
        agentic_hash::CanonicalValue::Str(self.0.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;
    use crate::client::InMemoryAttributeStore;

    fn store_with(subject: &str, attrs: HashMap<String, serde_json::Value>) -> Arc<dyn AttributeStore> {
        let subject_hash = agentic_hash::hash_of(&SubjectRef(subject)).unwrap();
        let mut store = InMemoryAttributeStore::new();
        store.insert(subject_hash, attrs);
        Arc::new(store)
    }

    #[tokio::test]
    async fn unknown_subject_is_denied() {
        let gate = ComplianceGate::new(Arc::new(InMemoryAttributeStore::new()));
        let decision =
            gate.evaluate("unknown", Action::CreateEscrow, dec!(1000)).await.unwrap();
        assert_eq!(decision, Decision::Deny);
    }

    #[tokio::test]
    async fn known_subject_meeting_stake_is_allowed() {
        let store = store_with("alice", HashMap::from([("kyc".to_string(), json!(true))]));
        let gate = ComplianceGate::new(store);
        let decision = gate.evaluate("alice", Action::CreateEscrow, dec!(100)).await.unwrap();
        assert_eq!(decision, Decision::Allow);
    }

    #[tokio::test]
    async fn forgotten_subject_fails_closed() {
        let store = store_with("bob", HashMap::from([("kyc".to_string(), json!(true))]));
        let gate = ComplianceGate::new(store);
        gate.forget("bob").await.unwrap();
        let decision = gate.evaluate("bob", Action::CreateEscrow, dec!(100)).await.unwrap();
        assert_eq!(decision, Decision::Deny);
    }

    #[tokio::test]
    async fn custom_rule_with_required_predicate() {
        let store = store_with("carol", HashMap::from([("sanctioned".to_string(), json!(true))]));
        let gate = ComplianceGate::with_rules(
            store,
            vec![PolicyRule {
                name: "block-sanctioned".to_string(),
                required_attribute_predicates: vec![
                    crate::models::policy::AttributePredicate::Absent {
                        key: "sanctioned".to_string(),
                    },
                ],
                applicable_actions: vec![Action::CreateEscrow],
                minimum_stake: Decimal::ZERO,
            }],
        );
        let decision = gate.evaluate("carol", Action::CreateEscrow, dec!(100)).await.unwrap();
        assert_eq!(decision, Decision::Deny);
    }
}
