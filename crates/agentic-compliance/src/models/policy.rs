//! ABAC policy model for the compliance gate.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde_json::Value;

/// A mutating operation the compliance gate may be consulted before.
///
/// Read-only operations (discovery, balance queries) bypass the gate
/// entirely, per `spec.md` §4.6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// `Registry::register_agent`.
    RegisterAgent,
    /// `Registry::update_agent_profile`.
    UpdateAgentProfile,
    /// `Registry::record_execution_outcome`.
    RecordExecutionOutcome,
    /// `Registry::deregister_agent`.
    DeregisterAgent,
    /// `EscrowEngine::create_escrow`.
    CreateEscrow,
    /// `EscrowEngine::release_escrow`.
    ReleaseEscrow,
    /// `EscrowEngine::refund_expired`.
    RefundExpired,
    /// `EscrowEngine::dispute`.
    Dispute,
    /// `EscrowEngine::arbitrate`.
    Arbitrate,
    /// `Directory::register_cross_chain_service`.
    RegisterCrossChainService,
}

/// The outcome of a compliance evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// The operation may proceed.
    Allow,
    /// The operation is blocked.
    Deny,
    /// The subject must supply more information before a decision can be made.
    RequireInfo,
}

/// A single predicate evaluated against a subject's off-chain attributes.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttributePredicate {
    /// The named attribute must equal the given opaque value.
    Equals {
        /// Attribute key.
        key: String,
        /// Expected opaque value.
        value: Value,
    },
    /// The named attribute must be present (any value).
    Present {
        /// Attribute key.
        key: String,
    },
    /// The named attribute must be absent.
    Absent {
        /// Attribute key.
        key: String,
    },
}

impl AttributePredicate {
    /// Evaluates this predicate against a subject's fetched attributes.
    pub fn matches(&self, attributes: &HashMap<String, Value>) -> bool {
        match self {
            AttributePredicate::Equals { key, value } => {
                attributes.get(key).is_some_and(|v| v == value)
            }
            AttributePredicate::Present { key } => attributes.contains_key(key),
            AttributePredicate::Absent { key } => !attributes.contains_key(key),
        }
    }
}

/// A declared ABAC rule: predicates, the actions it applies to, and a
/// minimum-stake floor evaluated against environmental facts rather than
/// attributes.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PolicyRule {
    /// Human-readable rule name, surfaced in denial messages.
    pub name: String,
    /// All predicates must match for the rule to grant `allow`.
    pub required_attribute_predicates: Vec<AttributePredicate>,
    /// The actions this rule is scoped to.
    pub applicable_actions: Vec<Action>,
    /// Minimum stake required for the rule to grant `allow`.
    pub minimum_stake: Decimal,
}

impl PolicyRule {
    /// Whether this rule applies to the given action.
    pub fn applies_to(&self, action: Action) -> bool {
        self.applicable_actions.contains(&action)
    }

    /// Whether this rule grants `allow` for the given attributes and stake.
    pub fn grants(&self, attributes: &HashMap<String, Value>, stake: Decimal) -> bool {
        stake >= self.minimum_stake
            && self.required_attribute_predicates.iter().all(|p| p.matches(attributes))
    }
}

/// Facts about the operation's environment, evaluated alongside attributes.
#[derive(Debug, Clone, Default)]
pub struct EvaluationContext {
    /// Stake backing the subject at evaluation time.
    pub stake: Decimal,
}
