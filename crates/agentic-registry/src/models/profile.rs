//! Agent profiles, registration results, and discovery views.

use std::collections::HashSet;

use agentic_hash::{CanonicalValue, Hashable};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::tier::StakeTier;
use crate::error::Error;

/// A registered autonomous agent and its anti-tampered staking/reputation state.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AgentProfile {
    /// Address of the wallet that owns this agent.
    pub owner_address: String,
    /// Unique identifier for this agent.
    pub agent_id: String,
    /// URI of an off-chain blob carrying extended agent metadata.
    pub metadata_uri: String,
    /// Amount currently staked, locked as collateral.
    pub staked_amount: Decimal,
    /// Stored base reputation score: `successful / max(total, 1)`.
    ///
    /// Time decay and stake bonus are applied at query time; see
    /// [`crate::reputation::effective_reputation`].
    pub reputation_score: f64,
    /// Declared capabilities; non-empty at registration.
    pub capabilities: HashSet<String>,
    /// Total number of executions recorded for this agent.
    pub total_executions: u64,
    /// Number of those executions that completed successfully.
    pub successful_executions: u64,
    /// Version of the agent framework this agent runs.
    pub framework_version: String,
    /// When the agent was registered.
    pub created_at: DateTime<Utc>,
    /// When the last execution outcome was recorded, if any.
    ///
    /// Drives the reputation time-decay term; not named explicitly among the
    /// stored attributes but required to compute it, so it is carried here.
    pub last_execution_at: Option<DateTime<Utc>>,
}

impl AgentProfile {
    /// Constructs a new profile, validating invariants at construction time.
    ///
    /// `staked_amount`, `reputation_score`, `total_executions`, and
    /// `successful_executions` all start at their zero/neutral values; they
    /// are populated by [`register_agent`](crate::Registry::register_agent)
    /// once a tier has been determined.
    pub fn new(
        owner_address: impl Into<String>,
        agent_id: impl Into<String>,
        metadata_uri: impl Into<String>,
        capabilities: HashSet<String>,
        framework_version: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, Error> {
        if capabilities.is_empty() {
            return Err(Error::EmptyCapabilities);
        }
        Ok(Self {
            owner_address: owner_address.into(),
            agent_id: agent_id.into(),
            metadata_uri: metadata_uri.into(),
            staked_amount: Decimal::ZERO,
            reputation_score: 0.0,
            capabilities,
            total_executions: 0,
            successful_executions: 0,
            framework_version: framework_version.into(),
            created_at,
            last_execution_at: None,
        })
    }
}

impl Hashable for AgentProfile {
    fn to_canonical(&self) -> CanonicalValue {
        let mut caps: Vec<&String> = self.capabilities.iter().collect();
        caps.sort();
        CanonicalValue::map(vec![
            ("owner_address".to_string(), CanonicalValue::Str(self.owner_address.clone())),
            ("agent_id".to_string(), CanonicalValue::Str(self.agent_id.clone())),
            ("metadata_uri".to_string(), CanonicalValue::Str(self.metadata_uri.clone())),
            (
                "capabilities".to_string(),
                CanonicalValue::Seq(caps.into_iter().map(|c| CanonicalValue::Str(c.clone())).collect()),
            ),
            ("framework_version".to_string(), CanonicalValue::Str(self.framework_version.clone())),
            ("created_at".to_string(), CanonicalValue::Timestamp(self.created_at)),
        ])
    }
}

/// A single allowed or protected field targeted by `update_agent_profile`.
///
/// Only the allowed variants may ever mutate state; the protected variants
/// exist so that an attempted update of them is rejected with
/// [`Error::Unauthorized`] rather than silently ignored.
#[derive(Debug, Clone)]
pub enum ProfileField {
    /// Replace the off-chain metadata URI.
    MetadataUri(String),
    /// Replace the declared capability set.
    Capabilities(HashSet<String>),
    /// Replace the declared framework version.
    FrameworkVersion(String),
    /// Protected: mutates only via `register_agent`/`deregister_agent`.
    StakedAmount(Decimal),
    /// Protected: mutates only via `record_execution_outcome`.
    ReputationScore(f64),
    /// Protected: mutates only via `record_execution_outcome`.
    TotalExecutions(u64),
    /// Protected: mutates only via `record_execution_outcome`.
    SuccessfulExecutions(u64),
}

impl ProfileField {
    /// The stable field name, used in `Error::Unauthorized` messages.
    pub fn name(&self) -> &'static str {
        match self {
            ProfileField::MetadataUri(_) => "metadata_uri",
            ProfileField::Capabilities(_) => "capabilities",
            ProfileField::FrameworkVersion(_) => "framework_version",
            ProfileField::StakedAmount(_) => "staked_amount",
            ProfileField::ReputationScore(_) => "reputation_score",
            ProfileField::TotalExecutions(_) => "total_executions",
            ProfileField::SuccessfulExecutions(_) => "successful_executions",
        }
    }

    /// Whether this field may only be mutated by the registry itself.
    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            ProfileField::StakedAmount(_)
                | ProfileField::ReputationScore(_)
                | ProfileField::TotalExecutions(_)
                | ProfileField::SuccessfulExecutions(_)
        )
    }
}

/// Result of a successful `register_agent` call.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Registration {
    /// The newly registered agent's id.
    pub agent_id: String,
    /// The tier assigned given the offered stake and declared capabilities.
    pub tier: StakeTier,
    /// The stake actually required for the assigned tier.
    pub required_stake: Decimal,
}

/// Result of a successful `deregister_agent` call.
#[derive(Debug, Clone, serde::Serialize)]
pub struct StakeReturn {
    /// The deregistered agent's id.
    pub agent_id: String,
    /// The amount of stake released back to the owner.
    pub amount: Decimal,
}

/// A read-only discovery projection of an [`AgentProfile`].
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AgentView {
    /// The agent's id.
    pub agent_id: String,
    /// The agent's owner address.
    pub owner_address: String,
    /// The agent's declared capabilities.
    pub capabilities: Vec<String>,
    /// Effective reputation at query time (base × decay + stake bonus, capped at 1.0).
    pub reputation: f64,
    /// Current stake.
    pub staked_amount: Decimal,
    /// Current tier, derived from stake and capabilities.
    pub tier: StakeTier,
    /// When the agent was registered.
    pub created_at: DateTime<Utc>,
}
