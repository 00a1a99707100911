//! The staked agent registry: registration, updates, execution outcomes,
//! deregistration, and capability-based discovery.

use std::collections::HashMap;
use std::sync::Arc;

use agentic_compliance::{Action, ComplianceGate, Decision};
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::error::Error;
use crate::models::profile::ProfileField;
use crate::models::tier::{self, MinStakePerTier, StakeTier};
use crate::models::{AgentProfile, AgentView, Registration, StakeReturn};
use crate::reputation::effective_reputation;

/// Configuration for a [`Registry`] instance.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Per-tier minimum base stake, overriding the built-in defaults.
    pub min_stake_per_tier: MinStakePerTier,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { min_stake_per_tier: tier::default_min_stake_per_tier() }
    }
}

/// The staked agent registry.
///
/// Owns the sole `agents` store and serializes all mutations behind one
/// `RwLock`; cross-component calls (e.g. from `agentic-escrow` crediting
/// reputation) go exclusively through [`Registry::record_execution_outcome`],
/// never a borrowed [`AgentProfile`].
#[derive(Debug)]
pub struct Registry {
    agents: RwLock<HashMap<String, AgentProfile>>,
    compliance: Arc<ComplianceGate>,
    config: RegistryConfig,
}

impl Registry {
    /// Creates an empty registry gated by `compliance`.
    pub fn new(compliance: Arc<ComplianceGate>, config: RegistryConfig) -> Self {
        Self { agents: RwLock::new(HashMap::new()), compliance, config }
    }

    async fn require_allowed(&self, subject: &str, action: Action, stake: Decimal) -> Result<(), Error> {
        match self.compliance.evaluate(subject, action, stake).await? {
            Decision::Allow => Ok(()),
            Decision::Deny => Err(Error::ComplianceDenied),
            Decision::RequireInfo => Err(Error::ComplianceRequiresInfo),
        }
    }

    /// Registers a new agent, computing its tier from the offered stake and
    /// declared capabilities.
    ///
    /// `profile` must have been constructed via [`AgentProfile::new`], which
    /// already rejects an empty capability set; this additionally rejects a
    /// duplicate `agent_id` and an offered stake below the basic tier's
    /// requirement.
    pub async fn register_agent(
        &self,
        mut profile: AgentProfile,
        stake: Decimal,
    ) -> Result<Registration, Error> {
        self.require_allowed(&profile.owner_address, Action::RegisterAgent, stake).await?;

        let caps: Vec<String> = profile.capabilities.iter().cloned().collect();
        let tier = tier::tier_for_stake(&self.config.min_stake_per_tier, &caps, stake).ok_or_else(|| {
            Error::InsufficientStake {
                provided: stake,
                required: tier::required_stake_for_tier(
                    &self.config.min_stake_per_tier,
                    tier::minimum_eligible_tier(&caps),
                    &caps,
                ),
            }
        })?;
        let required_stake = tier::required_stake_for_tier(&self.config.min_stake_per_tier, tier, &caps);

        let mut agents = self.agents.write().await;
        if agents.contains_key(&profile.agent_id) {
            return Err(Error::AlreadyRegistered(profile.agent_id));
        }
        profile.staked_amount = stake;
        let agent_id = profile.agent_id.clone();
        agents.insert(agent_id.clone(), profile);
        Ok(Registration { agent_id, tier, required_stake })
    }

    /// Updates mutable profile fields. Any field in `updates` named as
    /// protected is rejected with [`Error::Unauthorized`] and no field in the
    /// batch is applied — the update is all-or-nothing.
    pub async fn update_agent_profile(
        &self,
        agent_id: &str,
        updates: Vec<ProfileField>,
    ) -> Result<(), Error> {
        if let Some(protected) = updates.iter().find(|f| f.is_protected()) {
            return Err(Error::Unauthorized(protected.name().to_string()));
        }

        let mut agents = self.agents.write().await;
        let profile = agents.get(agent_id).ok_or_else(|| Error::NotFound(agent_id.to_string()))?;
        self.require_allowed(&profile.owner_address, Action::UpdateAgentProfile, profile.staked_amount)
            .await?;

        let profile = agents.get_mut(agent_id).ok_or_else(|| Error::NotFound(agent_id.to_string()))?;
        for field in updates {
            match field {
                ProfileField::MetadataUri(uri) => profile.metadata_uri = uri,
                ProfileField::Capabilities(caps) => profile.capabilities = caps,
                ProfileField::FrameworkVersion(v) => profile.framework_version = v,
                ProfileField::StakedAmount(_)
                | ProfileField::ReputationScore(_)
                | ProfileField::TotalExecutions(_)
                | ProfileField::SuccessfulExecutions(_) => unreachable!("protected fields rejected above"),
            }
        }
        Ok(())
    }

    /// Records the outcome of an agent execution, updating the stored base
    /// reputation score. Invoked by the Escrow Engine on settlement.
    pub async fn record_execution_outcome(&self, agent_id: &str, success: bool) -> Result<(), Error> {
        let mut agents = self.agents.write().await;
        let profile = agents.get(agent_id).ok_or_else(|| Error::NotFound(agent_id.to_string()))?;
        self.require_allowed(
            &profile.owner_address,
            Action::RecordExecutionOutcome,
            profile.staked_amount,
        )
        .await?;

        let profile = agents.get_mut(agent_id).ok_or_else(|| Error::NotFound(agent_id.to_string()))?;
        profile.total_executions += 1;
        if success {
            profile.successful_executions += 1;
        }
        profile.reputation_score = profile.successful_executions as f64 / profile.total_executions.max(1) as f64;
        profile.last_execution_at = Some(Utc::now());
        Ok(())
    }

    /// Deregisters an agent, releasing its stake and removing it from
    /// discovery. The historical profile record is retained for audit.
    pub async fn deregister_agent(&self, agent_id: &str) -> Result<StakeReturn, Error> {
        let mut agents = self.agents.write().await;
        let profile = agents.get(agent_id).ok_or_else(|| Error::NotFound(agent_id.to_string()))?;
        self.require_allowed(&profile.owner_address, Action::DeregisterAgent, profile.staked_amount)
            .await?;

        let profile = agents.get_mut(agent_id).ok_or_else(|| Error::NotFound(agent_id.to_string()))?;
        let amount = profile.staked_amount;
        profile.staked_amount = Decimal::ZERO;
        Ok(StakeReturn { agent_id: agent_id.to_string(), amount })
    }

    /// Returns whether `agent_id` currently exists (with non-zero stake),
    /// used by `agentic-directory` to enforce its local-existence precondition.
    pub async fn agent_exists(&self, agent_id: &str) -> bool {
        self.agents.read().await.contains_key(agent_id)
    }

    /// Finds agents whose declared capabilities are a superset of
    /// `capabilities` and whose effective reputation is at least
    /// `min_reputation`, sorted by (reputation desc, stake desc, created_at
    /// asc) and capped at `max_n` (itself capped at 1000).
    pub async fn find_agents(
        &self,
        capabilities: &[String],
        min_reputation: f64,
        max_n: usize,
    ) -> Vec<AgentView> {
        let cap = max_n.min(1000);
        let now = Utc::now();
        let agents = self.agents.read().await;

        let mut views: Vec<AgentView> = agents
            .values()
            .filter(|p| p.staked_amount > Decimal::ZERO)
            .filter(|p| capabilities.iter().all(|c| p.capabilities.contains(c)))
            .filter_map(|p| {
                let reputation =
                    effective_reputation(p.reputation_score, p.last_execution_at, now, p.staked_amount);
                if reputation < min_reputation {
                    return None;
                }
                let caps: Vec<String> = p.capabilities.iter().cloned().collect();
                let tier = tier::tier_for_stake(&self.config.min_stake_per_tier, &caps, p.staked_amount)
                    .unwrap_or(StakeTier::Basic);
                Some(AgentView {
                    agent_id: p.agent_id.clone(),
                    owner_address: p.owner_address.clone(),
                    capabilities: caps,
                    reputation,
                    staked_amount: p.staked_amount,
                    tier,
                    created_at: p.created_at,
                })
            })
            .collect();

        views.sort_by(|a, b| {
            b.reputation
                .partial_cmp(&a.reputation)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(b.staked_amount.cmp(&a.staked_amount))
                .then(a.created_at.cmp(&b.created_at))
        });
        views.truncate(cap);
        views
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use agentic_compliance::client::InMemoryAttributeStore;
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    fn profile(owner: &str, agent_id: &str, caps: &[&str]) -> AgentProfile {
        AgentProfile::new(
            owner,
            agent_id,
            "ipfs://meta",
            caps.iter().map(|s| s.to_string()).collect(),
            "1.0.0",
            Utc::now(),
        )
        .expect("valid profile")
    }

    fn allow_all_gate() -> Arc<ComplianceGate> {
        use agentic_compliance::{AttributePredicate, PolicyRule};

        struct AllowEverything;
        #[async_trait::async_trait]
        impl agentic_compliance::client::AttributeStore for AllowEverything {
            async fn get_attributes(
                &self,
                _subject_hash: &str,
            ) -> Result<HashMap<String, serde_json::Value>, agentic_compliance::Error> {
                Ok(HashMap::from([("known".to_string(), json!(true))]))
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
                Action::RegisterAgent,
                Action::UpdateAgentProfile,
                Action::RecordExecutionOutcome,
                Action::DeregisterAgent,
            ],
            minimum_stake: Decimal::ZERO,
        };
        Arc::new(ComplianceGate::with_rules(Arc::new(AllowEverything), vec![rule]))
    }

    #[tokio::test]
    async fn scenario_insufficient_stake_at_standard_tier() {
        let registry = Registry::new(allow_all_gate(), RegistryConfig::default());
        let p = profile("owner-1", "agent-1", &["blockchain"]);
        let err = registry.register_agent(p, dec!(500)).await.unwrap_err();
        match err {
            Error::InsufficientStake { provided, required } => {
                assert_eq!(provided, dec!(500));
                assert_eq!(required, dec!(1000));
            }
            other => panic!("expected InsufficientStake, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn scenario_professional_tier_at_4000() {
        let registry = Registry::new(allow_all_gate(), RegistryConfig::default());
        let p = profile("owner-1", "agent-1", &["blockchain"]);
        let reg = registry.register_agent(p, dec!(4000)).await.unwrap();
        assert_eq!(reg.tier, StakeTier::Professional);
        assert_eq!(reg.required_stake, dec!(4000));
    }

    #[tokio::test]
    async fn duplicate_agent_id_is_rejected() {
        let registry = Registry::new(allow_all_gate(), RegistryConfig::default());
        let p1 = profile("owner-1", "agent-1", &["ai_analysis"]);
        let p2 = profile("owner-2", "agent-1", &["ai_analysis"]);
        registry.register_agent(p1, dec!(1000)).await.unwrap();
        let err = registry.register_agent(p2, dec!(1000)).await.unwrap_err();
        assert!(matches!(err, Error::AlreadyRegistered(_)));
    }

    #[tokio::test]
    async fn protected_fields_cannot_be_updated() {
        let registry = Registry::new(allow_all_gate(), RegistryConfig::default());
        let p = profile("owner-1", "agent-1", &["ai_analysis"]);
        registry.register_agent(p, dec!(1000)).await.unwrap();

        let err = registry
            .update_agent_profile("agent-1", vec![ProfileField::ReputationScore(1.0)])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Unauthorized(ref field) if field == "reputation_score"));

        // Verify no partial application: staked_amount untouched.
        let views = registry.find_agents(&[], 0.0, 10).await;
        assert_eq!(views[0].staked_amount, dec!(1000));
    }

    #[tokio::test]
    async fn allowed_fields_update_successfully() {
        let registry = Registry::new(allow_all_gate(), RegistryConfig::default());
        let p = profile("owner-1", "agent-1", &["ai_analysis"]);
        registry.register_agent(p, dec!(1000)).await.unwrap();
        registry
            .update_agent_profile("agent-1", vec![ProfileField::MetadataUri("ipfs://new".to_string())])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn execution_outcome_increments_counters() {
        let registry = Registry::new(allow_all_gate(), RegistryConfig::default());
        let p = profile("owner-1", "agent-1", &["ai_analysis"]);
        registry.register_agent(p, dec!(1000)).await.unwrap();
        registry.record_execution_outcome("agent-1", true).await.unwrap();
        registry.record_execution_outcome("agent-1", false).await.unwrap();

        let views = registry.find_agents(&[], 0.0, 10).await;
        // two executions recorded; exact reputation value is covered by `reputation` tests.
        assert_eq!(views.len(), 1);
    }

    #[tokio::test]
    async fn discovery_filters_by_capability_superset_and_caps_results() {
        let registry = Registry::new(allow_all_gate(), RegistryConfig::default());
        registry
            .register_agent(profile("owner-1", "agent-1", &["ai_analysis", "web_automation"]), dec!(2000))
            .await
            .unwrap();
        registry.register_agent(profile("owner-2", "agent-2", &["ai_analysis"]), dec!(1500)).await.unwrap();

        let found = registry.find_agents(&["ai_analysis".to_string(), "web_automation".to_string()], 0.0, 10).await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].agent_id, "agent-1");
    }

    #[tokio::test]
    async fn discovery_is_deterministic_across_repeated_calls() {
        let registry = Registry::new(allow_all_gate(), RegistryConfig::default());
        registry.register_agent(profile("owner-1", "agent-1", &["ai_analysis"]), dec!(2000)).await.unwrap();
        registry.register_agent(profile("owner-2", "agent-2", &["ai_analysis"]), dec!(1500)).await.unwrap();

        let first = registry.find_agents(&[], 0.0, 10).await;
        let second = registry.find_agents(&[], 0.0, 10).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn deregistration_releases_stake() {
        let registry = Registry::new(allow_all_gate(), RegistryConfig::default());
        registry.register_agent(profile("owner-1", "agent-1", &["ai_analysis"]), dec!(1000)).await.unwrap();
        let ret = registry.deregister_agent("agent-1").await.unwrap();
        assert_eq!(ret.amount, dec!(1000));

        let found = registry.find_agents(&[], 0.0, 10).await;
        assert!(found.is_empty(), "deregistered agent with zero stake is excluded from discovery");
    }

    #[tokio::test]
    async fn unknown_owner_is_denied_by_default_gate() {
        let gate = Arc::new(ComplianceGate::new(Arc::new(InMemoryAttributeStore::new())));
        let registry = Registry::new(gate, RegistryConfig::default());
        let p = profile("some-other-owner", "agent-1", &["ai_analysis"]);
        let err = registry.register_agent(p, dec!(1000)).await.unwrap_err();
        assert!(matches!(err, Error::ComplianceDenied));
    }
}
