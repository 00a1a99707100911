//! The Cross-Chain Directory (`C6a`): multi-network service advertisement.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use agentic_compliance::{Action, ComplianceGate, Decision};
use agentic_hash::{CanonicalValue, Hashable};
use agentic_registry::Registry;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::error::Error;
use crate::gateway::DirectoryGateway;
use crate::models::{CrossChainRecord, CrossChainRegistration, Network};

/// The Cross-Chain Directory.
///
/// Owns the sole `records` store, keyed by `cross_chain_id`. Each call to
/// [`Directory::register_cross_chain_service`] produces a brand new record:
/// re-advertising a network already covered by an earlier record (as in
/// `spec.md` §8 scenario 6, where `[ethereum]` is re-advertised after an
/// earlier `[ethereum, polygon]` call) is allowed, since the networks set
/// differs and therefore so does the derived `cross_chain_id`. Uniqueness is
/// only enforced *within* a single call's network list.
pub struct Directory {
    records: RwLock<HashMap<String, CrossChainRecord>>,
    compliance: Arc<ComplianceGate>,
    registry: Arc<Registry>,
    gateway: Arc<dyn DirectoryGateway>,
}

impl Directory {
    /// Creates an empty directory gated by `compliance`, checking agent
    /// existence against `registry`, and minting advertisements through
    /// `gateway`.
    pub fn new(
        compliance: Arc<ComplianceGate>,
        registry: Arc<Registry>,
        gateway: Arc<dyn DirectoryGateway>,
    ) -> Self {
        Self { records: RwLock::new(HashMap::new()), compliance, registry, gateway }
    }

    /// Advertises `agent_id` on every network in `networks`, producing one
    /// local mint per network and a shared `cross_chain_id`.
    pub async fn register_cross_chain_service(
        &self,
        agent_id: &str,
        networks: Vec<Network>,
    ) -> Result<CrossChainRecord, Error> {
        if networks.is_empty() {
            return Err(Error::EmptyNetworks);
        }
        let mut seen = HashSet::new();
        for network in &networks {
            if !seen.insert(network.as_str()) {
                return Err(Error::DuplicateNetwork(network.as_str().to_string()));
            }
        }

        if !self.registry.agent_exists(agent_id).await {
            return Err(Error::AgentNotFound(agent_id.to_string()));
        }

        match self.compliance.evaluate(agent_id, Action::RegisterCrossChainService, Decimal::ZERO).await? {
            Decision::Allow => {}
            Decision::Deny => return Err(Error::ComplianceDenied),
            Decision::RequireInfo => return Err(Error::ComplianceRequiresInfo),
        }

        let created_at = Utc::now();
        let mut sorted_networks: Vec<&str> = networks.iter().map(|n| n.as_str()).collect();
        sorted_networks.sort_unstable();
        let cross_chain_id = agentic_hash::hash_of(&CrossChainIdPreimage {
            agent_id,
            sorted_networks: &sorted_networks,
            timestamp: created_at,
        })?;

        let mut registrations = Vec::with_capacity(networks.len());
        for network in networks {
            let registration_transaction_id =
                self.gateway.mint_registration(agent_id, network, &cross_chain_id).await?;
            registrations.push(CrossChainRegistration {
                agent_id: agent_id.to_string(),
                network,
                registration_transaction_id,
                cross_chain_id: cross_chain_id.clone(),
            });
        }

        let record = CrossChainRecord {
            cross_chain_id: cross_chain_id.clone(),
            agent_id: agent_id.to_string(),
            registrations,
            created_at,
        };
        self.records.write().await.insert(cross_chain_id, record.clone());
        Ok(record)
    }

    /// Returns the record for `cross_chain_id`, if any.
    pub async fn get_record(&self, cross_chain_id: &str) -> Option<CrossChainRecord> {
        self.records.read().await.get(cross_chain_id).cloned()
    }
}

struct CrossChainIdPreimage<'a> {
    agent_id: &'a str,
    sorted_networks: &'a [&'a str],
    timestamp: chrono::DateTime<Utc>,
}

impl Hashable for CrossChainIdPreimage<'_> {
    fn to_canonical(&self) -> CanonicalValue {
        CanonicalValue::map(vec![
            ("agent_id".to_string(), CanonicalValue::Str(self.agent_id.to_string())),
            (
                "networks".to_string(),
                CanonicalValue::Seq(self.sorted_networks.iter().map(|n| CanonicalValue::Str(n.to_string())).collect()),
            ),
            ("timestamp".to_string(), CanonicalValue::Timestamp(self.timestamp)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap as StdHashMap;

    use agentic_registry::RegistryConfig;
    use serde_json::json;

    use super::*;

    fn allow_all_gate() -> Arc<ComplianceGate> {
        #[derive(Debug)]
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

        Arc::new(ComplianceGate::new(Arc::new(AllowEverything)))
    }

    struct FakeGateway;

    #[async_trait::async_trait]
    impl DirectoryGateway for FakeGateway {
        async fn mint_registration(
            &self,
            agent_id: &str,
            network: Network,
            cross_chain_id: &str,
        ) -> Result<String, agentic_nft_gateway::Error> {
            Ok(format!("tx-{agent_id}-{}-{cross_chain_id}", network.as_str()))
        }
    }

    async fn setup() -> (Directory, Arc<Registry>) {
        let compliance = allow_all_gate();
        let registry = Arc::new(Registry::new(compliance.clone(), RegistryConfig::default()));
        let directory = Directory::new(compliance, registry.clone(), Arc::new(FakeGateway));
        (directory, registry)
    }

    async fn register_agent(registry: &Registry) {
        use agentic_registry::AgentProfile;
        use std::collections::HashSet as StdHashSet;

        let profile = AgentProfile::new(
            "owner-1".to_string(),
            "agent-1".to_string(),
            "ipfs://meta".to_string(),
            StdHashSet::from(["translation".to_string()]),
            "1.0".to_string(),
            Utc::now(),
        )
        .unwrap();
        registry.register_agent(profile, rust_decimal_macros::dec!(100)).await.unwrap();
    }

    #[tokio::test]
    async fn scenario_cross_chain_registration_reuses_networks_in_later_call() {
        let (directory, registry) = setup().await;
        register_agent(&registry).await;

        let first = directory
            .register_cross_chain_service("agent-1", vec![Network::Ethereum, Network::Polygon])
            .await
            .unwrap();
        assert_eq!(first.registrations.len(), 2);

        let second =
            directory.register_cross_chain_service("agent-1", vec![Network::Ethereum]).await.unwrap();
        assert_ne!(first.cross_chain_id, second.cross_chain_id);
        assert_eq!(second.registrations.len(), 1);
    }

    #[tokio::test]
    async fn duplicate_network_within_one_call_is_rejected() {
        let (directory, registry) = setup().await;
        register_agent(&registry).await;

        let err = directory
            .register_cross_chain_service("agent-1", vec![Network::Ethereum, Network::Ethereum])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateNetwork(_)));
    }

    #[tokio::test]
    async fn unregistered_agent_is_rejected() {
        let (directory, _registry) = setup().await;
        let err = directory.register_cross_chain_service("ghost", vec![Network::Solana]).await.unwrap_err();
        assert!(matches!(err, Error::AgentNotFound(_)));
    }

    #[tokio::test]
    async fn empty_network_list_is_rejected() {
        let (directory, registry) = setup().await;
        register_agent(&registry).await;
        let err = directory.register_cross_chain_service("agent-1", vec![]).await.unwrap_err();
        assert!(matches!(err, Error::EmptyNetworks));
    }
}
