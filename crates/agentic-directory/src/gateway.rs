//! The per-network local registration-mint capability the Directory depends on.

use agentic_nft_gateway::Error;
use agentic_nft_gateway::models::mint::{AssetMetadata, MintRequest, single_asset_metadata};

use crate::models::Network;

/// Submits a local-chain mint advertising an agent's presence on `network`.
///
/// `spec.md` §4.5 only advertises the agent; it never executes the remote
/// network's own registration, so this mint is always submitted on the
/// *local* chain regardless of which `Network` is being advertised.
#[async_trait::async_trait]
pub trait DirectoryGateway: Send + Sync {
    /// Mints the local advertisement record, returning its transaction id.
    async fn mint_registration(
        &self,
        agent_id: &str,
        network: Network,
        cross_chain_id: &str,
    ) -> Result<String, Error>;
}

#[async_trait::async_trait]
impl DirectoryGateway for agentic_nft_gateway::NftGatewayClient {
    async fn mint_registration(
        &self,
        agent_id: &str,
        network: Network,
        cross_chain_id: &str,
    ) -> Result<String, Error> {
        let policy_id = self.policy_id().to_string();
        let asset_name = format!("xchain-{cross_chain_id}-{}", network.as_str());
        let metadata = single_asset_metadata(
            &policy_id,
            &asset_name,
            AssetMetadata {
                name: format!("{agent_id} on {}", network.as_str()),
                description: format!("Cross-chain advertisement of {agent_id} on {}", network.as_str()),
                image: None,
                properties: Default::default(),
            },
        );
        let request = MintRequest {
            idempotency_key: asset_name.clone(),
            asset_name,
            recipient_address: agent_id.to_string(),
            policy_id,
            metadata,
        };
        let response = self.mint(&request).await?;
        Ok(response.transaction_id)
    }
}
