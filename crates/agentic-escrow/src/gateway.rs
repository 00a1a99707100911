//! The settlement-mint capability the Escrow Engine depends on.
//!
//! A trait boundary (rather than a concrete `NftGatewayClient` field)
//! matches the "explicitly injected gateway capability" pattern: it lets
//! tests swap in an in-memory double instead of dialing a real NMKR-style
//! endpoint.

use agentic_nft_gateway::Error;
use agentic_nft_gateway::models::mint::{MintRequest, MintResponse};

/// Submits settlement mint requests on behalf of the Escrow Engine.
#[async_trait::async_trait]
pub trait SettlementGateway: Send + Sync {
    /// The policy id this gateway mints settlement assets under.
    fn policy_id(&self) -> &str;

    /// Submits a mint request, returning the resulting transaction/asset ids.
    async fn mint(&self, req: &MintRequest) -> Result<MintResponse, Error>;
}

#[async_trait::async_trait]
impl SettlementGateway for agentic_nft_gateway::NftGatewayClient {
    fn policy_id(&self) -> &str {
        agentic_nft_gateway::NftGatewayClient::policy_id(self)
    }

    async fn mint(&self, req: &MintRequest) -> Result<MintResponse, Error> {
        agentic_nft_gateway::NftGatewayClient::mint(self, req).await
    }
}
