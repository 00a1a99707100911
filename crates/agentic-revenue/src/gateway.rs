//! The transfer capability the Revenue Distributor depends on to settle claims.

use agentic_nft_gateway::Error;
use agentic_nft_gateway::models::mint::{AssetMetadata, MintRequest, single_asset_metadata};

/// Submits a claim settlement transfer, returning its transaction id.
#[async_trait::async_trait]
pub trait TransferGateway: Send + Sync {
    /// Transfers `amount` of the native unit to `recipient_address`,
    /// returning the settlement transaction id.
    async fn transfer(
        &self,
        recipient_address: &str,
        amount: rust_decimal::Decimal,
        idempotency_key: &str,
    ) -> Result<String, Error>;
}

#[async_trait::async_trait]
impl TransferGateway for agentic_nft_gateway::NftGatewayClient {
    async fn transfer(
        &self,
        recipient_address: &str,
        amount: rust_decimal::Decimal,
        idempotency_key: &str,
    ) -> Result<String, Error> {
        let policy_id = self.policy_id().to_string();
        let asset_name = format!("claim-{idempotency_key}");
        let metadata = single_asset_metadata(
            &policy_id,
            &asset_name,
            AssetMetadata {
                name: format!("Revenue Claim {idempotency_key}"),
                description: format!("Claim transfer of {amount} to {recipient_address}"),
                image: None,
                properties: Default::default(),
            },
        );
        let request = MintRequest {
            idempotency_key: idempotency_key.to_string(),
            asset_name,
            recipient_address: recipient_address.to_string(),
            policy_id,
            metadata,
        };
        let response = self.mint(&request).await?;
        Ok(response.transaction_id)
    }
}
