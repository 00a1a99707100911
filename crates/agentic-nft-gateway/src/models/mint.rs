//! CIP-25-style mint request/response models.

use std::collections::HashMap;

/// Domain-specific attributes carried in a mint's `properties` sub-map:
/// methodology, results, and verification data for the proof or record the
/// mint represents.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct AssetProperties {
    /// Free-form description of how the underlying result was produced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub methodology: Option<String>,
    /// Free-form summary of the result being attested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<serde_json::Value>,
    /// Verification material (e.g. the canonical hash the mint attests to).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<String>,
}

/// A single CIP-25-style asset metadata entry.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AssetMetadata {
    /// Asset display name.
    pub name: String,
    /// Asset description.
    pub description: String,
    /// URI of an associated image (often an IPFS URI).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Domain attributes.
    pub properties: AssetProperties,
}

/// Nested CIP-25 metadata map: policy id → asset name → metadata.
pub type CipMetadata = HashMap<String, HashMap<String, AssetMetadata>>;

/// Request body for submitting a mint to the NFT issuer.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintRequest {
    /// Idempotency key (UUID) to deduplicate retried submissions.
    pub idempotency_key: String,
    /// Asset name being minted.
    pub asset_name: String,
    /// On-chain recipient address.
    pub recipient_address: String,
    /// Policy id under which the asset is minted.
    pub policy_id: String,
    /// CIP-25-style metadata for the asset.
    pub metadata: CipMetadata,
}

/// Response returned by the NFT issuer on a successful mint submission.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintResponse {
    /// The blockchain transaction id the mint was submitted in.
    pub transaction_id: String,
    /// The minted asset's identifier.
    pub asset_id: String,
}

/// Builds a single-asset [`CipMetadata`] map, the common case for this
/// crate's callers (one settlement, cross-chain registration, or proof
/// record per mint).
pub fn single_asset_metadata(policy_id: &str, asset_name: &str, metadata: AssetMetadata) -> CipMetadata {
    let mut by_asset = HashMap::new();
    by_asset.insert(asset_name.to_string(), metadata);
    let mut by_policy = HashMap::new();
    by_policy.insert(policy_id.to_string(), by_asset);
    by_policy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_asset_metadata_nests_by_policy_then_asset() {
        let metadata = single_asset_metadata(
            "policy1",
            "asset1",
            AssetMetadata {
                name: "n".to_string(),
                description: "d".to_string(),
                image: None,
                properties: AssetProperties::default(),
            },
        );
        assert!(metadata.contains_key("policy1"));
        assert!(metadata["policy1"].contains_key("asset1"));
    }

    #[test]
    fn mint_request_serializes_camel_case() {
        let req = MintRequest {
            idempotency_key: "k".to_string(),
            asset_name: "asset1".to_string(),
            recipient_address: "addr1".to_string(),
            policy_id: "policy1".to_string(),
            metadata: single_asset_metadata(
                "policy1",
                "asset1",
                AssetMetadata {
                    name: "n".to_string(),
                    description: "d".to_string(),
                    image: None,
                    properties: AssetProperties::default(),
                },
            ),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("recipientAddress"));
        assert!(json.contains("policyId"));
    }
}
