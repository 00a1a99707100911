//! Cross-chain advertisement data models.

use chrono::{DateTime, Utc};

/// The fixed enumeration of external networks an agent may advertise on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Network {
    /// Cardano mainnet/testnet, the local chain itself.
    Cardano,
    /// Ethereum.
    Ethereum,
    /// Polygon.
    Polygon,
    /// Solana.
    Solana,
    /// Avalanche.
    Avalanche,
    /// Arbitrum.
    Arbitrum,
    /// Binance Smart Chain.
    Bsc,
    /// Fantom.
    Fantom,
}

impl Network {
    /// A stable lowercase identifier, used in the `cross_chain_id` preimage
    /// and as the canonical key for `(agent_id, network)` uniqueness checks.
    pub fn as_str(self) -> &'static str {
        match self {
            Network::Cardano => "cardano",
            Network::Ethereum => "ethereum",
            Network::Polygon => "polygon",
            Network::Solana => "solana",
            Network::Avalanche => "avalanche",
            Network::Arbitrum => "arbitrum",
            Network::Bsc => "bsc",
            Network::Fantom => "fantom",
        }
    }
}

impl std::str::FromStr for Network {
    type Err = crate::error::Error;

    /// Parses a network identifier, e.g. from CLI input or a config file.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cardano" => Ok(Network::Cardano),
            "ethereum" => Ok(Network::Ethereum),
            "polygon" => Ok(Network::Polygon),
            "solana" => Ok(Network::Solana),
            "avalanche" => Ok(Network::Avalanche),
            "arbitrum" => Ok(Network::Arbitrum),
            "bsc" => Ok(Network::Bsc),
            "fantom" => Ok(Network::Fantom),
            other => Err(crate::error::Error::UnknownNetwork(other.to_string())),
        }
    }
}

/// A single network's advertisement within a [`CrossChainRecord`].
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CrossChainRegistration {
    /// The local agent id being advertised.
    pub agent_id: String,
    /// The external network advertised on.
    pub network: Network,
    /// The local-chain transaction id produced for this network's advertisement.
    pub registration_transaction_id: String,
    /// The cross-chain id shared by every registration in the same call.
    pub cross_chain_id: String,
}

/// The result of a single `register_cross_chain_service` call, covering one
/// or more networks advertised together under one `cross_chain_id`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CrossChainRecord {
    /// `H(agent_id || sorted_networks || timestamp)`, shared across this
    /// call's per-network registrations.
    pub cross_chain_id: String,
    /// The advertised agent id.
    pub agent_id: String,
    /// Per-network registrations produced by this call.
    pub registrations: Vec<CrossChainRegistration>,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn from_str_round_trips_through_as_str() {
        for network in
            [Network::Cardano, Network::Ethereum, Network::Polygon, Network::Solana, Network::Avalanche, Network::Arbitrum, Network::Bsc, Network::Fantom]
        {
            assert_eq!(Network::from_str(network.as_str()).unwrap(), network);
        }
    }

    #[test]
    fn from_str_rejects_unknown_network() {
        let err = Network::from_str("dogecoin").unwrap_err();
        assert!(matches!(err, crate::error::Error::UnknownNetwork(ref n) if n == "dogecoin"));
    }
}
