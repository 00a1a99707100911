//! HTTP client for the blockchain-query boundary.

use std::time::Duration;

use rust_decimal::Decimal;

use crate::{
    error::Error,
    models::{AddressBalanceResponse, ApiErrorBody, BlockHeightResponse},
};

/// Async HTTP client for a Blockfrost-style read-only chain-query service.
///
/// This boundary is opaque per `spec.md` §6: only balance and block-height
/// lookups are exposed, never transaction submission or consensus state.
pub struct ChainQueryClient {
    base_url: String,
    api_key: String,
    http: hpx::Client,
    timeout: Duration,
}

impl std::fmt::Debug for ChainQueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainQueryClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl ChainQueryClient {
    /// Creates a new client with a default 30s timeout.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self::with_timeout(api_key, base_url, Duration::from_millis(30_000))
    }

    /// Creates a new client with a caller-supplied timeout.
    pub fn with_timeout(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self { base_url: base_url.into(), api_key: api_key.into(), http: hpx::Client::new(), timeout }
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = format!("{}{}", self.base_url, path);
        let send = self.http.get(&url).header("Authorization", format!("Bearer {}", self.api_key)).send();

        let resp = match tokio::time::timeout(self.timeout, send).await {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) => return Err(Error::TransportFailed(e.to_string())),
            Err(_) => return Err(Error::TransportTimeout(self.timeout.as_millis() as u64)),
        };

        if resp.status().is_success() {
            resp.json::<T>().await.map_err(|e| Error::TransportFailed(e.to_string()))
        } else {
            let err: ApiErrorBody = resp.json().await.map_err(|e| Error::TransportFailed(e.to_string()))?;
            Err(Error::Api { code: err.code, message: err.message })
        }
    }

    /// Returns the current balance held at `address`.
    pub async fn get_address_balance(&self, address: &str) -> Result<Decimal, Error> {
        if address.trim().is_empty() {
            return Err(Error::InvalidAddressFormat("address must not be empty".to_string()));
        }
        let path = format!("/addresses/{address}/balance");
        let resp: AddressBalanceResponse = self.get(&path).await?;
        resp.balance.parse::<Decimal>().map_err(|e| Error::InvalidDecimal(e.to_string()))
    }

    /// Returns the current block height of the chain tip.
    pub async fn get_current_block_height(&self) -> Result<u64, Error> {
        let resp: BlockHeightResponse = self.get("/blocks/latest/height").await?;
        Ok(resp.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_address_is_rejected_before_any_request() {
        let client = ChainQueryClient::new("key", "https://chain-query.invalid");
        let err = client.get_address_balance("   ").await.unwrap_err();
        assert!(matches!(err, Error::InvalidAddressFormat(_)));
    }

    #[test]
    fn debug_redacts_api_key() {
        let client = ChainQueryClient::new("super-secret", "https://chain-query.invalid");
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
