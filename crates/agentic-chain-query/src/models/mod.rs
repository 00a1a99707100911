//! Data models for the `agentic-chain-query` crate.

/// Error response body returned by the chain-query API on non-2xx status codes.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ApiErrorBody {
    /// Numeric error code.
    pub code: i32,
    /// Human-readable error message.
    pub message: String,
}

/// Response body for the address-balance endpoint.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct AddressBalanceResponse {
    /// Balance, as a decimal string in the chain's native unit.
    pub balance: String,
}

/// Response body for the current-block-height endpoint.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct BlockHeightResponse {
    /// Current block height.
    pub height: u64,
}
