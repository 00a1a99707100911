//! Error types for the `agentic-chain-query` crate.

/// Errors that can occur when querying the blockchain-query boundary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP transport error from the underlying HTTP client (transient, retryable).
    #[error("transport failed: {0}")]
    TransportFailed(String),

    /// The call did not complete within the configured timeout.
    #[error("transport timed out after {0}ms")]
    TransportTimeout(u64),

    /// The chain-query API returned a non-2xx response with an error payload.
    #[error("chain-query API error {code}: {message}")]
    Api {
        /// Numeric error code from the response body.
        code: i32,
        /// Human-readable error message from the response body.
        message: String,
    },

    /// Failed to deserialize the chain-query response JSON.
    #[error("failed to deserialize response: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// The address was not in a format the query service recognizes.
    #[error("invalid address format: {0}")]
    InvalidAddressFormat(String),

    /// The balance field in the response body was not a valid decimal.
    #[error("invalid balance value: {0}")]
    InvalidDecimal(String),
}
