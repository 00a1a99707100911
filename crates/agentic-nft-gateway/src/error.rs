//! Error types for the `agentic-nft-gateway` crate.

/// Errors that can occur when submitting a mint request to the NFT issuer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP transport error from the underlying HTTP client (transient, retryable).
    #[error("transport failed: {0}")]
    TransportFailed(String),

    /// The call did not complete within the configured timeout.
    #[error("transport timed out after {0}ms")]
    TransportTimeout(u64),

    /// The issuer API returned a non-2xx response with an error payload.
    #[error("issuer API error {code}: {message}")]
    Api {
        /// Numeric error code from the issuer response body.
        code: i32,
        /// Human-readable error message from the issuer response body.
        message: String,
    },

    /// Failed to deserialize the issuer response JSON.
    #[error("failed to deserialize response: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// The issuer's external rate limit was hit; retry after the given hint.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited {
        /// Suggested backoff before retrying, in milliseconds.
        retry_after_ms: u64,
    },

    /// The bounded local mint queue is full; the caller must retry later.
    #[error("mint queue is full (depth {depth})")]
    QueueFull {
        /// Configured queue depth that was exceeded.
        depth: usize,
    },

    /// A caller-supplied parameter was invalid before the request was sent.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),
}
