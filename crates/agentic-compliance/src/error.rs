//! Error types for the `agentic-compliance` crate.

/// Errors that can occur while evaluating a compliance decision or fetching
/// subject attributes from the off-chain attribute store.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP transport error from the underlying attribute-store client.
    #[error("HTTP transport error: {0}")]
    Http(String),

    /// The attribute-store API returned a non-2xx response with an error payload.
    #[error("attribute store error {code}: {message}")]
    Api {
        /// Numeric error code from the attribute-store response body.
        code: i32,
        /// Human-readable error message from the attribute-store response body.
        message: String,
    },

    /// Failed to deserialize the attribute-store response JSON.
    #[error("failed to deserialize response: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// Hashing the subject identifier for the attribute lookup failed.
    #[error("failed to hash subject: {0}")]
    Hash(#[from] agentic_hash::HashError),

    /// The subject has invoked right-to-erasure; the gate fails closed.
    #[error("subject has been forgotten and fails closed")]
    SubjectForgotten,
}
