//! Error types for the `agentic-directory` crate.

/// Errors that can occur while registering a cross-chain advertisement.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `networks` was empty.
    #[error("at least one network must be given")]
    EmptyNetworks,

    /// The same network appeared more than once in a single request.
    #[error("duplicate network in request: {0}")]
    DuplicateNetwork(String),

    /// The given network identifier is not in the fixed enumeration.
    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    /// The source agent does not exist in the local registry.
    #[error("agent does not exist locally: {0}")]
    AgentNotFound(String),

    /// The Compliance Gate denied the operation.
    #[error("compliance denied")]
    ComplianceDenied,

    /// The Compliance Gate requires more information before a decision can be made.
    #[error("compliance requires more information")]
    ComplianceRequiresInfo,

    /// An error surfaced from the Compliance Gate itself.
    #[error(transparent)]
    Compliance(#[from] agentic_compliance::Error),

    /// An error surfaced from the canonical hasher.
    #[error(transparent)]
    Hash(#[from] agentic_hash::HashError),

    /// An error surfaced from the per-network registration gateway.
    #[error(transparent)]
    Gateway(#[from] agentic_nft_gateway::Error),
}
