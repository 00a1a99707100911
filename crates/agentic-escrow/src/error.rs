//! Error types for the `agentic-escrow` crate.

/// Errors that can occur while creating, settling, or refunding an escrow.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The payment amount was not strictly positive.
    #[error("payment amount must be positive")]
    NegativeAmount,

    /// The escrow deadline was not in the future at creation time.
    #[error("deadline must be after creation time")]
    DeadlineInPast,

    /// No escrow exists with the given id.
    #[error("escrow not found: {0}")]
    NotFound(String),

    /// The escrow has already reached a terminal state; settlement is rejected.
    #[error("escrow already settled: {0}")]
    AlreadySettled(String),

    /// `refund_expired` was called before the escrow's deadline passed, or on
    /// a non-expired, non-terminal escrow.
    #[error("escrow has not expired: {0}")]
    NotExpired(String),

    /// The recomputed proof hash did not match the proof's embedded hash.
    #[error("proof hash mismatch")]
    InvalidProof,

    /// The proof's agent id did not match the escrow's agent id.
    #[error("proof agent id does not match escrow agent id")]
    AgentMismatch,

    /// The proof's execution id has already been used by this agent.
    #[error("execution id already used by this agent: {0}")]
    ReplayedProof(String),

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

    /// An error surfaced from the agent registry (e.g. reputation credit).
    #[error(transparent)]
    Registry(#[from] agentic_registry::Error),

    /// An error surfaced from the NFT settlement gateway.
    #[error(transparent)]
    Gateway(#[from] agentic_nft_gateway::Error),
}
