//! Error types for the `agentic-revenue` crate.

/// Errors that can occur while distributing revenue or claiming rewards.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A distribution's total amount was not positive.
    #[error("distribution total must be positive")]
    NegativeAmount,

    /// No `RevenueShare` exists for the given recipient.
    #[error("recipient not found: {0}")]
    NotFound(String),

    /// An error surfaced from the settlement/transfer gateway.
    #[error(transparent)]
    Gateway(#[from] agentic_nft_gateway::Error),
}
