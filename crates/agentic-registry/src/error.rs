//! Error types for the `agentic-registry` crate.

use rust_decimal::Decimal;

/// Errors that can occur while registering, updating, or discovering agents.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The offered stake did not meet the minimum required for any tier.
    #[error("insufficient stake: provided {provided}, required {required}")]
    InsufficientStake {
        /// Stake actually offered at registration.
        provided: Decimal,
        /// Minimum stake required for the basic tier given the declared capabilities.
        required: Decimal,
    },

    /// The declared capability set was empty at registration.
    #[error("capability set must not be empty")]
    EmptyCapabilities,

    /// An agent id was not found in the registry.
    #[error("agent not found: {0}")]
    NotFound(String),

    /// An agent id is already registered.
    #[error("agent already registered: {0}")]
    AlreadyRegistered(String),

    /// The caller attempted to mutate a field that may only change via
    /// `register_agent`, `record_execution_outcome`, or `deregister_agent`.
    #[error("field is not mutable through update_agent_profile: {0}")]
    Unauthorized(String),

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
}
