//! The unified facade error, mapping every component crate's error onto the
//! taxonomy in `spec.md` §7.

/// The taxonomy kind a facade error belongs to, independent of which
/// component crate raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A caller-supplied value failed validation before any state changed.
    Validation,
    /// The caller was not authorized, or the Compliance Gate denied the operation.
    Authorization,
    /// The operation's target was missing or in an incompatible state.
    State,
    /// A cryptographic check (proof hash, replay detection) failed.
    Cryptographic,
    /// A capacity limit (queue, rate limit) was hit.
    Capacity,
    /// An external call failed transiently and may be retried.
    Transport,
    /// An unrecoverable local error; the caller must stop.
    Fatal,
}

/// The unified facade error type. Every component crate's error converts
/// into this via `#[from]`; validation errors additionally carry the
/// offending field name and violated constraint where the component error
/// exposes them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A registry operation failed.
    #[error(transparent)]
    Registry(#[from] agentic_registry::Error),

    /// An escrow operation failed.
    #[error(transparent)]
    Escrow(#[from] agentic_escrow::Error),

    /// A revenue-distribution operation failed.
    #[error(transparent)]
    Revenue(#[from] agentic_revenue::Error),

    /// A cross-chain directory operation failed.
    #[error(transparent)]
    Directory(#[from] agentic_directory::Error),

    /// A compliance-gate operation failed.
    #[error(transparent)]
    Compliance(#[from] agentic_compliance::Error),

    /// A chain-query operation failed.
    #[error(transparent)]
    ChainQuery(#[from] agentic_chain_query::Error),

    /// Configuration failed to load or deserialize.
    #[error("configuration error: {0}")]
    Config(config::ConfigError),
}

impl Error {
    /// The taxonomy kind this error belongs to, per `spec.md` §7.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Registry(e) => match e {
                agentic_registry::Error::InsufficientStake { .. }
                | agentic_registry::Error::EmptyCapabilities => ErrorKind::Validation,
                agentic_registry::Error::Unauthorized(_) | agentic_registry::Error::ComplianceDenied => {
                    ErrorKind::Authorization
                }
                agentic_registry::Error::ComplianceRequiresInfo => ErrorKind::Authorization,
                agentic_registry::Error::AlreadyRegistered(_) | agentic_registry::Error::NotFound(_) => {
                    ErrorKind::State
                }
                agentic_registry::Error::Compliance(_) => ErrorKind::Authorization,
                agentic_registry::Error::Hash(_) => ErrorKind::Fatal,
            },
            Error::Escrow(e) => match e {
                agentic_escrow::Error::NegativeAmount | agentic_escrow::Error::DeadlineInPast => {
                    ErrorKind::Validation
                }
                agentic_escrow::Error::ComplianceDenied | agentic_escrow::Error::Compliance(_) => {
                    ErrorKind::Authorization
                }
                agentic_escrow::Error::ComplianceRequiresInfo => ErrorKind::Authorization,
                agentic_escrow::Error::NotFound(_)
                | agentic_escrow::Error::AlreadySettled(_)
                | agentic_escrow::Error::NotExpired(_) => ErrorKind::State,
                agentic_escrow::Error::InvalidProof | agentic_escrow::Error::AgentMismatch => {
                    ErrorKind::Cryptographic
                }
                agentic_escrow::Error::ReplayedProof(_) => ErrorKind::Cryptographic,
                agentic_escrow::Error::Hash(_) => ErrorKind::Fatal,
                agentic_escrow::Error::Registry(_) | agentic_escrow::Error::Gateway(_) => ErrorKind::Transport,
            },
            Error::Revenue(e) => match e {
                agentic_revenue::Error::NegativeAmount => ErrorKind::Validation,
                agentic_revenue::Error::NotFound(_) => ErrorKind::State,
                agentic_revenue::Error::Gateway(_) => ErrorKind::Transport,
            },
            Error::Directory(e) => match e {
                agentic_directory::Error::EmptyNetworks
                | agentic_directory::Error::DuplicateNetwork(_)
                | agentic_directory::Error::UnknownNetwork(_) => ErrorKind::Validation,
                agentic_directory::Error::AgentNotFound(_) => ErrorKind::State,
                agentic_directory::Error::ComplianceDenied | agentic_directory::Error::Compliance(_) => {
                    ErrorKind::Authorization
                }
                agentic_directory::Error::ComplianceRequiresInfo => ErrorKind::Authorization,
                agentic_directory::Error::Hash(_) => ErrorKind::Fatal,
                agentic_directory::Error::Gateway(_) => ErrorKind::Transport,
            },
            Error::Compliance(_) => ErrorKind::Authorization,
            Error::ChainQuery(_) => ErrorKind::Transport,
            Error::Config(_) => ErrorKind::Fatal,
        }
    }

    /// A human-readable message, identical to this error's `Display` output.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// The offending field name, for validation errors that name one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Error::Registry(agentic_registry::Error::InsufficientStake { .. }) => Some("staked_amount"),
            Error::Registry(agentic_registry::Error::EmptyCapabilities) => Some("capabilities"),
            Error::Escrow(agentic_escrow::Error::NegativeAmount) => Some("payment_amount"),
            Error::Escrow(agentic_escrow::Error::DeadlineInPast) => Some("escrow_deadline"),
            Error::Revenue(agentic_revenue::Error::NegativeAmount) => Some("total"),
            Error::Directory(agentic_directory::Error::EmptyNetworks | agentic_directory::Error::DuplicateNetwork(_)) => {
                Some("networks")
            }
            _ => None,
        }
    }

    /// The violated constraint, for validation errors that name one.
    pub fn constraint(&self) -> Option<&'static str> {
        match self {
            Error::Registry(agentic_registry::Error::InsufficientStake { .. }) => {
                Some("staked_amount >= required_stake(capabilities, tier)")
            }
            Error::Registry(agentic_registry::Error::EmptyCapabilities) => Some("capabilities non-empty"),
            Error::Escrow(agentic_escrow::Error::NegativeAmount) => Some("payment_amount > 0"),
            Error::Escrow(agentic_escrow::Error::DeadlineInPast) => Some("deadline > created_at"),
            Error::Revenue(agentic_revenue::Error::NegativeAmount) => Some("total > 0"),
            Error::Directory(agentic_directory::Error::EmptyNetworks) => Some("networks non-empty"),
            Error::Directory(agentic_directory::Error::DuplicateNetwork(_)) => Some("networks unique within one call"),
            _ => None,
        }
    }
}
