//! Data models for the `agentic-registry` crate.

pub mod profile;
pub mod tier;

pub use profile::{AgentProfile, AgentView, ProfileField, Registration, StakeReturn};
pub use tier::{MinStakePerTier, StakeTier};
