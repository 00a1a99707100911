//! Staked agent registry, tiers, reputation, and discovery for the agentic
//! marketplace core.
//!
//! This crate implements `C3`: agent registration with stake/tier
//! validation, anti-tampered execution-outcome bookkeeping, deregistration,
//! and capability-based discovery with deterministic ordering. Every
//! mutating operation is gated by [`agentic_compliance::ComplianceGate`]
//! before any state change is observed.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use agentic_compliance::ComplianceGate;
//! use agentic_compliance::client::AttributeStoreClient;
//! use agentic_registry::{Registry, RegistryConfig};
//!
//! # async fn run() -> Result<(), agentic_registry::Error> {
//! let store = Arc::new(AttributeStoreClient::new("api_key", "https://attributes.example"));
//! let gate = Arc::new(ComplianceGate::new(store));
//! let registry = Registry::new(gate, RegistryConfig::default());
//! let _ = registry;
//! Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod error;
pub mod models;
pub mod registry;
pub mod reputation;

pub use error::Error;
pub use models::{AgentProfile, AgentView, ProfileField, Registration, StakeReturn, StakeTier};
pub use registry::{Registry, RegistryConfig};
