//! Attribute-based compliance gate for the agentic marketplace core.
//!
//! This crate provides the `C6b` Compliance Gate: an ABAC policy engine
//! consulted before every state-mutating Registry, Escrow, and Cross-Chain
//! Directory operation, plus a typed async client for the off-chain
//! attribute-store boundary it depends on.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use agentic_compliance::{client::AttributeStoreClient, ComplianceGate};
//!
//! # async fn run() -> Result<(), agentic_compliance::Error> {
//! let store = Arc::new(AttributeStoreClient::new("api_key", "https://attributes.example"));
//! let gate = ComplianceGate::new(store);
//! let _ = gate;
//! Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod client;
pub mod error;
pub mod gate;
pub mod models;

pub use error::Error;
pub use gate::ComplianceGate;
pub use models::policy::{Action, AttributePredicate, Decision, EvaluationContext, PolicyRule};
