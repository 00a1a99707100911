//! Escrowed service marketplace: lifecycle, proof verification, and
//! double-spend-safe settlement for the agentic marketplace core.
//!
//! This crate implements `C4`: the `ServiceRequest` → `EscrowRecord` state
//! machine, the five-step proof-verification algorithm, reputation credit on
//! settlement, and crash recovery for mints that committed locally but never
//! confirmed with the NFT issuer gateway.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use agentic_compliance::ComplianceGate;
//! use agentic_compliance::client::AttributeStoreClient;
//! use agentic_escrow::EscrowEngine;
//! use agentic_nft_gateway::{GatewayConfig, NftGatewayClient};
//! use agentic_registry::{Registry, RegistryConfig};
//!
//! # async fn run() -> Result<(), agentic_escrow::Error> {
//! let store = Arc::new(AttributeStoreClient::new("api_key", "https://attributes.example"));
//! let compliance = Arc::new(ComplianceGate::new(store));
//! let registry = Arc::new(Registry::new(compliance.clone(), RegistryConfig::default()));
//! let gateway = Arc::new(NftGatewayClient::new(
//!     "api_key",
//!     "https://nmkr.example",
//!     "policy1",
//!     GatewayConfig::default(),
//! ));
//! let engine = EscrowEngine::new(compliance, registry, gateway);
//! let _ = engine;
//! Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod engine;
pub mod error;
pub mod gateway;
pub mod models;

pub use engine::EscrowEngine;
pub use error::Error;
pub use gateway::SettlementGateway;
pub use models::{DisputeOutcome, EscrowRecord, EscrowStatus, ExecutionProof, PricingModel, ServiceRequest, Settlement};
