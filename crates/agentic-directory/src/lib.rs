//! Cross-chain service advertisement for the agentic marketplace core.
//!
//! This crate implements `C6a`: `register_cross_chain_service` advertises a
//! locally-registered agent on one or more external networks, producing one
//! local mint per network and a shared `cross_chain_id` derived from the
//! agent id, the sorted network set, and the registration timestamp. It
//! never executes registration on the remote network itself — only the
//! local advertisement.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use agentic_compliance::ComplianceGate;
//! use agentic_compliance::client::AttributeStoreClient;
//! use agentic_directory::Directory;
//! use agentic_directory::models::Network;
//! use agentic_nft_gateway::{GatewayConfig, NftGatewayClient};
//! use agentic_registry::{Registry, RegistryConfig};
//!
//! # async fn run() -> Result<(), agentic_directory::Error> {
//! let store = Arc::new(AttributeStoreClient::new("api_key", "https://attributes.example"));
//! let compliance = Arc::new(ComplianceGate::new(store));
//! let registry = Arc::new(Registry::new(compliance.clone(), RegistryConfig::default()));
//! let gateway = Arc::new(NftGatewayClient::new(
//!     "api_key",
//!     "https://nmkr.example",
//!     "policy1",
//!     GatewayConfig::default(),
//! ));
//! let directory = Directory::new(compliance, registry, gateway);
//! let _ = directory.register_cross_chain_service("agent-1", vec![Network::Ethereum]).await;
//! Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod directory;
pub mod error;
pub mod gateway;
pub mod models;

pub use directory::Directory;
pub use error::Error;
pub use gateway::DirectoryGateway;
pub use models::{CrossChainRecord, CrossChainRegistration, Network};
