//! Typed async client for an NMKR-style off-chain NFT issuer.
//!
//! This crate implements the `C2` NFT Issuer Gateway: it builds CIP-25-style
//! metadata, submits mint requests to an external issuer over HTTP, and
//! returns transaction identifiers. A bounded local queue and an external
//! rate limit provide the backpressure described in `spec.md` §5; transient
//! transport failures are retried with jittered exponential backoff up to a
//! bounded attempt count before being surfaced.
//!
//! # Quick Start
//!
//! ```no_run
//! use agentic_nft_gateway::{GatewayConfig, NftGatewayClient};
//!
//! # async fn run() -> Result<(), agentic_nft_gateway::Error> {
//! let client = NftGatewayClient::new("api_key", "https://nmkr.example", "policy1", GatewayConfig::default());
//! let _ = client;
//! Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod client;
pub mod error;
pub mod models;

pub use client::{GatewayConfig, NftGatewayClient};
pub use error::Error;
