//! Token-weighted revenue distribution and claim settlement for the
//! agentic marketplace core.
//!
//! This crate implements `C5`: per-period pro-rata distribution of shared
//! marketplace revenue across active participants, floored to the native
//! minimum unit with residue swept into a system reserve, and an
//! all-or-nothing claim flow that reverses on settlement failure.
//!
//! Unlike `C3` (Registry) and `C4` (Escrow), this component is not gated by
//! the Compliance Gate: `spec.md` §4.6 lists the Compliance Gate as
//! consulted before registry, escrow, and directory mutations, but not
//! revenue distribution.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use agentic_nft_gateway::{GatewayConfig, NftGatewayClient};
//! use agentic_revenue::RevenueDistributor;
//! use rust_decimal_macros::dec;
//!
//! # async fn run() -> Result<(), agentic_revenue::Error> {
//! let gateway = Arc::new(NftGatewayClient::new(
//!     "api_key",
//!     "https://nmkr.example",
//!     "policy1",
//!     GatewayConfig::default(),
//! ));
//! let distributor = RevenueDistributor::new(gateway);
//! distributor.set_participation("addr1", 1000).await;
//! let outcome = distributor.distribute_revenue(dec!(10), "period-2026-07").await?;
//! let _ = outcome;
//! Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod distributor;
pub mod error;
pub mod gateway;
pub mod models;

pub use distributor::{DISTRIBUTION_PRECISION, RevenueDistributor};
pub use error::Error;
pub use gateway::TransferGateway;
pub use models::{ClaimResult, DistributionOutcome, DistributionReport, RevenueShare};
