//! Orchestration facade for the agentic marketplace core.
//!
//! This crate is the Enhanced Cardano Client: the coordinator wiring the
//! Hasher (`C1`), NFT Issuer Gateway (`C2`), Registry (`C3`), Escrow Engine
//! (`C4`), Revenue Distributor (`C5`), and Cross-Chain Directory &
//! Compliance Gate (`C6`) behind one typed, explicitly-configured public
//! API, with a unified error type mapping every component's errors onto the
//! taxonomy in `spec.md` §7.
//!
//! # Quick Start
//!
//! ```no_run
//! use agentic_core::{Config, EnhancedCardanoClient};
//!
//! # async fn run() -> Result<(), agentic_core::Error> {
//! let config = Config::load(None)?;
//! let client = EnhancedCardanoClient::new(config);
//! client.start().await?;
//! let agents = client.find_agents(&[], 0.0, 10).await;
//! let _ = agents;
//! client.shutdown().await?;
//! Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod facade;
pub mod store;

pub use config::Config;
pub use error::{Error, ErrorKind};
pub use facade::EnhancedCardanoClient;
pub use store::{InMemoryStore, Store};
