//! Typed async client for a Blockfrost-style read-only chain-query service.
//!
//! This crate implements the blockchain-query boundary described in
//! `spec.md` §6: a deliberately narrow, opaque surface exposing only address
//! balance lookups and the current block height. It never submits
//! transactions and never exposes consensus or mempool state.
//!
//! # Quick Start
//!
//! ```no_run
//! use agentic_chain_query::ChainQueryClient;
//!
//! # async fn run() -> Result<(), agentic_chain_query::Error> {
//! let client = ChainQueryClient::new("project_id", "https://cardano-mainnet.blockfrost.io/api/v0");
//! let height = client.get_current_block_height().await?;
//! let _ = height;
//! Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod client;
pub mod error;
pub mod models;

pub use client::ChainQueryClient;
pub use error::Error;
