//! Data models for the `agentic-nft-gateway` crate.

pub mod common;
pub mod mint;
