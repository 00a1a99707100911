//! Data models for the `agentic-escrow` crate.

pub mod escrow;
pub mod proof;
pub mod request;

pub use escrow::{DisputeOutcome, EscrowRecord, EscrowStatus, Settlement};
pub use proof::ExecutionProof;
pub use request::{PricingModel, ServiceRequest};
