//! Subcommand modules, one per facade operation group.

pub mod directory;
pub mod escrow;
pub mod registry;
pub mod revenue;
