//! Error types for the `agentic-hash` crate.

/// Errors that can occur while canonicalizing or hashing a record.
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    /// A field could not be canonicalized: a non-finite number, or a string
    /// that is not valid UTF-8 content (surfaced before NFC normalization).
    #[error("invalid field: {0}")]
    InvalidField(String),
}
