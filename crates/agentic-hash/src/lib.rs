//! Deterministic canonical hashing for the agentic marketplace core.
//!
//! This crate implements the `C1` Hasher: a pure function from a
//! [`CanonicalValue`] record to a lowercase, 64-character hex SHA-256 digest.
//! Canonicalization rules (sorted map keys, fixed-precision decimals,
//! NFC-normalized strings, ISO-8601 timestamps) live here so that any two
//! callers computing the hash of logically-equal records always agree,
//! which is the property proof verification in `agentic-escrow` depends on.
//!
//! # Quick Start
//!
//! ```
//! use agentic_hash::{canonical_hash, CanonicalValue};
//!
//! let value = CanonicalValue::map(vec![
//!     ("agent_id".to_string(), CanonicalValue::Str("agent-1".to_string())),
//!     ("total".to_string(), CanonicalValue::Int(42)),
//! ]);
//! let digest = canonical_hash(&value).expect("valid record");
//! assert_eq!(digest.len(), 64);
//! ```

#![deny(missing_docs)]

pub mod error;
pub mod value;

pub use error::HashError;
pub use value::{CanonicalValue, Hashable};

use sha2::{Digest, Sha256};

/// Computes the deterministic canonical hash of a record.
///
/// Returns a lowercase hex string of exactly 64 characters, or
/// [`HashError::InvalidField`] if the record contains a non-finite number or
/// invalid string content.
pub fn canonical_hash(value: &CanonicalValue) -> Result<String, HashError> {
    let mut buf = String::new();
    value.write_canonical(&mut buf)?;
    let mut hasher = Sha256::new();
    hasher.update(buf.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

/// Computes the canonical hash of anything implementing [`Hashable`].
pub fn hash_of<T: Hashable>(item: &T) -> Result<String, HashError> {
    canonical_hash(&item.to_canonical())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn hash_is_64_char_lowercase_hex() {
        let v = CanonicalValue::Str("hello".to_string());
        let h = canonical_hash(&v).unwrap();
        assert_eq!(h.len(), 64);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn deeply_equal_records_hash_identically() {
        let a = CanonicalValue::map(vec![
            ("b".to_string(), CanonicalValue::Int(2)),
            ("a".to_string(), CanonicalValue::Int(1)),
        ]);
        let b = CanonicalValue::map(vec![
            ("a".to_string(), CanonicalValue::Int(1)),
            ("b".to_string(), CanonicalValue::Int(2)),
        ]);
        assert_eq!(canonical_hash(&a).unwrap(), canonical_hash(&b).unwrap());
    }

    #[test]
    fn key_order_is_irrelevant_but_content_is_not() {
        let a = CanonicalValue::map(vec![("a".to_string(), CanonicalValue::Int(1))]);
        let b = CanonicalValue::map(vec![("a".to_string(), CanonicalValue::Int(2))]);
        assert_ne!(canonical_hash(&a).unwrap(), canonical_hash(&b).unwrap());
    }

    #[test]
    fn decimal_precision_is_part_of_the_canonical_form() {
        let a = CanonicalValue::Decimal(Decimal::new(1000000, 6));
        let b = CanonicalValue::Decimal(Decimal::new(1, 0));
        assert_eq!(canonical_hash(&a).unwrap(), canonical_hash(&b).unwrap());
    }

    #[test]
    fn non_finite_number_is_rejected() {
        let v = CanonicalValue::Float(f64::NAN);
        assert!(matches!(canonical_hash(&v), Err(HashError::InvalidField(_))));
    }

    #[test]
    fn nfc_equivalent_strings_hash_identically() {
        // "é" as a single codepoint vs "e" + combining acute accent.
        let composed = CanonicalValue::Str("\u{00e9}".to_string());
        let decomposed = CanonicalValue::Str("e\u{0301}".to_string());
        assert_eq!(canonical_hash(&composed).unwrap(), canonical_hash(&decomposed).unwrap());
    }

    #[test]
    fn sequences_preserve_order() {
        let a = CanonicalValue::Seq(vec![CanonicalValue::Int(1), CanonicalValue::Int(2)]);
        let b = CanonicalValue::Seq(vec![CanonicalValue::Int(2), CanonicalValue::Int(1)]);
        assert_ne!(canonical_hash(&a).unwrap(), canonical_hash(&b).unwrap());
    }
}
