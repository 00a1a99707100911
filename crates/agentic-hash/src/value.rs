//! The canonical record representation hashed by this crate.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use unicode_normalization::UnicodeNormalization;

use crate::error::HashError;

/// A canonicalizable value: primitives, sequences, and string-keyed maps.
///
/// Distinct from `serde_json::Value` so that the canonical numeric and
/// timestamp rendering required by the Hasher contract is a type-level
/// guarantee rather than a formatting convention applied ad hoc at each call
/// site.
#[derive(Debug, Clone, PartialEq)]
pub enum CanonicalValue {
    /// Absence of a value.
    Null,
    /// Boolean.
    Bool(bool),
    /// Arbitrary-precision integer, rendered without a decimal point.
    Int(i64),
    /// Fixed-precision decimal, rendered with its declared scale.
    Decimal(Decimal),
    /// IEEE-754 float; only finite values are accepted.
    Float(f64),
    /// UTF-8 string, NFC-normalized before hashing.
    Str(String),
    /// A timestamp, rendered as RFC 3339 (ISO-8601 with timezone) UTC.
    Timestamp(DateTime<Utc>),
    /// An ordered sequence of values.
    Seq(Vec<CanonicalValue>),
    /// A string-keyed map; keys are sorted ascending by codepoint before
    /// hashing regardless of insertion order.
    Map(Vec<(String, CanonicalValue)>),
}

impl CanonicalValue {
    /// Convenience constructor for a map literal (keys need not be
    /// pre-sorted; canonicalization sorts them).
    pub fn map(entries: Vec<(String, CanonicalValue)>) -> Self {
        CanonicalValue::Map(entries)
    }

    /// Writes this value's canonical textual form into `out`.
    pub(crate) fn write_canonical(&self, out: &mut String) -> Result<(), HashError> {
        match self {
            CanonicalValue::Null => {
                out.push_str("null");
                Ok(())
            }
            CanonicalValue::Bool(b) => {
                out.push_str(if *b { "true" } else { "false" });
                Ok(())
            }
            CanonicalValue::Int(i) => {
                write!(out, "{i}").map_err(|e| HashError::InvalidField(e.to_string()))
            }
            CanonicalValue::Decimal(d) => {
                write!(out, "{d}").map_err(|e| HashError::InvalidField(e.to_string()))
            }
            CanonicalValue::Float(f) => {
                if !f.is_finite() {
                    return Err(HashError::InvalidField(format!("non-finite number: {f}")));
                }
                write!(out, "{f}").map_err(|e| HashError::InvalidField(e.to_string()))
            }
            CanonicalValue::Str(s) => {
                let normalized: String = s.nfc().collect();
                out.push('"');
                for c in normalized.chars() {
                    match c {
                        '"' => out.push_str("\\\""),
                        '\\' => out.push_str("\\\\"),
                        _ => out.push(c),
                    }
                }
                out.push('"');
                Ok(())
            }
            CanonicalValue::Timestamp(ts) => {
                out.push('"');
                out.push_str(&ts.to_rfc3339());
                out.push('"');
                Ok(())
            }
            CanonicalValue::Seq(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    item.write_canonical(out)?;
                }
                out.push(']');
                Ok(())
            }
            CanonicalValue::Map(entries) => {
                let mut sorted: Vec<&(String, CanonicalValue)> = entries.iter().collect();
                sorted.sort_by(|a, b| a.0.cmp(&b.0));
                out.push('{');
                for (i, (key, value)) in sorted.into_iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    CanonicalValue::Str(key.clone()).write_canonical(out)?;
                    out.push(':');
                    value.write_canonical(out)?;
                }
                out.push('}');
                Ok(())
            }
        }
    }
}

/// Implemented by any record type that can be reduced to its [`CanonicalValue`]
/// view for hashing. Keeps field-concatenation logic in one place per type
/// instead of hand-rolled at every call site.
pub trait Hashable {
    /// Produces the canonical value representing this record, excluding any
    /// field that stores a previously-computed hash of the record itself.
    fn to_canonical(&self) -> CanonicalValue;
}
