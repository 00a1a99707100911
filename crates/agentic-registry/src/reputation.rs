//! Query-time reputation computation.
//!
//! The stored [`AgentProfile::reputation_score`](crate::models::AgentProfile)
//! is only the base score; time decay and the stake bonus are applied here,
//! at query time, exactly as described for discovery and profile views.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Computes the effective reputation used for discovery filtering and sorting.
///
/// `base` is `successful / max(total, 1)`. `last_execution_at` drives the
/// time-decay term (`0.95 ^ days_since_last_execution`); an agent with no
/// recorded executions decays to zero rather than holding a phantom recency
/// bonus. `stake` contributes up to a 0.1 bonus. The result is capped at 1.0.
pub fn effective_reputation(
    base: f64,
    last_execution_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    stake: Decimal,
) -> f64 {
    let decay = match last_execution_at {
        Some(ts) => {
            let days = (now - ts).num_seconds().max(0) as f64 / 86_400.0;
            0.95_f64.powf(days)
        }
        None => 0.0,
    };
    let stake_bonus = (stake / Decimal::from(1000)).to_f64().unwrap_or(0.0).min(0.1).max(0.0);
    (base * decay + stake_bonus).min(1.0)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn no_executions_yields_zero_decay() {
        let now = Utc::now();
        assert_eq!(effective_reputation(1.0, None, now, Decimal::ZERO), 0.0);
    }

    #[test]
    fn fresh_execution_has_no_decay() {
        let now = Utc::now();
        let rep = effective_reputation(1.0, Some(now), now, Decimal::ZERO);
        assert!((rep - 1.0).abs() < 1e-9);
    }

    #[test]
    fn stake_bonus_is_capped_at_one_tenth() {
        let now = Utc::now();
        let rep = effective_reputation(0.0, None, now, dec!(1_000_000));
        assert!((rep - 0.1).abs() < 1e-9, "bonus applies regardless of decay, but is capped at 0.1");

        let rep = effective_reputation(1.0, Some(now), now, dec!(1_000_000));
        assert!(rep <= 1.0);
    }

    #[test]
    fn decay_reduces_reputation_over_days() {
        let now = Utc::now();
        let a_week_ago = now - Duration::days(7);
        let rep = effective_reputation(1.0, Some(a_week_ago), now, Decimal::ZERO);
        assert!(rep < 1.0);
        assert!(rep > 0.0);
    }
}
