//! Stake tiers, capability multipliers, and required-stake calculation.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// A discrete tier derived from staked amount and declared capabilities.
///
/// A tier is a function of an agent's current state, not a stored field: it
/// is recomputed on demand from stake and capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StakeTier {
    /// Entry tier; base minimum stake 100.
    Basic,
    /// Base minimum stake 500.
    Standard,
    /// Base minimum stake 2,000.
    Professional,
    /// Base minimum stake 10,000.
    Enterprise,
}

impl StakeTier {
    /// All tiers, ordered from lowest to highest.
    pub const ALL: [StakeTier; 4] =
        [StakeTier::Basic, StakeTier::Standard, StakeTier::Professional, StakeTier::Enterprise];

    /// The default base minimum stake for this tier, before capability multipliers.
    pub fn default_base_minimum(self) -> Decimal {
        match self {
            StakeTier::Basic => dec!(100),
            StakeTier::Standard => dec!(500),
            StakeTier::Professional => dec!(2000),
            StakeTier::Enterprise => dec!(10000),
        }
    }
}

/// Per-tier minimum base stake, overridable via configuration.
pub type MinStakePerTier = HashMap<StakeTier, Decimal>;

/// Builds the default `min_stake_per_tier` table from each tier's built-in base minimum.
pub fn default_min_stake_per_tier() -> MinStakePerTier {
    StakeTier::ALL.iter().map(|tier| (*tier, tier.default_base_minimum())).collect()
}

/// Multiplier applied to a tier's base minimum for a given declared capability.
///
/// Unlisted capabilities use a multiplier of 1.0. Multipliers are fixed
/// constants: the source names them as such, never as a configurable table.
pub fn capability_multiplier(capability: &str) -> Decimal {
    match capability {
        "blockchain" => dec!(2.0),
        "smart_contracts" => dec!(1.8),
        "ai_analysis" => dec!(1.5),
        "web_automation" => dec!(1.2),
        _ => dec!(1.0),
    }
}

/// The highest multiplier among a capability set, defaulting to 1.0 for an empty set.
pub fn max_multiplier<'a>(capabilities: impl IntoIterator<Item = &'a str>) -> Decimal {
    capabilities.into_iter().map(capability_multiplier).max().unwrap_or(dec!(1.0))
}

/// Computes the required stake for `tier` given a capability set's highest multiplier.
pub fn required_stake_for_tier(
    min_stake_per_tier: &MinStakePerTier,
    tier: StakeTier,
    capabilities: &[String],
) -> Decimal {
    let base = min_stake_per_tier.get(&tier).copied().unwrap_or_else(|| tier.default_base_minimum());
    let multiplier = max_multiplier(capabilities.iter().map(String::as_str));
    base * multiplier
}

/// The lowest tier a capability set is eligible for.
///
/// A capability whose multiplier exceeds 1.0 is treated as an advanced
/// capability, raising the floor to `standard`: a profile cannot buy its way
/// into `basic` by staking slightly more than the basic minimum while
/// declaring a capability the basic tier was never priced for.
pub fn minimum_eligible_tier(capabilities: &[String]) -> StakeTier {
    if max_multiplier(capabilities.iter().map(String::as_str)) > dec!(1.0) {
        StakeTier::Standard
    } else {
        StakeTier::Basic
    }
}

/// Chooses the highest tier at or above [`minimum_eligible_tier`] whose
/// required stake is at most `offered_stake`.
///
/// Returns `None` if even the minimum eligible tier's requirement exceeds
/// the offered stake.
pub fn tier_for_stake(
    min_stake_per_tier: &MinStakePerTier,
    capabilities: &[String],
    offered_stake: Decimal,
) -> Option<StakeTier> {
    let floor = minimum_eligible_tier(capabilities);
    StakeTier::ALL
        .iter()
        .rev()
        .copied()
        .filter(|&tier| tier >= floor)
        .find(|&tier| required_stake_for_tier(min_stake_per_tier, tier, capabilities) <= offered_stake)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blockchain_doubles_the_base_minimum() {
        let table = default_min_stake_per_tier();
        let caps = vec!["blockchain".to_string()];
        assert_eq!(required_stake_for_tier(&table, StakeTier::Standard, &caps), dec!(1000));
    }

    #[test]
    fn unknown_capability_uses_unit_multiplier() {
        let table = default_min_stake_per_tier();
        let caps = vec!["gardening".to_string()];
        assert_eq!(required_stake_for_tier(&table, StakeTier::Basic, &caps), dec!(100));
    }

    #[test]
    fn tier_selection_picks_highest_affordable_tier() {
        let table = default_min_stake_per_tier();
        let caps = vec!["blockchain".to_string()];
        // basic: 200, standard: 1000, professional: 4000, enterprise: 20000
        assert_eq!(tier_for_stake(&table, &caps, dec!(3000)), Some(StakeTier::Standard));
        assert_eq!(tier_for_stake(&table, &caps, dec!(4000)), Some(StakeTier::Professional));
        assert_eq!(tier_for_stake(&table, &caps, dec!(100)), None);
    }

    #[test]
    fn scenario_insufficient_stake_at_standard() {
        let table = default_min_stake_per_tier();
        let caps = vec!["blockchain".to_string()];
        assert_eq!(required_stake_for_tier(&table, StakeTier::Standard, &caps), dec!(1000));
        assert_eq!(tier_for_stake(&table, &caps, dec!(500)), None);
    }

    #[test]
    fn an_advanced_capability_raises_the_floor_to_standard() {
        assert_eq!(minimum_eligible_tier(&["blockchain".to_string()]), StakeTier::Standard);
        assert_eq!(minimum_eligible_tier(&["gardening".to_string()]), StakeTier::Basic);
    }
}
