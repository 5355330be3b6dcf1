use crate::{upgrade_values, UpgradePrices, TIER_COUNT};

/// Picks the tier to buy next.
///
/// Tiers are considered from the most expensive one down. A tier is skipped
/// when some cheaper tier, scaled by the cumulative production multiplier
/// between the two and by `ratio`, costs no more than it does. The first tier
/// that no cheaper tier dominates is returned; tier 0 is the fallback.
///
/// A lower `ratio` dominates more tiers and therefore never picks a higher
/// tier than a larger `ratio` would for the same prices.
pub fn next_upgrade(prices: &UpgradePrices, ratio: f64) -> usize {
    let values = upgrade_values();
    for candidate in (1..TIER_COUNT).rev() {
        if !is_dominated(prices, &values, candidate, ratio) {
            return candidate;
        }
    }
    0
}

fn is_dominated(
    prices: &UpgradePrices,
    values: &[f64; TIER_COUNT],
    candidate: usize,
    ratio: f64,
) -> bool {
    let target = prices[candidate] as f64;
    let mut cum = 1.0;
    for j in (1..=candidate).rev() {
        cum *= values[j];
        if prices[j - 1] as f64 * cum * ratio <= target {
            return true;
        }
    }
    false
}

pub fn can_afford(money: u64, price: u64) -> bool {
    money >= price
}

/// Strategy choice gated by affordability; `None` means no purchase this tick.
pub fn plan_purchase(money: u64, prices: &UpgradePrices, ratio: f64) -> Option<usize> {
    let tier = next_upgrade(prices, ratio);
    can_afford(money, prices[tier]).then_some(tier)
}
