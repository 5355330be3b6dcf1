use cookiebot_core::{next_upgrade, plan_purchase, UpgradePrices, TIER_COUNT};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

macro_rules! pick_case {
    ($name:ident, $prices:expr, $ratio:expr, $expected:expr) => {
        #[test]
        fn $name() {
            let prices: UpgradePrices = $prices;
            assert_eq!(next_upgrade(&prices, $ratio), $expected);
        }
    };
}

const FLAT: UpgradePrices = [10, 20, 30, 40, 50, 60, 70, 80];
const OPENING: UpgradePrices = [15, 100, 500, 2000, 7000, 50000, 1000000, 123456789];

pick_case!(flat_full_ratio, FLAT, 1.0, 7);
pick_case!(flat_half_ratio, FLAT, 0.5, 7);
pick_case!(flat_zero_ratio, FLAT, 0.0, 0);
pick_case!(opening_mid_ratio, OPENING, 0.625, 0);
pick_case!(opening_low_ratio, OPENING, 0.1, 0);
pick_case!(all_free, [0; TIER_COUNT], 1.0, 0);
pick_case!(
    factory_undominated,
    [10, 100, 120, 10_000, 100_000, 1_000_000, 10_000_000, 2_000_000_000],
    1.0,
    2
);
pick_case!(
    factory_dominated_by_cursor,
    [1, 100, 120, 10_000, 100_000, 1_000_000, 10_000_000, 2_000_000_000],
    1.0,
    0
);
pick_case!(
    grandma_survives_cheap_cursor_ratio,
    [30, 100, 10_000, 1_000_000, 1_000_000_000, u64::MAX / 4, u64::MAX / 2, u64::MAX],
    0.9,
    1
);

macro_rules! plan_case {
    ($name:ident, $money:expr, $prices:expr, $ratio:expr, $expected:expr) => {
        #[test]
        fn $name() {
            let prices: UpgradePrices = $prices;
            assert_eq!(plan_purchase($money, &prices, $ratio), $expected);
        }
    };
}

plan_case!(plan_broke, 0, OPENING, 0.625, None);
plan_case!(plan_exact_cursor, 15, OPENING, 0.625, Some(0));
plan_case!(plan_rich_still_cursor, 1_000_000_000, OPENING, 0.625, Some(0));
plan_case!(plan_flat_top_short, 79, FLAT, 1.0, None);
plan_case!(plan_flat_top, 80, FLAT, 1.0, Some(7));

fn random_prices(rng: &mut StdRng) -> UpgradePrices {
    let mut prices = [0u64; TIER_COUNT];
    let mut current = rng.gen_range(0..50u64);
    for slot in prices.iter_mut() {
        *slot = current;
        current += rng.gen_range(0..=current.saturating_mul(10) + 1);
    }
    prices
}

#[test]
fn picks_are_in_range_and_deterministic() {
    let mut rng = StdRng::seed_from_u64(0xC00C1E);
    for _ in 0..2_000 {
        let prices = random_prices(&mut rng);
        let ratio = rng.gen_range(0.0..=1.0);
        let first = next_upgrade(&prices, ratio);
        assert!(first < TIER_COUNT);
        assert_eq!(first, next_upgrade(&prices, ratio));
    }
}

#[test]
fn lower_ratio_never_picks_a_pricier_tier() {
    let mut rng = StdRng::seed_from_u64(0xBADC0DE);
    for _ in 0..2_000 {
        let prices = random_prices(&mut rng);
        let a: f64 = rng.gen_range(0.0..=1.0);
        let b: f64 = rng.gen_range(0.0..=1.0);
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let low_pick = next_upgrade(&prices, low);
        let high_pick = next_upgrade(&prices, high);
        assert!(
            prices[low_pick] <= prices[high_pick],
            "ratio {low} picked {low_pick}, ratio {high} picked {high_pick} for {prices:?}"
        );
    }
}

#[test]
fn extreme_ratios_show_opposite_bias() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let prices = random_prices(&mut rng);
        assert!(next_upgrade(&prices, 0.0) <= next_upgrade(&prices, 1.0));
    }
}
