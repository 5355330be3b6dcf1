//! Offline model of the target game's economy.

use crate::{upgrade_values, UpgradePrices, TIER_COUNT};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const BASE_PRICES: UpgradePrices = [15, 100, 500, 2000, 7000, 50000, 1000000, 123456789];
pub const PRICE_GROWTH: f64 = 1.15;
pub const CURSOR_RATE: f64 = 0.2;
pub const CLICK_VALUE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("unknown upgrade tier {0}")]
    UnknownTier(usize),
    #[error("tier {tier} costs {price}, only {money} available")]
    Insufficient { tier: usize, price: u64, money: u64 },
}

/// Production per second of one unit of every tier.
pub fn tier_rates() -> [f64; TIER_COUNT] {
    let values = upgrade_values();
    let mut rates = [0.0; TIER_COUNT];
    let mut rate = CURSOR_RATE;
    for (idx, value) in values.iter().enumerate() {
        if idx > 0 {
            rate *= value;
        }
        rates[idx] = rate;
    }
    rates
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OfflineGame {
    money: f64,
    owned: [u32; TIER_COUNT],
    elapsed_secs: f64,
    clicks: u64,
}

impl OfflineGame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_money(money: u64) -> Self {
        Self {
            money: money as f64,
            ..Self::default()
        }
    }

    pub fn money(&self) -> u64 {
        self.money.max(0.0).floor() as u64
    }

    pub fn owned(&self) -> &[u32; TIER_COUNT] {
        &self.owned
    }

    pub fn clicks(&self) -> u64 {
        self.clicks
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    pub fn price(&self, tier: usize) -> Result<u64, GameError> {
        let base = *BASE_PRICES.get(tier).ok_or(GameError::UnknownTier(tier))?;
        let owned = self.owned[tier] as i32;
        Ok((base as f64 * PRICE_GROWTH.powi(owned)).ceil() as u64)
    }

    pub fn prices(&self) -> UpgradePrices {
        let mut out = [0; TIER_COUNT];
        for (tier, slot) in out.iter_mut().enumerate() {
            *slot = self.price(tier).unwrap_or(u64::MAX);
        }
        out
    }

    pub fn production_rate(&self) -> f64 {
        tier_rates()
            .iter()
            .zip(self.owned.iter())
            .map(|(rate, count)| rate * f64::from(*count))
            .sum()
    }

    pub fn click(&mut self) {
        self.clicks += 1;
        self.money += CLICK_VALUE;
    }

    /// Buys one unit of `tier`; returns the price paid.
    pub fn buy(&mut self, tier: usize) -> Result<u64, GameError> {
        let price = self.price(tier)?;
        let money = self.money();
        if money < price {
            return Err(GameError::Insufficient { tier, price, money });
        }
        self.money -= price as f64;
        self.owned[tier] += 1;
        Ok(price)
    }

    pub fn advance(&mut self, secs: f64) {
        if secs <= 0.0 || !secs.is_finite() {
            return;
        }
        self.money += self.production_rate() * secs;
        self.elapsed_secs += secs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_game_lists_base_prices() {
        let game = OfflineGame::new();
        assert_eq!(game.prices(), BASE_PRICES);
        assert_eq!(game.money(), 0);
        assert_eq!(game.production_rate(), 0.0);
    }

    #[test]
    fn buying_raises_price_and_rate() {
        let mut game = OfflineGame::with_money(100);
        assert_eq!(game.buy(0), Ok(15));
        assert_eq!(game.money(), 85);
        assert_eq!(game.price(0), Ok(18));
        assert!((game.production_rate() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn buying_without_money_fails() {
        let mut game = OfflineGame::with_money(10);
        assert_eq!(
            game.buy(1),
            Err(GameError::Insufficient {
                tier: 1,
                price: 100,
                money: 10
            })
        );
        assert_eq!(game.buy(8), Err(GameError::UnknownTier(8)));
    }

    #[test]
    fn time_accrues_production() {
        let mut game = OfflineGame::with_money(100);
        game.buy(1).expect("grandma");
        game.advance(10.0);
        // Grandma produces 0.2 * 4 per second.
        assert_eq!(game.money(), 8);
        game.click();
        assert_eq!(game.money(), 9);
        assert_eq!(game.clicks(), 1);
    }

    #[test]
    fn rates_compound_catalog_values() {
        let rates = tier_rates();
        assert!((rates[0] - 0.2).abs() < 1e-9);
        assert!((rates[1] - 0.8).abs() < 1e-9);
        assert!((rates[2] - 4.0).abs() < 1e-9);
        assert!((rates[3] - 10.0).abs() < 1e-9);
    }
}
