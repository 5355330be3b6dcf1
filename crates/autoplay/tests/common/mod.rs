#![allow(dead_code)]

use cookiebot_autoplay::{GameSurface, SurfaceError, SurfaceResult};
use cookiebot_core::UpgradePrices;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Click,
    Purchase(usize),
    ReadMoney,
    ReadPrices,
    ReadRate,
    Close,
}

/// Surface with fixed readings, a call log and injected faults.
pub struct ScriptedSurface {
    pub prices: UpgradePrices,
    pub money: u64,
    pub rate: f64,
    /// Call numbers (0-based, every method counts) that fail as stale.
    pub transient_on: HashSet<usize>,
    /// From this call number on, every call reports the surface gone.
    pub gone_from: Option<usize>,
    /// Rate reads that fail as stale before one succeeds.
    pub rate_failures: u32,
    /// Runs after each successful purchase with the purchase count so far.
    pub after_purchase: Option<Box<dyn FnMut(usize) + Send>>,
    purchases: usize,
    calls: usize,
    log: Arc<Mutex<Vec<Call>>>,
}

impl ScriptedSurface {
    pub fn new(prices: UpgradePrices, money: u64, rate: f64) -> Self {
        Self {
            prices,
            money,
            rate,
            transient_on: HashSet::new(),
            gone_from: None,
            rate_failures: 0,
            after_purchase: None,
            purchases: 0,
            calls: 0,
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn log(&self) -> Arc<Mutex<Vec<Call>>> {
        Arc::clone(&self.log)
    }

    fn enter(&mut self, call: Call) -> SurfaceResult<()> {
        let index = self.calls;
        self.calls += 1;
        if self.gone_from.is_some_and(|from| index >= from) {
            return Err(SurfaceError::Unavailable("window closed".to_string()));
        }
        if self.transient_on.contains(&index) {
            return Err(SurfaceError::Transient("stale element".to_string()));
        }
        self.log.lock().expect("log").push(call);
        Ok(())
    }
}

impl GameSurface for ScriptedSurface {
    fn read_money(&mut self) -> SurfaceResult<u64> {
        self.enter(Call::ReadMoney)?;
        Ok(self.money)
    }

    fn read_upgrade_prices(&mut self) -> SurfaceResult<UpgradePrices> {
        self.enter(Call::ReadPrices)?;
        Ok(self.prices)
    }

    fn read_production_rate(&mut self) -> SurfaceResult<f64> {
        if self.rate_failures > 0 {
            self.rate_failures -= 1;
            self.calls += 1;
            return Err(SurfaceError::Transient("rate flickered".to_string()));
        }
        self.enter(Call::ReadRate)?;
        Ok(self.rate)
    }

    fn click(&mut self) -> SurfaceResult<()> {
        self.enter(Call::Click)
    }

    fn purchase(&mut self, tier: usize) -> SurfaceResult<()> {
        self.enter(Call::Purchase(tier))?;
        self.purchases += 1;
        if let Some(hook) = self.after_purchase.as_mut() {
            hook(self.purchases);
        }
        Ok(())
    }

    fn close(&mut self) {
        if let Ok(mut log) = self.log.lock() {
            log.push(Call::Close);
        }
    }
}

pub fn count(log: &Arc<Mutex<Vec<Call>>>, pred: impl Fn(&Call) -> bool) -> usize {
    log.lock().expect("log").iter().filter(|call| pred(call)).count()
}
