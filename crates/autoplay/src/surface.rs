use crate::{Clock, SurfaceError, SurfaceResult};
use cookiebot_core::{OfflineGame, UpgradePrices};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Reads and actions against the live game. Every call may fail with a
/// [`SurfaceError`]; callers decide whether the failure is terminal.
pub trait GameSurface: Send {
    fn read_money(&mut self) -> SurfaceResult<u64>;
    fn read_upgrade_prices(&mut self) -> SurfaceResult<UpgradePrices>;
    fn read_production_rate(&mut self) -> SurfaceResult<f64>;
    fn click(&mut self) -> SurfaceResult<()>;
    fn purchase(&mut self, tier: usize) -> SurfaceResult<()>;

    /// Releases the surface once the session no longer needs it.
    fn close(&mut self) {}
}

impl<S: GameSurface + ?Sized> GameSurface for Box<S> {
    fn read_money(&mut self) -> SurfaceResult<u64> {
        (**self).read_money()
    }

    fn read_upgrade_prices(&mut self) -> SurfaceResult<UpgradePrices> {
        (**self).read_upgrade_prices()
    }

    fn read_production_rate(&mut self) -> SurfaceResult<f64> {
        (**self).read_production_rate()
    }

    fn click(&mut self) -> SurfaceResult<()> {
        (**self).click()
    }

    fn purchase(&mut self, tier: usize) -> SurfaceResult<()> {
        (**self).purchase(tier)
    }

    fn close(&mut self) {
        (**self).close();
    }
}

/// Whether the game surface is the active, focused one.
pub trait Readiness: Send {
    fn is_ready(&self) -> bool;
}

impl<F> Readiness for F
where
    F: Fn() -> bool + Send,
{
    fn is_ready(&self) -> bool {
        self()
    }
}

/// Game surface backed by [`OfflineGame`], advanced by a [`Clock`].
pub struct SimulatedSurface<C: Clock> {
    game: Arc<Mutex<OfflineGame>>,
    closed: Arc<AtomicBool>,
    clock: C,
    synced_at: Duration,
}

impl<C: Clock> SimulatedSurface<C> {
    pub fn new(game: OfflineGame, clock: C) -> Self {
        let synced_at = clock.now();
        Self {
            game: Arc::new(Mutex::new(game)),
            closed: Arc::new(AtomicBool::new(false)),
            clock,
            synced_at,
        }
    }

    pub fn handle(&self) -> SimulationHandle {
        SimulationHandle {
            game: Arc::clone(&self.game),
            closed: Arc::clone(&self.closed),
        }
    }

    fn with_game<T>(&mut self, apply: impl FnOnce(&mut OfflineGame) -> T) -> SurfaceResult<T> {
        if self.closed.load(Ordering::Acquire) {
            return Err(SurfaceError::Unavailable("game window closed".to_string()));
        }
        let now = self.clock.now();
        let delta = now.saturating_sub(self.synced_at);
        self.synced_at = now;
        let mut game = self
            .game
            .lock()
            .map_err(|_| SurfaceError::Unavailable("game state poisoned".to_string()))?;
        game.advance(delta.as_secs_f64());
        Ok(apply(&mut game))
    }
}

impl<C: Clock> GameSurface for SimulatedSurface<C> {
    fn read_money(&mut self) -> SurfaceResult<u64> {
        self.with_game(|game| game.money())
    }

    fn read_upgrade_prices(&mut self) -> SurfaceResult<UpgradePrices> {
        self.with_game(|game| game.prices())
    }

    fn read_production_rate(&mut self) -> SurfaceResult<f64> {
        self.with_game(|game| game.production_rate())
    }

    fn click(&mut self) -> SurfaceResult<()> {
        self.with_game(|game| game.click())
    }

    fn purchase(&mut self, tier: usize) -> SurfaceResult<()> {
        self.with_game(|game| game.buy(tier))??;
        Ok(())
    }

    fn close(&mut self) {
        self.closed.store(true, Ordering::Release);
    }
}

/// Outside view of a [`SimulatedSurface`]: observe the game or close its window.
#[derive(Debug, Clone)]
pub struct SimulationHandle {
    game: Arc<Mutex<OfflineGame>>,
    closed: Arc<AtomicBool>,
}

impl SimulationHandle {
    pub fn snapshot(&self) -> Option<OfflineGame> {
        self.game.lock().ok().map(|game| game.clone())
    }

    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl Readiness for SimulationHandle {
    fn is_ready(&self) -> bool {
        !self.is_closed()
    }
}
