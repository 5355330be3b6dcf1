use crate::{
    AutoplayError, Clock, GameSurface, SessionReport, SessionStats, SessionStatus, SessionTuning,
    StopSignal, SurfaceError, SurfaceResult,
};
use cookiebot_core::{
    plan_purchase, tier_name, ModeSwitch, ScoreRecord, SessionConfig, SessionMode,
};
use cookiebot_data::ScoreLedger;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Timed click-and-buy loop for one session.
///
/// Runs until the configured duration has elapsed, then reads the final
/// production rate and appends a score record. A terminal surface failure
/// aborts the session without writing anything.
pub struct SessionController<S: GameSurface, C: Clock> {
    config: SessionConfig,
    surface: S,
    clock: C,
    mode: ModeSwitch,
    stop: StopSignal,
    tuning: SessionTuning,
    stats: SessionStats,
}

impl<S: GameSurface, C: Clock> SessionController<S, C> {
    pub fn new(config: SessionConfig, surface: S, clock: C) -> Self {
        Self {
            config,
            surface,
            clock,
            mode: ModeSwitch::new(),
            stop: StopSignal::new(),
            tuning: SessionTuning::default(),
            stats: SessionStats::default(),
        }
    }

    pub fn with_mode(mut self, mode: ModeSwitch) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_stop(mut self, stop: StopSignal) -> Self {
        self.stop = stop;
        self
    }

    pub fn with_tuning(mut self, tuning: SessionTuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn mode_switch(&self) -> ModeSwitch {
        self.mode.clone()
    }

    pub fn run(mut self, ledger: &mut ScoreLedger) -> Result<SessionReport, AutoplayError> {
        let started = self.clock.now();
        let deadline = started + Duration::from_secs(u64::from(self.config.duration_secs()));
        info!(
            mode = %self.config.mode_label(),
            duration_secs = self.config.duration_secs(),
            "session started"
        );

        while self.clock.now() < deadline {
            if self.stop.is_raised() {
                info!("session stopped before its deadline");
                return Ok(self.finish(
                    SessionStatus::Cancelled,
                    None,
                    Some("stopped".to_string()),
                    started,
                ));
            }
            match self.tick() {
                Ok(()) => {}
                Err(SurfaceError::Transient(reason)) => {
                    self.stats.skipped_ticks += 1;
                    debug!(%reason, "tick skipped");
                }
                Err(err) => return Ok(self.abort(err, started)),
            }
            self.stats.ticks += 1;
            let interval = self.tuning.tick_interval();
            if !interval.is_zero() {
                self.clock.sleep(interval);
            }
        }

        let cps = match self.final_rate() {
            Ok(cps) => cps,
            Err(err) => return Ok(self.abort(err, started)),
        };
        let record = ScoreRecord::from_session(&self.config, cps);
        let report = self.finish(SessionStatus::Completed, Some(record.clone()), None, started);
        ledger.append(record)?;
        info!(
            cps,
            clicks = report.stats.clicks,
            purchases = report.stats.total_purchases(),
            "session completed"
        );
        Ok(report)
    }

    fn tick(&mut self) -> SurfaceResult<()> {
        if self.config.click_enabled() && self.mode.current() == SessionMode::Automated {
            self.surface.click()?;
            self.stats.clicks += 1;
        }
        if let Some(ratio) = self.config.ratio() {
            let prices = self.surface.read_upgrade_prices()?;
            let money = self.surface.read_money()?;
            if let Some(tier) = plan_purchase(money, &prices, ratio) {
                self.surface.purchase(tier)?;
                self.stats.purchases[tier] += 1;
                debug!(tier = tier_name(tier), price = prices[tier], money, "upgrade bought");
            }
        }
        Ok(())
    }

    fn final_rate(&mut self) -> SurfaceResult<f64> {
        let retries = self.tuning.final_read_retries;
        let mut attempt = 0;
        loop {
            match self.surface.read_production_rate() {
                Ok(cps) => return Ok(cps),
                Err(SurfaceError::Transient(reason)) if attempt < retries => {
                    attempt += 1;
                    debug!(%reason, attempt, "retrying final rate read");
                    self.clock.sleep(self.tuning.tick_interval());
                }
                Err(SurfaceError::Transient(reason)) => {
                    return Err(SurfaceError::Unavailable(format!(
                        "production rate unreadable after {} attempts: {reason}",
                        attempt + 1
                    )));
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn abort(self, err: SurfaceError, started: Duration) -> SessionReport {
        warn!(error = %err, "session aborted");
        self.finish(SessionStatus::Aborted, None, Some(err.to_string()), started)
    }

    fn finish(
        mut self,
        status: SessionStatus,
        record: Option<ScoreRecord>,
        abort_reason: Option<String>,
        started: Duration,
    ) -> SessionReport {
        self.surface.close();
        let elapsed = self.clock.now().saturating_sub(started);
        self.stats.elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        SessionReport {
            status,
            config: self.config,
            record,
            abort_reason,
            stats: self.stats,
        }
    }
}
