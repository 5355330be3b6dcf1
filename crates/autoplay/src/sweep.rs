use crate::{AutoplayError, ManualClock, SessionController, SessionTuning, SimulatedSurface};
use cookiebot_core::{ConfigError, OfflineGame, SessionConfig};
use cookiebot_data::{MemoryStore, ScoreLedger};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Offline exploration of the buy-out ratio over a virtual session length.
#[derive(Debug, Clone)]
pub struct SweepRequest {
    pub from: f64,
    pub to: f64,
    pub step: f64,
    pub duration_secs: u32,
    pub clicker: bool,
    pub tuning: SessionTuning,
}

impl Default for SweepRequest {
    fn default() -> Self {
        Self {
            from: 0.5,
            to: 1.0,
            step: 0.05,
            duration_secs: 600,
            clicker: true,
            tuning: SessionTuning::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SweepPoint {
    pub ratio: f64,
    pub cps: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SweepResult {
    pub points: Vec<SweepPoint>,
}

impl SweepResult {
    /// Highest production rate; the lower ratio wins ties.
    pub fn best(&self) -> Option<SweepPoint> {
        self.points.iter().copied().fold(None, |best, point| match best {
            Some(current) if current.cps >= point.cps => Some(current),
            _ => Some(point),
        })
    }
}

/// Upper bound on the number of ratios one sweep may visit.
pub const MAX_SWEEP_POINTS: usize = 10_000;

/// Ratios from `from` to `to` inclusive, `step` apart.
pub fn ratio_steps(from: f64, to: f64, step: f64) -> Result<Vec<f64>, ConfigError> {
    for value in [from, to] {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::RatioOutOfRange(value));
        }
    }
    if !step.is_finite() || step <= 0.0 {
        return Err(ConfigError::InvalidRatio(format!("step {step}")));
    }
    if from > to {
        return Err(ConfigError::InvalidRatio(format!("range {from}..{to}")));
    }
    let intervals = ((to - from) / step + 1e-9).floor();
    if !intervals.is_finite() || intervals >= MAX_SWEEP_POINTS as f64 {
        return Err(ConfigError::InvalidRatio(format!(
            "step {step} gives more than {MAX_SWEEP_POINTS} points"
        )));
    }
    let count = intervals as usize;
    Ok((0..=count)
        .map(|idx| {
            let value = from + step * idx as f64;
            (value * 1e9).round() / 1e9
        })
        .collect())
}

pub fn run_sweep(request: &SweepRequest) -> Result<SweepResult, AutoplayError> {
    let ratios = ratio_steps(request.from, request.to, request.step)?;
    let mut tuning = request.tuning.clone();
    tuning.tick_interval_ms = tuning.tick_interval_ms.max(1);
    let mut result = SweepResult::default();
    for ratio in ratios {
        let config = SessionConfig::new(request.clicker, true, request.duration_secs, Some(ratio))?;
        let clock = ManualClock::new();
        let surface = SimulatedSurface::new(OfflineGame::new(), clock.clone());
        let mut scratch = ScoreLedger::new(MemoryStore::new());
        let report = SessionController::new(config, surface, clock)
            .with_tuning(tuning.clone())
            .run(&mut scratch)?;
        let cps = report.record.map(|record| record.cps).unwrap_or(0.0);
        info!(ratio, cps, "sweep point");
        result.points.push(SweepPoint { ratio, cps });
    }
    Ok(result)
}
