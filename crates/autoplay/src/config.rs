use std::time::Duration;

/// Pacing of the session loop and the countdown.
#[derive(Debug, Clone)]
pub struct SessionTuning {
    pub tick_interval_ms: u64,
    pub readiness_poll_ms: u64,
    pub countdown_step_ms: u64,
    pub final_read_retries: u32,
}

impl Default for SessionTuning {
    fn default() -> Self {
        Self {
            tick_interval_ms: 10,
            readiness_poll_ms: 100,
            countdown_step_ms: 1000,
            final_read_retries: 3,
        }
    }
}

impl SessionTuning {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn readiness_poll(&self) -> Duration {
        Duration::from_millis(self.readiness_poll_ms.max(1))
    }

    pub fn countdown_step(&self) -> Duration {
        Duration::from_millis(self.countdown_step_ms)
    }
}
