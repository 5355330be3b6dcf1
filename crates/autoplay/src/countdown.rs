use crate::{AutoplayError, Clock, Readiness, SessionTuning, StopSignal};
use cookiebot_core::{format_clock, CountdownFrames};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::debug;

/// Where the session clock is shown. The user may close it at any time.
pub trait CountdownDisplay: Send {
    fn show(&mut self, text: &str);
    fn close(&mut self);

    fn is_open(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CountdownStatus {
    /// Reached `0:00` and released the display.
    Finished,
    /// Torn down by a stop request.
    Cancelled,
    /// The display was closed from outside.
    Dismissed,
}

/// Visible session clock, running beside the session loop.
///
/// Waits until the game surface reports ready, then shows one frame per
/// step from the full duration down to `0:00`.
pub struct CountdownCoordinator<D, R, C> {
    duration_secs: u32,
    display: D,
    readiness: R,
    clock: C,
    stop: StopSignal,
    session_over: StopSignal,
    tuning: SessionTuning,
}

impl<D, R, C> CountdownCoordinator<D, R, C>
where
    D: CountdownDisplay,
    R: Readiness,
    C: Clock,
{
    pub fn new(duration_secs: u32, display: D, readiness: R, clock: C) -> Self {
        Self {
            duration_secs,
            display,
            readiness,
            clock,
            stop: StopSignal::new(),
            session_over: StopSignal::new(),
            tuning: SessionTuning::default(),
        }
    }

    pub fn with_stop(mut self, stop: StopSignal) -> Self {
        self.stop = stop;
        self
    }

    /// Raised once the session loop has returned. A countdown that never
    /// saw the surface become ready gives up instead of waiting forever.
    pub fn with_session_over(mut self, session_over: StopSignal) -> Self {
        self.session_over = session_over;
        self
    }

    pub fn with_tuning(mut self, tuning: SessionTuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn run(mut self) -> CountdownStatus {
        let poll = self.tuning.readiness_poll();
        while !self.readiness.is_ready() {
            if let Some(status) = self.interrupted() {
                return status;
            }
            if self.session_over.is_raised() {
                self.display.close();
                debug!("session ended before the surface was ready");
                return CountdownStatus::Cancelled;
            }
            self.clock.sleep(poll);
        }
        debug!(duration_secs = self.duration_secs, "countdown started");

        for remaining in CountdownFrames::new(self.duration_secs) {
            if let Some(status) = self.interrupted() {
                return status;
            }
            self.display.show(&format_clock(remaining));
            if remaining == 0 {
                break;
            }
            if let Some(status) = self.wait(self.tuning.countdown_step()) {
                return status;
            }
        }
        self.display.close();
        debug!("countdown finished");
        CountdownStatus::Finished
    }

    /// Sleeps `step` in readiness-poll slices so a stop is noticed promptly.
    fn wait(&mut self, step: Duration) -> Option<CountdownStatus> {
        let slice = self.tuning.readiness_poll().min(step);
        let mut waited = Duration::ZERO;
        while waited < step {
            let chunk = slice.min(step - waited);
            self.clock.sleep(chunk);
            waited += chunk;
            if let Some(status) = self.interrupted() {
                return Some(status);
            }
        }
        None
    }

    fn interrupted(&mut self) -> Option<CountdownStatus> {
        if self.stop.is_raised() {
            self.display.close();
            debug!("countdown torn down");
            return Some(CountdownStatus::Cancelled);
        }
        if !self.display.is_open() {
            return Some(CountdownStatus::Dismissed);
        }
        None
    }
}

impl<D, R, C> CountdownCoordinator<D, R, C>
where
    D: CountdownDisplay + 'static,
    R: Readiness + 'static,
    C: Clock + 'static,
{
    pub fn spawn(self) -> Result<JoinHandle<CountdownStatus>, AutoplayError> {
        std::thread::Builder::new()
            .name("countdown".to_string())
            .spawn(move || self.run())
            .map_err(|err| AutoplayError::Worker(err.to_string()))
    }
}

#[derive(Debug, Default)]
struct DisplayState {
    frames: Vec<String>,
    open: bool,
    closed_by_user: bool,
}

/// Display whose frames can be read from another thread, e.g. a UI pane.
#[derive(Debug, Clone)]
pub struct SharedDisplay {
    state: Arc<Mutex<DisplayState>>,
}

impl SharedDisplay {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(DisplayState {
                open: true,
                ..DisplayState::default()
            })),
        }
    }

    /// Latest frame shown, if any.
    pub fn text(&self) -> Option<String> {
        self.state
            .lock()
            .ok()
            .and_then(|state| state.frames.last().cloned())
    }

    pub fn frames(&self) -> Vec<String> {
        self.state
            .lock()
            .map(|state| state.frames.clone())
            .unwrap_or_default()
    }

    /// Closes the display from the user's side.
    pub fn dismiss(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.open = false;
            state.closed_by_user = true;
        }
    }

    pub fn was_dismissed(&self) -> bool {
        self.state
            .lock()
            .map(|state| state.closed_by_user)
            .unwrap_or(false)
    }
}

impl Default for SharedDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl CountdownDisplay for SharedDisplay {
    fn show(&mut self, text: &str) {
        if let Ok(mut state) = self.state.lock() {
            state.frames.push(text.to_string());
        }
    }

    fn close(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            state.open = false;
        }
    }

    fn is_open(&self) -> bool {
        self.state.lock().map(|state| state.open).unwrap_or(false)
    }
}
